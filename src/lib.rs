//! Microwave - image transforms over HTTP
//!
//! Upload an image with a mode and an intensity, get the cooked image back.
//! This library exposes modules for integration testing.

pub mod api;
pub mod cli;
pub mod error;
pub mod models;
pub mod server;
