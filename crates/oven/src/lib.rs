//! oven: intensity-driven image transforms
//!
//! A caller picks one of four [`Mode`]s and an [`Intensity`]; the
//! [`Dispatcher`] validates the intensity against that transform's domain,
//! derives the codec parameters and returns the re-encoded image in the
//! same container format it was given.
//!
//! # Quick Start
//!
//! ```no_run
//! use oven::{Dispatcher, ImageRsCodec, Intensity};
//!
//! let dispatcher = Dispatcher::new(ImageRsCodec::new());
//! let input = std::fs::read("photo.jpg").unwrap();
//! let intensity: Intensity = "50".parse().unwrap();
//! let stretched = dispatcher.process(&input, "Normal", intensity).unwrap();
//! ```
//!
//! # Modes
//!
//! | Mode | Transform | Intensity |
//! |---|---|---|
//! | `Normal` | [`transform::stretch`] | any; output bounded to 7680x4320 and at least 1x1 |
//! | `Defrosting` | [`transform::saturate`] | `>= -100` |
//! | `Grill` | [`transform::reduce_file_size`] | integer `1..=100`, inverted into quality |
//! | `Popcorn` | [`transform::reduce_resolution`] | `>= 0` |
//!
//! # Codec
//!
//! Pixel work sits behind the [`ImageCodec`] trait. [`ImageRsCodec`] is the
//! pure Rust implementation: JPEG, PNG, WebP, GIF, AVIF and TIFF in and out.

pub mod codec;
pub mod color;
pub mod dispatcher;
pub mod error;
pub mod intensity;
pub mod mode;
pub mod transform;


pub use codec::{CodecError, ContainerFormat, Fit, ImageCodec, ImageInfo, ImageRsCodec, Quality};
pub use dispatcher::Dispatcher;
pub use error::{ErrorKind, TransformError};
pub use intensity::{Intensity, ParseIntensityError};
pub use mode::Mode;
