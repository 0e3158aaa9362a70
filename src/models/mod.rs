pub mod config;
pub mod file_type;

pub use config::{ServerConfig, DEFAULT_BIND_ADDR, DEFAULT_MAX_UPLOAD_BYTES};
pub use file_type::{extension, format_from_filename};
