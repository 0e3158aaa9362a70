pub mod modes;
pub mod process;

pub use modes::{handle_modes, handle_root, ModesResponse, __path_handle_modes, __path_handle_root};
pub use process::{
    handle_process_image, ErrorResponse, ProcessImageForm, __path_handle_process_image,
};
