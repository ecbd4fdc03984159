// Utils compartidos

pub mod constants;
#[cfg(target_arch = "wasm32")]
pub mod qrcode_ffi;

pub use constants::*;
