pub mod surface;
#[cfg(target_arch = "wasm32")]
pub mod dom_surface;

pub use surface::{ScanRegion, ScannerActions, ScannerSurface};
