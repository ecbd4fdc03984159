pub mod camera;
pub mod scan;
pub mod status;

pub use camera::CameraDescriptor;
pub use scan::{ScanError, ScanPayload, ScanSource};
pub use status::{ScanStatus, ScannerState, StatusKind};
