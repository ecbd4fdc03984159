// ============================================================================
// QRSCAN SESSION - Controlador de sesión de escaneo QR (Rust + WASM)
// ============================================================================
// Arquitectura:
// - Models: tipos compartidos (cámaras, resultados, status)
// - State: estado de la sesión con Rc<RefCell>
// - Engine: contrato con el motor de decodificación (html5-qrcode en web)
// - Views: contrato con la UI + implementación DOM
// - ViewModels: ciclo de vida de la sesión (máquina de estados)
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod engine;
pub mod platform;
pub mod views;
pub mod viewmodels;
pub mod utils;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
pub mod bindings;

pub use config::{CaptureConfig, ScanBox, ScannerConfig};
pub use error::ScannerError;
pub use models::{CameraDescriptor, ScanError, ScanPayload, ScanSource, ScanStatus, ScannerState, StatusKind};
pub use platform::ScannerHost;
pub use viewmodels::{ScanCallbacks, ScanEvent, ScannerViewModel};
