use std::rc::Rc;
use async_trait::async_trait;
use crate::config::CaptureConfig;
use crate::error::ScannerError;
use crate::models::{CameraDescriptor, ScanError, ScanPayload};

/// Callbacks por frame que el motor invoca mientras el loop está activo
#[derive(Clone)]
pub struct CaptureSinks {
    pub on_result: Rc<dyn Fn(ScanPayload)>,
    pub on_miss: Rc<dyn Fn(ScanError)>,
}

impl CaptureSinks {
    pub fn new<R, M>(on_result: R, on_miss: M) -> Self
    where
        R: Fn(ScanPayload) + 'static,
        M: Fn(ScanError) + 'static,
    {
        Self {
            on_result: Rc::new(on_result),
            on_miss: Rc::new(on_miss),
        }
    }
}

/// Capacidades del motor de decodificación (colaborador externo).
///
/// El motor no decide nada del ciclo de vida: solo abre/cierra la cámara y
/// decodifica. Todas las operaciones son single-thread (`?Send`).
#[async_trait(?Send)]
pub trait DecodeEngine {
    /// Imagen aceptada por `decode_single_image` (p.ej. `web_sys::File`)
    type Image: 'static;

    /// Enumerar cámaras. Falla con `Enumeration` sin permiso o sin hardware
    async fn enumerate_cameras(&self) -> Result<Vec<CameraDescriptor>, ScannerError>;

    /// Resuelve cuando el loop está activo, falla con `CaptureStart`
    async fn start_capture(
        &self,
        camera_id: &str,
        config: &CaptureConfig,
        sinks: CaptureSinks,
    ) -> Result<(), ScannerError>;

    /// Resuelve cuando el dispositivo está liberado. Seguro si ya está parado
    async fn stop_capture(&self) -> Result<(), ScannerError>;

    /// Decodificación de una sola imagen, falla con `Decode`
    async fn decode_single_image(&self, image: Self::Image) -> Result<ScanPayload, ScannerError>;

    /// ¿Hay un loop de captura activo?
    fn is_scanning(&self) -> bool;

    /// Liberar la instancia (después de stop)
    fn release(&self);
}
