// ============================================================================
// SCANNER SURFACE - Contrato con la UI (solo comandos de visualización)
// ============================================================================

use std::rc::Rc;
use crate::error::ScannerError;
use crate::models::ScanStatus;

/// Handle opaco de la región donde el motor dibuja el video.
/// Lo crea la UI y el controlador solo lo pasa al motor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRegion(String);

impl ScanRegion {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Acciones del usuario que la UI dispara sobre el controlador
pub struct ScannerActions<I> {
    pub on_start: Rc<dyn Fn()>,
    pub on_stop: Rc<dyn Fn()>,
    pub on_switch: Rc<dyn Fn()>,
    /// Solo presente si el escaneo desde archivo está habilitado
    pub on_file: Option<Rc<dyn Fn(I)>>,
}

impl<I> Clone for ScannerActions<I> {
    fn clone(&self) -> Self {
        Self {
            on_start: self.on_start.clone(),
            on_stop: self.on_stop.clone(),
            on_switch: self.on_switch.clone(),
            on_file: self.on_file.clone(),
        }
    }
}

/// Superficie de UI controlada por el ScannerViewModel
pub trait ScannerSurface {
    /// Imagen que produce el selector de archivo
    type Image: 'static;

    /// Construir el layout inicial y devolver la región de video
    fn render_layout(&self, actions: ScannerActions<Self::Image>) -> Result<ScanRegion, ScannerError>;

    /// Controles de cámara (stop y, si hay más de una cámara, switch)
    fn render_camera_actions(&self, can_switch: bool);

    fn set_start_visible(&self, visible: bool);

    fn set_camera_actions_visible(&self, visible: bool);

    /// Imagen de reposo en la región de video
    fn show_idle_placeholder(&self);

    fn set_status(&self, status: &ScanStatus);

    /// Restaurar el contenido previo al render
    fn reset(&self);
}
