// ============================================================================
// PLATFORM - Todo lo que el controlador necesita del entorno
// ============================================================================

#[cfg(target_arch = "wasm32")]
pub mod web;

use futures::future::LocalBoxFuture;
use crate::engine::DecodeEngine;
use crate::views::{ScanRegion, ScannerSurface};

/// Entorno de ejecución del scanner: resolución del punto de montaje,
/// creación del motor, ejecución de tareas async y reloj
pub trait ScannerHost: 'static {
    type Engine: DecodeEngine + 'static;
    type Surface: ScannerSurface<Image = <Self::Engine as DecodeEngine>::Image> + 'static;

    /// None si el elemento de montaje no existe
    fn resolve_mount(&self, mount_id: &str) -> Option<Self::Surface>;

    /// Crear una instancia del motor ligada a la región de video
    fn create_engine(&self, region: &ScanRegion, verbose: bool) -> Self::Engine;

    /// Ejecutar una tarea en el mismo hilo (sin paralelismo)
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);

    /// Tiempo actual en milisegundos
    fn now_ms(&self) -> f64;
}
