// ============================================================================
// SCANNER VIEWMODEL - Ciclo de vida de una sesión de escaneo QR
// ============================================================================
// Máquina de estados:
//   Idle --start (cámara conocida)--> Scanning
//   Idle --start (sin cámara)--> Permission --cámaras>0--> Scanning
//                                           --0 cámaras--> Idle [Warning]
//                                           --fallo--> Idle
//   Scanning --éxito--> Match | --stop--> Idle | --miss--> Scanning
//
// Las operaciones de ciclo de vida se serializan con `transition`. Los
// callbacks del llamador se despachan con el lock ya liberado
// ============================================================================

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use futures::lock::Mutex;
use crate::config::ScannerConfig;
use crate::engine::{CaptureSinks, DecodeEngine};
use crate::error::ScannerError;
use crate::models::{CameraDescriptor, ScanError, ScanPayload, ScanSource, ScanStatus, ScannerState};
use crate::platform::ScannerHost;
use crate::state::SessionState;
use crate::utils::constants::{MESSAGE_STOP_FAILED, STATUS_TEXT_NO_CAMERAS};
use crate::views::{ScannerActions, ScannerSurface};
use super::callbacks::{ScanCallbacks, ScanEvent};

type ImageOf<H> = <<H as ScannerHost>::Engine as DecodeEngine>::Image;

struct Inner<H: ScannerHost> {
    host: H,
    mount_id: String,
    surface: H::Surface,
    config: ScannerConfig,
    verbose: bool,
    state: SessionState,
    // Una instancia por ciclo de render; solo clear() la libera
    engine: RefCell<Option<Rc<H::Engine>>>,
    callbacks: RefCell<Option<Rc<ScanCallbacks>>>,
    transition: Mutex<()>,
}

/// Controlador de la sesión de escaneo. Clonar comparte la misma sesión
pub struct ScannerViewModel<H: ScannerHost> {
    inner: Rc<Inner<H>>,
}

impl<H: ScannerHost> Clone for ScannerViewModel<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: ScannerHost> ScannerViewModel<H> {
    /// Crear la sesión. Falla con `ElementNotFound` antes de reservar recursos
    pub fn new(
        host: H,
        mount_id: &str,
        config: Option<ScannerConfig>,
        verbose: bool,
    ) -> Result<Self, ScannerError> {
        let surface = host
            .resolve_mount(mount_id)
            .ok_or_else(|| ScannerError::ElementNotFound(mount_id.to_string()))?;

        // Sin configuración: {frameRate: 10, scanBoxSize: 250}
        let config = config.unwrap_or_default();
        config.validate()?;

        Ok(Self {
            inner: Rc::new(Inner {
                host,
                mount_id: mount_id.to_string(),
                surface,
                config,
                verbose,
                state: SessionState::new(),
                engine: RefCell::new(None),
                callbacks: RefCell::new(None),
                transition: Mutex::new(()),
            }),
        })
    }

    // ------------------------------------------------------------------------
    // API pública
    // ------------------------------------------------------------------------

    /// Construir la UI, registrar callbacks y crear el motor de este ciclo
    pub fn render(&self, callbacks: ScanCallbacks) -> Result<(), ScannerError> {
        if self.is_rendered() {
            return Err(ScannerError::AlreadyRendered);
        }

        let region = self.inner.surface.render_layout(self.build_actions())?;
        let engine = self.inner.host.create_engine(&region, self.inner.verbose);

        self.inner.state.reset();
        *self.inner.callbacks.borrow_mut() = Some(Rc::new(callbacks));
        *self.inner.engine.borrow_mut() = Some(Rc::new(engine));

        self.set_status(ScanStatus::idle());
        self.inner.surface.set_start_visible(true);
        log::info!("📷 [SCANNER] UI renderizada en #{}", self.inner.mount_id);
        Ok(())
    }

    /// Iniciar el escaneo continuo (enumera cámaras la primera vez)
    pub async fn start(&self) {
        if !self.ensure_rendered("start") {
            return;
        }
        let _guard = self.inner.transition.lock().await;

        let has_camera = self.inner.state.cameras.borrow().selected_index().is_some();
        if has_camera {
            self.restart_capture_locked().await;
        } else {
            self.enumerate_and_start_locked().await;
        }
    }

    /// Detener el escaneo continuo. Los fallos no se propagan
    pub async fn stop(&self) {
        if !self.ensure_rendered("stop") {
            return;
        }
        let _guard = self.inner.transition.lock().await;
        self.stop_capture_locked().await;
    }

    /// Acción del usuario: notificar al llamador y luego start()
    pub async fn request_start(&self) {
        self.dispatch(ScanEvent::StartRequested);
        self.start().await;
    }

    /// Acción del usuario: notificar al llamador y luego stop()
    pub async fn request_stop(&self) {
        self.dispatch(ScanEvent::StopRequested);
        self.stop().await;
    }

    /// Pasar a la siguiente cámara (solo con más de una cámara)
    pub async fn switch_camera(&self) {
        if !self.ensure_rendered("switch_camera") {
            return;
        }
        let _guard = self.inner.transition.lock().await;

        let next = {
            let mut cameras = self.inner.state.cameras.borrow_mut();
            if cameras.can_switch() {
                cameras.advance().map(|camera| camera.id.clone())
            } else {
                None
            }
        };
        let Some(camera_id) = next else {
            log::debug!("📷 [SCANNER] switch_camera ignorado: una sola cámara o ninguna");
            return;
        };

        log::info!("🔄 [SCANNER] Cambiando a cámara {}", camera_id);
        self.restart_capture_locked().await;
    }

    /// Decodificar una imagen suelta. No inicia el loop continuo
    pub async fn scan_file(&self, image: ImageOf<H>) {
        if !self.inner.config.enable_file_scan {
            log::warn!("⚠️ [SCANNER] Escaneo desde archivo deshabilitado");
            return;
        }
        if !self.ensure_rendered("scan_file") {
            return;
        }
        let guard = self.inner.transition.lock().await;
        // Un clear() que esperaba el lock antes que nosotros ya liberó el motor
        let Some(engine) = self.engine() else {
            return;
        };

        if !self.stop_capture_locked().await {
            drop(guard);
            self.dispatch(ScanEvent::Error(ScanError::new(
                MESSAGE_STOP_FAILED,
                ScanSource::File,
            )));
            return;
        }

        let event = match engine.decode_single_image(image).await {
            Ok(payload) => {
                if self.finish_match_locked().await {
                    ScanEvent::Success(payload)
                } else {
                    ScanEvent::Error(ScanError::new(
                        MESSAGE_STOP_FAILED,
                        ScanSource::File,
                    ))
                }
            }
            Err(e) => {
                self.diag("Fallo decodificando archivo", &e);
                self.set_status(ScanStatus::error());
                ScanEvent::Error(to_scan_error(e, ScanSource::File))
            }
        };
        drop(guard);
        self.dispatch(event);
    }

    /// Desmontar la sesión: detiene el loop, libera el motor y restaura la UI.
    /// Siempre resuelve salvo que falle el stop de un loop activo
    pub async fn clear(&self) -> Result<(), ScannerError> {
        if !self.is_rendered() {
            return Ok(());
        }
        let _guard = self.inner.transition.lock().await;
        // Otro clear() pudo terminar mientras esperábamos el lock
        let Some(engine) = self.engine() else {
            return Ok(());
        };

        if engine.is_scanning() {
            if let Err(e) = engine.stop_capture().await {
                // El loop sigue vivo y sus resultados siguen llegando
                self.diag("Unable to stop qrcode scanner", &e);
                self.inner.state.set_lifecycle(ScannerState::Idle);
                self.set_status(ScanStatus::error());
                self.inner.surface.set_start_visible(true);
                return Err(e);
            }
            self.inner.state.bump_epoch();
        }

        engine.release();
        self.inner.engine.borrow_mut().take();
        self.inner.callbacks.borrow_mut().take();
        self.inner.state.reset();
        self.inner.surface.reset();
        log::info!("🧹 [SCANNER] Sesión liberada en #{}", self.inner.mount_id);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Getters
    // ------------------------------------------------------------------------

    pub fn state(&self) -> ScannerState {
        self.inner.state.get_lifecycle()
    }

    pub fn status(&self) -> ScanStatus {
        self.inner.state.get_status()
    }

    pub fn is_rendered(&self) -> bool {
        self.inner.engine.borrow().is_some()
    }

    pub fn selected_camera(&self) -> Option<CameraDescriptor> {
        self.inner.state.cameras.borrow().selected().cloned()
    }

    pub fn camera_ids(&self) -> Vec<String> {
        self.inner.state.cameras.borrow().ids()
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.inner.config
    }

    pub fn mount_id(&self) -> &str {
        &self.inner.mount_id
    }

    // ------------------------------------------------------------------------
    // Transiciones (requieren el lock `transition`)
    // ------------------------------------------------------------------------

    /// Pedir permiso + enumerar; con cámaras selecciona la última y arranca
    async fn enumerate_and_start_locked(&self) {
        let Some(engine) = self.engine() else {
            return;
        };
        self.inner.state.set_lifecycle(ScannerState::Permission);
        self.set_status(ScanStatus::permission());

        let cameras = match engine.enumerate_cameras().await {
            Ok(cameras) => cameras,
            Err(e) => {
                // Sin error visible para el llamador
                self.diag("Fallo enumerando cámaras", &e);
                self.inner.state.set_lifecycle(ScannerState::Idle);
                self.set_status(ScanStatus::idle());
                return;
            }
        };

        if cameras.is_empty() {
            log::warn!("⚠️ [SCANNER] No se encontraron cámaras");
            self.inner.state.set_lifecycle(ScannerState::Idle);
            self.set_status(ScanStatus::warning(STATUS_TEXT_NO_CAMERAS));
            return;
        }

        let can_switch = {
            let mut registry = self.inner.state.cameras.borrow_mut();
            registry.replace(cameras);
            registry.can_switch()
        };
        log::info!("📷 [SCANNER] {} cámara(s) disponibles", self.inner.state.cameras.borrow().len());

        self.set_status(ScanStatus::idle());
        self.inner.surface.render_camera_actions(can_switch);
        self.restart_capture_locked().await;
    }

    /// Stop y luego start sobre la cámara seleccionada. Es el único punto que
    /// abre un loop, así nunca hay dos loops sobre el mismo dispositivo
    async fn restart_capture_locked(&self) {
        let Some(engine) = self.engine() else {
            return;
        };
        let selected = self.inner.state.cameras.borrow().selected_id();
        let Some(camera_id) = selected else {
            return;
        };

        if !self.stop_capture_locked().await {
            // El dispositivo no se liberó: no se abre otro loop
            self.inner.surface.set_start_visible(true);
            return;
        }

        self.inner.surface.set_start_visible(false);
        let epoch = self.inner.state.bump_epoch();
        let capture_config = self.inner.config.capture_config();

        match engine.start_capture(&camera_id, &capture_config, self.capture_sinks(epoch)).await {
            Ok(()) => {
                log::info!("✅ [SCANNER] Escaneando con cámara {}", camera_id);
                self.inner.surface.set_camera_actions_visible(true);
                self.inner.state.set_lifecycle(ScannerState::Scanning);
                self.set_status(ScanStatus::scanning());
            }
            Err(e) => {
                self.diag("Fallo iniciando captura", &e);
                self.inner.state.bump_epoch();
                self.inner.state.set_lifecycle(ScannerState::Idle);
                self.set_status(ScanStatus::idle());
                self.inner.surface.set_start_visible(true);
            }
        }
    }

    /// stopCapture + UI de reposo. Devuelve false si el motor falló
    async fn stop_capture_locked(&self) -> bool {
        let Some(engine) = self.engine() else {
            return true;
        };
        match engine.stop_capture().await {
            Ok(()) => {
                // Los callbacks del loop detenido dejan de valer
                self.inner.state.bump_epoch();
                self.inner.surface.set_camera_actions_visible(false);
                self.inner.surface.set_start_visible(true);
                self.inner.state.set_lifecycle(ScannerState::Idle);
                self.set_status(ScanStatus::idle());
                self.inner.surface.show_idle_placeholder();
                true
            }
            Err(e) => {
                self.diag("Fallo deteniendo captura", &e);
                self.inner.state.set_lifecycle(ScannerState::Idle);
                self.set_status(ScanStatus::error());
                false
            }
        }
    }

    /// Detener el loop y marcar Match. false si el loop no se pudo detener
    async fn finish_match_locked(&self) -> bool {
        if !self.stop_capture_locked().await {
            return false;
        }
        self.inner.state.set_lifecycle(ScannerState::Match);
        self.set_status(ScanStatus::matched());
        true
    }

    // ------------------------------------------------------------------------
    // Eventos del motor
    // ------------------------------------------------------------------------

    fn capture_sinks(&self, epoch: u64) -> CaptureSinks {
        let on_result = Rc::downgrade(&self.inner);
        let on_miss = on_result.clone();
        CaptureSinks::new(
            move |payload| {
                if let Some(inner) = on_result.upgrade() {
                    ScannerViewModel { inner }.on_decode_result(epoch, payload);
                }
            },
            move |error| {
                if let Some(inner) = on_miss.upgrade() {
                    ScannerViewModel { inner }.on_decode_miss(epoch, error);
                }
            },
        )
    }

    fn is_live(&self, epoch: u64) -> bool {
        self.is_rendered() && self.inner.state.current_epoch() == epoch
    }

    fn on_decode_result(&self, epoch: u64, payload: ScanPayload) {
        if !self.is_live(epoch) {
            log::trace!("[SCANNER] Resultado descartado (loop anterior)");
            return;
        }
        let vm = self.clone();
        self.inner.host.spawn(Box::pin(async move {
            vm.complete_match(epoch, payload).await;
        }));
    }

    async fn complete_match(&self, epoch: u64, payload: ScanPayload) {
        let guard = self.inner.transition.lock().await;
        // Un resultado previo del mismo loop ya lo detuvo
        if !self.is_live(epoch) {
            return;
        }
        let stopped = self.finish_match_locked().await;
        drop(guard);

        if stopped {
            log::info!("✅ [SCANNER] Código detectado");
            self.dispatch(ScanEvent::Success(payload));
        } else {
            log::warn!("⚠️ [SCANNER] Resultado descartado: el loop no se pudo detener");
            self.dispatch(ScanEvent::Error(ScanError::new(
                MESSAGE_STOP_FAILED,
                ScanSource::Camera,
            )));
        }
    }

    fn on_decode_miss(&self, epoch: u64, error: ScanError) {
        if !self.is_live(epoch) {
            return;
        }
        log::trace!("[SCANNER] Frame sin código: {}", error);
        self.set_status(ScanStatus::scanning());

        let now = self.inner.host.now_ms();
        if self
            .inner
            .state
            .should_report_miss(now, self.inner.config.miss_report_interval_ms)
        {
            self.dispatch(ScanEvent::Error(error));
        }
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn build_actions(&self) -> ScannerActions<ImageOf<H>> {
        let on_file = if self.inner.config.enable_file_scan {
            let weak = Rc::downgrade(&self.inner);
            let on_file: Rc<dyn Fn(ImageOf<H>)> = Rc::new(move |image| {
                if let Some(inner) = weak.upgrade() {
                    let vm = ScannerViewModel { inner };
                    let task_vm = vm.clone();
                    vm.inner.host.spawn(Box::pin(async move {
                        task_vm.scan_file(image).await;
                    }));
                }
            });
            Some(on_file)
        } else {
            None
        };

        ScannerActions {
            on_start: self.action(|vm| async move { vm.request_start().await }),
            on_stop: self.action(|vm| async move { vm.request_stop().await }),
            on_switch: self.action(|vm| async move { vm.switch_camera().await }),
            on_file,
        }
    }

    /// Acción de UI que lanza una operación async. Usa Weak: la UI no mantiene
    /// viva la sesión
    fn action<F, Fut>(&self, operation: F) -> Rc<dyn Fn()>
    where
        F: Fn(ScannerViewModel<H>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let weak = Rc::downgrade(&self.inner);
        Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                let vm = ScannerViewModel { inner };
                let task = operation(vm.clone());
                vm.inner.host.spawn(Box::pin(task));
            }
        })
    }

    fn engine(&self) -> Option<Rc<H::Engine>> {
        self.inner.engine.borrow().clone()
    }

    fn callbacks(&self) -> Option<Rc<ScanCallbacks>> {
        self.inner.callbacks.borrow().clone()
    }

    fn dispatch(&self, event: ScanEvent) {
        if let Some(callbacks) = self.callbacks() {
            callbacks.dispatch(event);
        }
    }

    fn set_status(&self, status: ScanStatus) {
        self.inner.surface.set_status(&status);
        self.inner.state.set_status(status);
    }

    fn ensure_rendered(&self, operation: &str) -> bool {
        if self.is_rendered() {
            return true;
        }
        log::warn!("⚠️ [SCANNER] {}: {}", operation, ScannerError::NotRendered);
        false
    }

    /// Log de diagnóstico: solo con verbose, nunca cambia el flujo
    fn diag(&self, message: &str, error: &ScannerError) {
        if self.inner.verbose {
            log::error!("❌ [SCANNER] {}: {}", message, error);
        }
    }
}

/// Error del motor → error entregado al llamador (mensaje sin adornos)
fn to_scan_error(error: ScannerError, source: ScanSource) -> ScanError {
    match error {
        ScannerError::Decode(message) => ScanError::new(message, source),
        other => ScanError::new(other.to_string(), source),
    }
}
