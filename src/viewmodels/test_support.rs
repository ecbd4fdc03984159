// ============================================================================
// TEST SUPPORT - Host simulado (motor + UI + spawner) que registra llamadas
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use crate::config::{CaptureConfig, ScannerConfig};
use crate::engine::{CaptureSinks, DecodeEngine};
use crate::error::ScannerError;
use crate::models::{CameraDescriptor, ScanError, ScanPayload, ScanSource, ScanStatus};
use crate::platform::ScannerHost;
use crate::views::{ScanRegion, ScannerActions, ScannerSurface};
use super::{ScanCallbacks, ScannerViewModel};

pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Respuestas programadas del motor simulado
pub struct EngineScript {
    pub cameras: RefCell<Result<Vec<CameraDescriptor>, ScannerError>>,
    pub start_result: RefCell<Result<(), ScannerError>>,
    pub stop_result: RefCell<Result<(), ScannerError>>,
    pub decode_result: RefCell<Result<ScanPayload, ScannerError>>,
    // Operación ("enumerate", "start", "stop", "decode") -> se bloquea hasta send()
    gates: RefCell<HashMap<&'static str, oneshot::Receiver<()>>>,
}

impl EngineScript {
    fn with_cameras(ids: &[&str]) -> Self {
        Self {
            cameras: RefCell::new(Ok(ids
                .iter()
                .map(|id| CameraDescriptor::new(*id, format!("Camera {}", id)))
                .collect())),
            start_result: RefCell::new(Ok(())),
            stop_result: RefCell::new(Ok(())),
            decode_result: RefCell::new(Ok(ScanPayload::new("file-payload", ScanSource::File))),
            gates: RefCell::new(HashMap::new()),
        }
    }

    /// La próxima llamada a `operation` queda pendiente hasta que se envíe
    /// por el sender devuelto
    pub fn gate(&self, operation: &'static str) -> oneshot::Sender<()> {
        let (open, gate) = oneshot::channel();
        self.gates.borrow_mut().insert(operation, gate);
        open
    }

    async fn pass(&self, operation: &'static str) {
        let gate = self.gates.borrow_mut().remove(operation);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }
}

pub struct MockEngine {
    calls: CallLog,
    script: Rc<EngineScript>,
    scanning: Rc<Cell<bool>>,
    sinks: Rc<RefCell<Option<CaptureSinks>>>,
    overlaps: Rc<Cell<usize>>,
    last_config: Rc<RefCell<Option<CaptureConfig>>>,
}

#[async_trait(?Send)]
impl DecodeEngine for MockEngine {
    /// Nombre del archivo
    type Image = String;

    async fn enumerate_cameras(&self) -> Result<Vec<CameraDescriptor>, ScannerError> {
        self.calls.borrow_mut().push("enumerate".to_string());
        self.script.pass("enumerate").await;
        self.script.cameras.borrow().clone()
    }

    async fn start_capture(
        &self,
        camera_id: &str,
        config: &CaptureConfig,
        sinks: CaptureSinks,
    ) -> Result<(), ScannerError> {
        self.calls.borrow_mut().push(format!("start:{}", camera_id));
        if self.scanning.get() {
            self.overlaps.set(self.overlaps.get() + 1);
        }
        self.script.pass("start").await;
        *self.last_config.borrow_mut() = Some(*config);
        let result = self.script.start_result.borrow().clone();
        if result.is_ok() {
            self.scanning.set(true);
            *self.sinks.borrow_mut() = Some(sinks);
        }
        result
    }

    async fn stop_capture(&self) -> Result<(), ScannerError> {
        self.calls.borrow_mut().push("stop".to_string());
        self.script.pass("stop").await;
        let result = self.script.stop_result.borrow().clone();
        if result.is_ok() {
            self.scanning.set(false);
        }
        result
    }

    async fn decode_single_image(&self, image: String) -> Result<ScanPayload, ScannerError> {
        self.calls.borrow_mut().push(format!("decode:{}", image));
        self.script.pass("decode").await;
        self.script.decode_result.borrow().clone()
    }

    fn is_scanning(&self) -> bool {
        self.scanning.get()
    }

    fn release(&self) {
        self.calls.borrow_mut().push("release".to_string());
        self.scanning.set(false);
    }
}

/// Estado compartido de la UI simulada
#[derive(Default)]
pub struct SurfaceRecord {
    pub events: RefCell<Vec<String>>,
    pub statuses: RefCell<Vec<ScanStatus>>,
    pub content: RefCell<String>,
    pub start_visible: Cell<bool>,
    pub camera_actions_visible: Cell<bool>,
    pub actions: RefCell<Option<ScannerActions<String>>>,
}

pub struct MockSurface {
    record: Rc<SurfaceRecord>,
}

impl ScannerSurface for MockSurface {
    type Image = String;

    fn render_layout(&self, actions: ScannerActions<String>) -> Result<ScanRegion, ScannerError> {
        self.record.events.borrow_mut().push("render".to_string());
        *self.record.content.borrow_mut() = "layout".to_string();
        *self.record.actions.borrow_mut() = Some(actions);
        Ok(ScanRegion::new("reader__scan_region"))
    }

    fn render_camera_actions(&self, can_switch: bool) {
        self.record.events.borrow_mut().push(format!("camera_actions:{}", can_switch));
    }

    fn set_start_visible(&self, visible: bool) {
        self.record.start_visible.set(visible);
    }

    fn set_camera_actions_visible(&self, visible: bool) {
        self.record.camera_actions_visible.set(visible);
    }

    fn show_idle_placeholder(&self) {
        self.record.events.borrow_mut().push("placeholder".to_string());
    }

    fn set_status(&self, status: &ScanStatus) {
        self.record.statuses.borrow_mut().push(status.clone());
    }

    fn reset(&self) {
        self.record.events.borrow_mut().push("reset".to_string());
        *self.record.content.borrow_mut() = "original".to_string();
        self.record.actions.borrow_mut().take();
    }
}

/// Host simulado. Clonar comparte todo el estado
#[derive(Clone)]
pub struct MockHost {
    pub calls: CallLog,
    pub script: Rc<EngineScript>,
    pub surface: Rc<SurfaceRecord>,
    pub mounts: Rc<Vec<String>>,
    pub engines_created: Rc<Cell<usize>>,
    pub sinks: Rc<RefCell<Option<CaptureSinks>>>,
    pub scanning: Rc<Cell<bool>>,
    pub overlaps: Rc<Cell<usize>>,
    pub last_config: Rc<RefCell<Option<CaptureConfig>>>,
    pub clock: Rc<Cell<f64>>,
    spawner: LocalSpawner,
}

impl MockHost {
    pub fn new(spawner: LocalSpawner, cameras: &[&str]) -> Self {
        let surface = SurfaceRecord::default();
        *surface.content.borrow_mut() = "original".to_string();
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            script: Rc::new(EngineScript::with_cameras(cameras)),
            surface: Rc::new(surface),
            mounts: Rc::new(vec!["reader".to_string()]),
            engines_created: Rc::new(Cell::new(0)),
            sinks: Rc::new(RefCell::new(None)),
            scanning: Rc::new(Cell::new(false)),
            overlaps: Rc::new(Cell::new(0)),
            last_config: Rc::new(RefCell::new(None)),
            clock: Rc::new(Cell::new(0.0)),
            spawner,
        }
    }
}

impl ScannerHost for MockHost {
    type Engine = MockEngine;
    type Surface = MockSurface;

    fn resolve_mount(&self, mount_id: &str) -> Option<MockSurface> {
        self.mounts.iter().any(|m| m == mount_id).then(|| MockSurface {
            record: self.surface.clone(),
        })
    }

    fn create_engine(&self, _region: &ScanRegion, _verbose: bool) -> MockEngine {
        self.engines_created.set(self.engines_created.get() + 1);
        MockEngine {
            calls: self.calls.clone(),
            script: self.script.clone(),
            scanning: self.scanning.clone(),
            sinks: self.sinks.clone(),
            overlaps: self.overlaps.clone(),
            last_config: self.last_config.clone(),
        }
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner.spawn_local(task).expect("spawn test task");
    }

    fn now_ms(&self) -> f64 {
        self.clock.get()
    }
}

/// Sesión renderizada con callbacks que escriben en el mismo log del motor
pub struct Fixture {
    pub pool: LocalPool,
    pub host: MockHost,
    pub vm: ScannerViewModel<MockHost>,
}

impl Fixture {
    pub fn new(cameras: &[&str]) -> Self {
        Self::with_config(cameras, None)
    }

    pub fn with_config(cameras: &[&str], config: Option<ScannerConfig>) -> Self {
        let pool = LocalPool::new();
        let host = MockHost::new(pool.spawner(), cameras);
        let vm = ScannerViewModel::new(host.clone(), "reader", config, true).expect("mount exists");
        vm.render(recording_callbacks(&host.calls)).expect("first render");
        Self { pool, host, vm }
    }

    /// Ejecutar una operación async hasta completarla
    pub fn run<F: Future>(&mut self, future: F) -> F::Output {
        self.pool.run_until(future)
    }

    /// Lanzar una operación sin esperarla (queda en el pool)
    pub fn spawn<F: Future<Output = ()> + 'static>(&self, task: F) {
        self.pool.spawner().spawn_local(task).expect("spawn test task");
    }

    /// Ejecutar todas las tareas pendientes (spawn)
    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    pub fn start(&mut self) {
        let vm = self.vm.clone();
        self.run(vm.start());
    }

    pub fn stop(&mut self) {
        let vm = self.vm.clone();
        self.run(vm.stop());
    }

    pub fn switch_camera(&mut self) {
        let vm = self.vm.clone();
        self.run(vm.switch_camera());
    }

    pub fn scan_file(&mut self, name: &str) {
        let vm = self.vm.clone();
        self.run(vm.scan_file(name.to_string()));
    }

    pub fn clear(&mut self) -> Result<(), ScannerError> {
        let vm = self.vm.clone();
        self.run(vm.clear())
    }

    pub fn calls(&self) -> Vec<String> {
        self.host.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.host.calls.borrow_mut().clear();
    }

    /// Simular un código detectado por el loop activo
    pub fn fire_result(&self, text: &str) {
        let sinks = self.host.sinks.borrow().clone();
        if let Some(sinks) = sinks {
            (sinks.on_result)(ScanPayload::new(text, ScanSource::Camera));
        }
    }

    /// Simular un frame sin código
    pub fn fire_miss(&self, message: &str) {
        let sinks = self.host.sinks.borrow().clone();
        if let Some(sinks) = sinks {
            (sinks.on_miss)(ScanError::new(message, ScanSource::Camera));
        }
    }

    /// Simular un click sobre los controles de la UI
    pub fn actions(&self) -> ScannerActions<String> {
        self.host.surface.actions.borrow().clone().expect("layout rendered")
    }

    pub fn last_status(&self) -> Option<ScanStatus> {
        self.host.surface.statuses.borrow().last().cloned()
    }
}

pub fn recording_callbacks(calls: &CallLog) -> ScanCallbacks {
    let (start, stop, success, error) = (calls.clone(), calls.clone(), calls.clone(), calls.clone());
    ScanCallbacks::new()
        .on_start_requested(move || start.borrow_mut().push("cb:start_requested".to_string()))
        .on_stop_requested(move || stop.borrow_mut().push("cb:stop_requested".to_string()))
        .on_success(move |payload| success.borrow_mut().push(format!("cb:success:{}", payload.text)))
        .on_error(move |err| error.borrow_mut().push(format!("cb:error:{}", err.message)))
}
