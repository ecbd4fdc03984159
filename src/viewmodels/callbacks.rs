// ============================================================================
// SCAN CALLBACKS - Callbacks del llamador + despacho
// ============================================================================
// El ViewModel termina sus efectos internos (stop, status, estado) y recién
// después despacha un único evento al llamador. Los pánicos del llamador no
// se capturan
// ============================================================================

use std::rc::Rc;
use crate::models::{ScanError, ScanPayload};

/// Evento entregado al llamador
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    StartRequested,
    StopRequested,
    Success(ScanPayload),
    Error(ScanError),
}

/// Callbacks registrados en render()
#[derive(Clone, Default)]
pub struct ScanCallbacks {
    on_start_requested: Option<Rc<dyn Fn()>>,
    on_stop_requested: Option<Rc<dyn Fn()>>,
    on_success: Option<Rc<dyn Fn(ScanPayload)>>,
    on_error: Option<Rc<dyn Fn(ScanError)>>,
}

impl ScanCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start_requested(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_start_requested = Some(Rc::new(callback));
        self
    }

    pub fn on_stop_requested(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_stop_requested = Some(Rc::new(callback));
        self
    }

    pub fn on_success(mut self, callback: impl Fn(ScanPayload) + 'static) -> Self {
        self.on_success = Some(Rc::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(ScanError) + 'static) -> Self {
        self.on_error = Some(Rc::new(callback));
        self
    }

    /// Entregar un evento al callback correspondiente (si existe)
    pub fn dispatch(&self, event: ScanEvent) {
        match event {
            ScanEvent::StartRequested => {
                if let Some(callback) = &self.on_start_requested {
                    callback();
                }
            }
            ScanEvent::StopRequested => {
                if let Some(callback) = &self.on_stop_requested {
                    callback();
                }
            }
            ScanEvent::Success(payload) => {
                if let Some(callback) = &self.on_success {
                    callback(payload);
                }
            }
            ScanEvent::Error(error) => {
                if let Some(callback) = &self.on_error {
                    callback(error);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use crate::models::ScanSource;

    #[test]
    fn test_dispatch_routes_events() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let callbacks = {
            let (a, b, c) = (log.clone(), log.clone(), log.clone());
            ScanCallbacks::new()
                .on_start_requested(move || a.borrow_mut().push("start".to_string()))
                .on_success(move |p| b.borrow_mut().push(format!("ok:{}", p.text)))
                .on_error(move |e| c.borrow_mut().push(format!("err:{}", e.message)))
        };

        callbacks.dispatch(ScanEvent::StartRequested);
        callbacks.dispatch(ScanEvent::StopRequested);
        callbacks.dispatch(ScanEvent::Success(ScanPayload::new("hello", ScanSource::Camera)));
        callbacks.dispatch(ScanEvent::Error(ScanError::new("miss", ScanSource::Camera)));

        assert_eq!(*log.borrow(), vec!["start", "ok:hello", "err:miss"]);
    }
}
