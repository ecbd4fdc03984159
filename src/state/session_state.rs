// ============================================================================
// SESSION STATE - Estado de una sesión de escaneo (Rc<RefCell>)
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use crate::models::{ScanStatus, ScannerState};
use crate::state::CameraRegistry;

/// Estado de la sesión. Clonar comparte el mismo estado
#[derive(Clone)]
pub struct SessionState {
    pub lifecycle: Rc<RefCell<ScannerState>>,
    pub status: Rc<RefCell<ScanStatus>>,
    pub cameras: Rc<RefCell<CameraRegistry>>,
    /// Se incrementa en cada start/stop: los callbacks de un loop anterior se descartan
    pub capture_epoch: Rc<Cell<u64>>,
    /// Último error de frame reenviado al llamador (ms)
    pub last_miss_report: Rc<Cell<Option<f64>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            lifecycle: Rc::new(RefCell::new(ScannerState::Idle)),
            status: Rc::new(RefCell::new(ScanStatus::idle())),
            cameras: Rc::new(RefCell::new(CameraRegistry::new())),
            capture_epoch: Rc::new(Cell::new(0)),
            last_miss_report: Rc::new(Cell::new(None)),
        }
    }

    pub fn get_lifecycle(&self) -> ScannerState {
        *self.lifecycle.borrow()
    }

    pub fn set_lifecycle(&self, state: ScannerState) {
        *self.lifecycle.borrow_mut() = state;
    }

    pub fn get_status(&self) -> ScanStatus {
        self.status.borrow().clone()
    }

    pub fn set_status(&self, status: ScanStatus) {
        *self.status.borrow_mut() = status;
    }

    /// Epoch del loop actual
    pub fn current_epoch(&self) -> u64 {
        self.capture_epoch.get()
    }

    /// Invalidar los callbacks del loop anterior y devolver el nuevo epoch
    pub fn bump_epoch(&self) -> u64 {
        let next = self.capture_epoch.get().wrapping_add(1);
        self.capture_epoch.set(next);
        next
    }

    /// Decidir si un error de frame se reenvía (throttle opcional)
    pub fn should_report_miss(&self, now_ms: f64, interval_ms: Option<u32>) -> bool {
        let Some(interval) = interval_ms else {
            return true;
        };
        match self.last_miss_report.get() {
            Some(last) if now_ms - last < f64::from(interval) => false,
            _ => {
                self.last_miss_report.set(Some(now_ms));
                true
            }
        }
    }

    /// Volver al estado inicial (después de clear)
    pub fn reset(&self) {
        self.set_lifecycle(ScannerState::Idle);
        self.set_status(ScanStatus::idle());
        self.cameras.borrow_mut().reset();
        self.bump_epoch();
        self.last_miss_report.set(None);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = SessionState::new();
        assert_eq!(state.get_lifecycle(), ScannerState::Idle);
        assert_eq!(state.get_status(), ScanStatus::idle());
    }

    #[test]
    fn test_miss_throttle() {
        let state = SessionState::new();
        assert!(state.should_report_miss(0.0, Some(500)));
        assert!(!state.should_report_miss(200.0, Some(500)));
        assert!(state.should_report_miss(600.0, Some(500)));
        assert!(state.should_report_miss(601.0, None));
    }

    #[test]
    fn test_bump_epoch_invalidates() {
        let state = SessionState::new();
        let first = state.current_epoch();
        let second = state.bump_epoch();
        assert_ne!(first, second);
        assert_eq!(state.current_epoch(), second);
    }
}
