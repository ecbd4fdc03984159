// ============================================================================
// STATE MODULE - Estado de la sesión con Rc<RefCell>
// ============================================================================

pub mod camera_registry;
pub mod session_state;

pub use camera_registry::*;
pub use session_state::*;
