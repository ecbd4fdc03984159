/// Textos de status mostrados al usuario
pub const STATUS_TEXT_IDLE: &str = "IDLE";
pub const STATUS_TEXT_PERMISSION: &str = "PERMISSION";
pub const STATUS_TEXT_SCANNING: &str = "Scanning";
pub const STATUS_TEXT_MATCH: &str = "MATCH";
pub const STATUS_TEXT_ERROR: &str = "ERROR";
pub const STATUS_TEXT_NO_CAMERAS: &str = "No Cameras";

/// Textos de los controles
pub const LABEL_START_SCAN: &str = "Click to scan";
pub const LABEL_STOP_SCAN: &str = "Stop scanning";
pub const LABEL_SWITCH_CAMERA: &str = "Switch camera";
pub const LABEL_FILE_SCAN: &str = "Scan from file";

/// Mensaje al llamador cuando un resultado no pudo cerrar el loop activo
pub const MESSAGE_STOP_FAILED: &str = "Unable to stop the running scan";
