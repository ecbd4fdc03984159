use serde::{Deserialize, Serialize};
use crate::utils::constants::{
    STATUS_TEXT_ERROR, STATUS_TEXT_IDLE, STATUS_TEXT_MATCH, STATUS_TEXT_PERMISSION,
    STATUS_TEXT_SCANNING,
};

/// Estado interno del ciclo de vida de la sesión
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScannerState {
    Idle,
    Permission,
    Scanning,
    Match,
}

impl ScannerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScannerState::Idle => "idle",
            ScannerState::Permission => "permission",
            ScannerState::Scanning => "scanning",
            ScannerState::Match => "match",
        }
    }
}

/// Clasificación visual del status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusKind {
    Default,
    Success,
    Warning,
}

impl StatusKind {
    /// Clase CSS asociada
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusKind::Default => "qr-status-default",
            StatusKind::Success => "qr-status-success",
            StatusKind::Warning => "qr-status-warning",
        }
    }
}

/// Texto corto para el usuario + clasificación (distinto del estado interno)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStatus {
    pub text: String,
    pub kind: StatusKind,
}

impl ScanStatus {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn idle() -> Self {
        Self::new(STATUS_TEXT_IDLE, StatusKind::Default)
    }

    pub fn permission() -> Self {
        Self::new(STATUS_TEXT_PERMISSION, StatusKind::Default)
    }

    pub fn scanning() -> Self {
        Self::new(STATUS_TEXT_SCANNING, StatusKind::Default)
    }

    pub fn matched() -> Self {
        Self::new(STATUS_TEXT_MATCH, StatusKind::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, StatusKind::Warning)
    }

    /// Warning genérico ("ERROR")
    pub fn error() -> Self {
        Self::warning(STATUS_TEXT_ERROR)
    }

    pub fn is_warning(&self) -> bool {
        self.kind == StatusKind::Warning
    }
}

impl Default for ScanStatus {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_constructors() {
        assert_eq!(ScanStatus::idle().text, "IDLE");
        assert_eq!(ScanStatus::matched().kind, StatusKind::Success);
        assert!(ScanStatus::error().is_warning());
        assert_eq!(ScanStatus::warning("No Cameras").text, "No Cameras");
    }
}
