use serde::{Deserialize, Serialize};

/// Origen de un resultado o error de escaneo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanSource {
    Camera,
    File,
}

/// Resultado decodificado entregado al callback de éxito
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanPayload {
    /// Texto decodificado
    pub text: String,
    /// Resultado estructurado del motor (formato, posición...), si lo hay
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub source: ScanSource,
}

impl ScanPayload {
    pub fn new(text: impl Into<String>, source: ScanSource) -> Self {
        Self {
            text: text.into(),
            details: None,
            source,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Error de decodificación entregado al callback de error (no fatal)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanError {
    pub message: String,
    pub source: ScanSource,
}

impl ScanError {
    pub fn new(message: impl Into<String>, source: ScanSource) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
