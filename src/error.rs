// ============================================================================
// ERRORES DEL SCANNER
// ============================================================================
// Solo ElementNotFound se propaga al llamador en la construcción; el resto se
// intercepta en el ViewModel y se convierte en cambios de estado/status
// ============================================================================

/// Error del scanner
#[derive(Debug, Clone, PartialEq)]
pub enum ScannerError {
    /// El elemento de montaje no existe (fatal, solo en la construcción)
    ElementNotFound(String),
    /// render() llamado dos veces sin clear() entre medio
    AlreadyRendered,
    /// Operación que requiere render() previo
    NotRendered,
    /// Fallo al enumerar cámaras (permiso denegado o sin hardware)
    Enumeration(String),
    /// Fallo al abrir la cámara
    CaptureStart(String),
    /// Fallo al liberar la cámara
    CaptureStop(String),
    /// Fallo de decodificación (frame o archivo)
    Decode(String),
    /// Configuración inválida
    Config(String),
    /// Fallo construyendo la UI
    Ui(String),
}

impl std::fmt::Display for ScannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScannerError::ElementNotFound(id) => write!(f, "HTML Element with id={} not found", id),
            ScannerError::AlreadyRendered => write!(f, "Scanner is already rendered, call clear() first"),
            ScannerError::NotRendered => write!(f, "Scanner is not rendered"),
            ScannerError::Enumeration(msg) => write!(f, "Unable to enumerate cameras: {}", msg),
            ScannerError::CaptureStart(msg) => write!(f, "Unable to start capture: {}", msg),
            ScannerError::CaptureStop(msg) => write!(f, "Unable to stop capture: {}", msg),
            ScannerError::Decode(msg) => write!(f, "Decode error: {}", msg),
            ScannerError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            ScannerError::Ui(msg) => write!(f, "UI error: {}", msg),
        }
    }
}

impl std::error::Error for ScannerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_element_not_found() {
        let err = ScannerError::ElementNotFound("reader".to_string());
        assert_eq!(err.to_string(), "HTML Element with id=reader not found");
    }
}
