use serde::{Deserialize, Serialize};

/// Cámara devuelta por la enumeración. El id es opaco para el controlador
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraDescriptor {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

impl CameraDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_entry_with_extra_fields() {
        // getCameras() entries carry more than {id, label}
        let json = r#"[{"id":"cam-1","label":"Back","kind":"videoinput"},{"id":"cam-2"}]"#;
        let cameras: Vec<CameraDescriptor> = serde_json::from_str(json).unwrap();

        assert_eq!(cameras[0], CameraDescriptor::new("cam-1", "Back"));
        assert_eq!(cameras[1].label, "");
    }
}
