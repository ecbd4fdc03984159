use serde::{Deserialize, Serialize};
use crate::error::ScannerError;

/// Tamaño de la región de escaneo (el resto del video queda sombreado)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanBox {
    /// Cuadrado de N píxeles de lado
    Square(u32),
    /// Rectángulo arbitrario
    Region { width: u32, height: u32 },
}

impl ScanBox {
    fn validate(&self) -> Result<(), ScannerError> {
        match *self {
            ScanBox::Square(0) => Err(ScannerError::Config("scanBoxSize must be > 0".to_string())),
            ScanBox::Region { width, height } if width == 0 || height == 0 => {
                Err(ScannerError::Config("scan region sides must be > 0".to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// Configuración del scanner tal como la entrega la aplicación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerConfig {
    #[serde(alias = "fps", default = "default_frame_rate")]
    pub frame_rate: u32,
    #[serde(alias = "qrbox", default = "default_scan_box")]
    pub scan_box_size: ScanBox,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub disable_flip: bool,
    #[serde(default = "default_true")]
    pub enable_file_scan: bool,
    /// Intervalo mínimo entre errores de frame reenviados al llamador.
    /// None = se reenvían todos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miss_report_interval_ms: Option<u32>,
}

fn default_frame_rate() -> u32 {
    DEFAULTS.frame_rate
}

fn default_scan_box() -> ScanBox {
    ScanBox::Square(DEFAULTS.scan_box_size)
}

fn default_true() -> bool {
    true
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            scan_box_size: default_scan_box(),
            aspect_ratio: None,
            disable_flip: false,
            enable_file_scan: true,
            miss_report_interval_ms: None,
        }
    }
}

impl ScannerConfig {
    /// Parsear desde JSON (objeto de configuración de la aplicación)
    pub fn from_json(json: &str) -> Result<Self, ScannerError> {
        let config: ScannerConfig = serde_json::from_str(json)
            .map_err(|e| ScannerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Verificar invariantes de la configuración
    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.frame_rate == 0 {
            return Err(ScannerError::Config("frameRate must be > 0".to_string()));
        }
        self.scan_box_size.validate()?;
        if let Some(ratio) = self.aspect_ratio {
            if ratio.is_nan() || ratio <= 0.0 {
                return Err(ScannerError::Config("aspectRatio must be > 0".to_string()));
            }
        }
        Ok(())
    }

    /// Subconjunto que se envía al motor de decodificación
    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            frame_rate: self.frame_rate,
            scan_box_size: self.scan_box_size,
            aspect_ratio: self.aspect_ratio,
            disable_flip: self.disable_flip,
        }
    }
}

/// Parámetros de captura entregados a startCapture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    pub frame_rate: u32,
    pub scan_box_size: ScanBox,
    pub aspect_ratio: Option<f64>,
    pub disable_flip: bool,
}

impl CaptureConfig {
    /// Objeto de configuración en el formato de html5-qrcode
    pub fn to_engine_json(&self) -> serde_json::Value {
        let qrbox = match self.scan_box_size {
            ScanBox::Square(size) => serde_json::json!(size),
            ScanBox::Region { width, height } => serde_json::json!({ "width": width, "height": height }),
        };
        let mut value = serde_json::json!({
            "fps": self.frame_rate,
            "qrbox": qrbox,
        });
        if let Some(ratio) = self.aspect_ratio {
            value["aspectRatio"] = serde_json::json!(ratio);
        }
        if self.disable_flip {
            value["disableFlip"] = serde_json::json!(true);
        }
        value
    }
}

/// Valores por defecto configurables en tiempo de compilación (.env vía build.rs)
#[derive(Debug, Clone)]
pub struct ScannerDefaults {
    pub frame_rate: u32,
    pub scan_box_size: u32,
    pub verbose: bool,
}

impl ScannerDefaults {
    /// Carga los valores desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self {
            frame_rate: option_env!("SCANNER_DEFAULT_FPS")
                .and_then(|v| v.parse().ok())
                .filter(|fps| *fps > 0)
                .unwrap_or(10),
            scan_box_size: option_env!("SCANNER_DEFAULT_QRBOX")
                .and_then(|v| v.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(250),
            verbose: option_env!("SCANNER_VERBOSE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

// Configuración global estática (solo lectura)
lazy_static::lazy_static! {
    pub static ref DEFAULTS: ScannerDefaults = ScannerDefaults::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_ten_fps_250_box() {
        let config = ScannerConfig::default();
        assert_eq!(config.frame_rate, 10);
        assert_eq!(config.scan_box_size, ScanBox::Square(250));
        assert!(config.enable_file_scan);
    }

    #[test]
    fn test_from_json_accepts_html5_qrcode_keys() {
        let config = ScannerConfig::from_json(r#"{"fps": 2, "qrbox": 300, "disableFlip": true}"#).unwrap();
        assert_eq!(config.frame_rate, 2);
        assert_eq!(config.scan_box_size, ScanBox::Square(300));
        assert!(config.disable_flip);
        assert!(config.enable_file_scan);
    }

    #[test]
    fn test_from_json_region_and_file_scan_flag() {
        let config = ScannerConfig::from_json(
            r#"{"frameRate": 5, "scanBoxSize": {"width": 300, "height": 150}, "enableFileScan": false}"#,
        ).unwrap();
        assert_eq!(config.scan_box_size, ScanBox::Region { width: 300, height: 150 });
        assert!(!config.enable_file_scan);
    }

    #[test]
    fn test_validate_rejects_zero_fps() {
        let result = ScannerConfig::from_json(r#"{"fps": 0}"#);
        assert!(matches!(result, Err(ScannerError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_aspect_ratio() {
        let config = ScannerConfig { aspect_ratio: Some(-1.0), ..ScannerConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_engine_json_shape() {
        let config = ScannerConfig {
            aspect_ratio: Some(1.777),
            ..ScannerConfig::default()
        };
        let json = config.capture_config().to_engine_json();
        assert_eq!(json["fps"], 10);
        assert_eq!(json["qrbox"], 250);
        assert_eq!(json["aspectRatio"], 1.777);
        assert!(json.get("disableFlip").is_none());
    }
}
