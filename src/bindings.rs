// ============================================================================
// BINDINGS JS - API exportada a la aplicación (wasm-bindgen)
// ============================================================================
//   const scanner = new QrScanner("reader", { fps: 10, qrbox: 250 }, true);
//   scanner.render(onStart, onStop, onSuccess, onError);
//   await scanner.clear();
// ============================================================================

use std::sync::Once;
use js_sys::{Function, Promise};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use crate::config::{ScannerConfig, DEFAULTS};
use crate::error::ScannerError;
use crate::platform::web::WebHost;
use crate::utils::qrcode_ffi;
use crate::viewmodels::{ScanCallbacks, ScannerViewModel};

static LOGGER: Once = Once::new();

/// Inicializar logging + panic hook (idempotente)
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(verbose: Option<bool>) {
    LOGGER.call_once(|| {
        console_error_panic_hook::set_once();
        let level = if verbose.unwrap_or(DEFAULTS.verbose) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        wasm_logger::init(wasm_logger::Config::new(level));
        log::info!("🚀 [SCANNER] Logging inicializado");
    });
}

/// Scanner QR montado sobre un elemento del DOM
#[wasm_bindgen]
pub struct QrScanner {
    vm: ScannerViewModel<WebHost>,
}

#[wasm_bindgen]
impl QrScanner {
    /// Falla si el elemento no existe o la configuración es inválida
    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str, config: JsValue, verbose: Option<bool>) -> Result<QrScanner, JsValue> {
        let config = parse_config(&config).map_err(to_js_error)?;
        let verbose = verbose.unwrap_or(DEFAULTS.verbose);
        let vm = ScannerViewModel::new(WebHost, element_id, config, verbose).map_err(to_js_error)?;
        Ok(QrScanner { vm })
    }

    pub fn render(
        &self,
        on_start: Option<Function>,
        on_stop: Option<Function>,
        on_success: Option<Function>,
        on_error: Option<Function>,
    ) -> Result<(), JsValue> {
        let mut callbacks = ScanCallbacks::new();
        if let Some(f) = on_start {
            callbacks = callbacks.on_start_requested(move || report(f.call0(&JsValue::NULL)));
        }
        if let Some(f) = on_stop {
            callbacks = callbacks.on_stop_requested(move || report(f.call0(&JsValue::NULL)));
        }
        if let Some(f) = on_success {
            callbacks = callbacks.on_success(move |payload| {
                let details = payload
                    .details
                    .as_ref()
                    .and_then(|d| d.serialize(&qrcode_ffi::plain_serializer()).ok())
                    .unwrap_or(JsValue::UNDEFINED);
                report(f.call2(&JsValue::NULL, &JsValue::from_str(&payload.text), &details));
            });
        }
        if let Some(f) = on_error {
            callbacks = callbacks.on_error(move |error| {
                report(f.call1(&JsValue::NULL, &JsValue::from_str(&error.message)));
            });
        }
        self.vm.render(callbacks).map_err(to_js_error)
    }

    pub fn start(&self) -> Promise {
        let vm = self.vm.clone();
        future_to_promise(async move {
            vm.start().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn stop(&self) -> Promise {
        let vm = self.vm.clone();
        future_to_promise(async move {
            vm.stop().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = switchCamera)]
    pub fn switch_camera(&self) -> Promise {
        let vm = self.vm.clone();
        future_to_promise(async move {
            vm.switch_camera().await;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(js_name = scanFile)]
    pub fn scan_file(&self, file: web_sys::File) -> Promise {
        let vm = self.vm.clone();
        future_to_promise(async move {
            vm.scan_file(file).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Promise que resuelve cuando la sesión quedó liberada
    pub fn clear(&self) -> Promise {
        let vm = self.vm.clone();
        future_to_promise(async move {
            vm.clear().await.map_err(to_js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.vm.state().as_str().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.vm.status().text
    }

    #[wasm_bindgen(getter, js_name = selectedCameraId)]
    pub fn selected_camera_id(&self) -> Option<String> {
        self.vm.selected_camera().map(|camera| camera.id)
    }
}

fn parse_config(config: &JsValue) -> Result<Option<ScannerConfig>, ScannerError> {
    if config.is_undefined() || config.is_null() {
        return Ok(None);
    }
    let config: ScannerConfig = serde_wasm_bindgen::from_value(config.clone())
        .map_err(|e| ScannerError::Config(e.to_string()))?;
    config.validate()?;
    Ok(Some(config))
}

fn to_js_error(error: ScannerError) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

// Las excepciones de los callbacks del llamador no se capturan en el flujo:
// solo quedan en el log
fn report(result: Result<JsValue, JsValue>) {
    if let Err(e) = result {
        log::error!("❌ [SCANNER] Callback lanzó una excepción: {}", qrcode_ffi::js_error_message(&e));
    }
}
