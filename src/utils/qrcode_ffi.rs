// ============================================================================
// HTML5-QRCODE FFI - Foreign Function Interface para JavaScript
// ============================================================================
// Bindings a la clase Html5Qrcode - Sin estado, sin lógica
// ============================================================================

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Instancia de Html5Qrcode ligada a una región del DOM
    pub type Html5Qrcode;

    #[wasm_bindgen(constructor)]
    pub fn new(element_id: &str, verbose: bool) -> Html5Qrcode;

    /// Promise<Array<{id, label}>>
    #[wasm_bindgen(static_method_of = Html5Qrcode, js_name = getCameras)]
    pub fn get_cameras() -> js_sys::Promise;

    /// Promise que resuelve cuando el loop de captura está activo
    #[wasm_bindgen(method)]
    pub fn start(
        this: &Html5Qrcode,
        camera_id: &str,
        config: &JsValue,
        on_success: &js_sys::Function,
        on_error: &js_sys::Function,
    ) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    pub fn stop(this: &Html5Qrcode) -> js_sys::Promise;

    #[wasm_bindgen(method)]
    pub fn clear(this: &Html5Qrcode);

    #[wasm_bindgen(method, js_name = scanFile)]
    pub fn scan_file(this: &Html5Qrcode, file: &web_sys::File, show_image: bool) -> js_sys::Promise;

    #[wasm_bindgen(method, getter = _isScanning)]
    pub fn is_scanning(this: &Html5Qrcode) -> bool;
}

/// Serializador para objetos que html5-qrcode lee como objetos planos
/// (serde_wasm_bindgen por defecto produce `Map`)
pub fn plain_serializer() -> serde_wasm_bindgen::Serializer {
    serde_wasm_bindgen::Serializer::json_compatible()
}

/// Helper: mensaje legible de un error JS (string, Error o cualquier otro valor)
pub fn js_error_message(error: &JsValue) -> String {
    if let Some(text) = error.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(error, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{:?}", error)
}
