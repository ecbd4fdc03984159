use std::cell::{Cell, RefCell};
use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use crate::config::CaptureConfig;
use crate::error::ScannerError;
use crate::models::{CameraDescriptor, ScanError, ScanPayload, ScanSource};
use crate::utils::qrcode_ffi::{self, Html5Qrcode};
use super::{CaptureSinks, DecodeEngine};

type ResultClosure = Closure<dyn FnMut(JsValue, JsValue)>;
type MissClosure = Closure<dyn FnMut(JsValue)>;

/// Motor de decodificación web usando html5-qrcode
pub struct Html5QrcodeEngine {
    inner: Html5Qrcode,
    scanning: Cell<bool>,
    // Closures vivos mientras el loop esté activo; se liberan en stop/release
    closures: RefCell<Option<(ResultClosure, MissClosure)>>,
}

impl Html5QrcodeEngine {
    pub fn new(region_id: &str, verbose: bool) -> Self {
        log::info!("📷 [ENGINE] Creando Html5Qrcode en #{}", region_id);
        Self {
            inner: Html5Qrcode::new(region_id, verbose),
            scanning: Cell::new(false),
            closures: RefCell::new(None),
        }
    }
}

#[async_trait(?Send)]
impl DecodeEngine for Html5QrcodeEngine {
    type Image = web_sys::File;

    async fn enumerate_cameras(&self) -> Result<Vec<CameraDescriptor>, ScannerError> {
        let value = JsFuture::from(Html5Qrcode::get_cameras())
            .await
            .map_err(|e| ScannerError::Enumeration(qrcode_ffi::js_error_message(&e)))?;

        if value.is_null() || value.is_undefined() {
            return Ok(Vec::new());
        }

        serde_wasm_bindgen::from_value(value)
            .map_err(|e| ScannerError::Enumeration(format!("Parse error: {}", e)))
    }

    async fn start_capture(
        &self,
        camera_id: &str,
        config: &CaptureConfig,
        sinks: CaptureSinks,
    ) -> Result<(), ScannerError> {
        let js_config = config
            .to_engine_json()
            .serialize(&qrcode_ffi::plain_serializer())
            .map_err(|e| ScannerError::CaptureStart(e.to_string()))?;

        let on_result = sinks.on_result.clone();
        let result_closure = Closure::wrap(Box::new(move |text: JsValue, result: JsValue| {
            let Some(text) = text.as_string() else {
                return;
            };
            let mut payload = ScanPayload::new(text, ScanSource::Camera);
            if let Ok(details) = serde_wasm_bindgen::from_value::<serde_json::Value>(result) {
                payload = payload.with_details(details);
            }
            on_result(payload);
        }) as Box<dyn FnMut(JsValue, JsValue)>);

        let on_miss = sinks.on_miss.clone();
        let miss_closure = Closure::wrap(Box::new(move |error: JsValue| {
            on_miss(ScanError::new(qrcode_ffi::js_error_message(&error), ScanSource::Camera));
        }) as Box<dyn FnMut(JsValue)>);

        let promise = self.inner.start(
            camera_id,
            &js_config,
            result_closure.as_ref().unchecked_ref(),
            miss_closure.as_ref().unchecked_ref(),
        );
        *self.closures.borrow_mut() = Some((result_closure, miss_closure));

        match JsFuture::from(promise).await {
            Ok(_) => {
                self.scanning.set(true);
                Ok(())
            }
            Err(e) => {
                self.closures.borrow_mut().take();
                Err(ScannerError::CaptureStart(qrcode_ffi::js_error_message(&e)))
            }
        }
    }

    async fn stop_capture(&self) -> Result<(), ScannerError> {
        // html5-qrcode rechaza stop() si no está escaneando
        if !self.is_scanning() {
            return Ok(());
        }
        JsFuture::from(self.inner.stop())
            .await
            .map_err(|e| ScannerError::CaptureStop(qrcode_ffi::js_error_message(&e)))?;
        self.scanning.set(false);
        self.closures.borrow_mut().take();
        Ok(())
    }

    async fn decode_single_image(&self, image: web_sys::File) -> Result<ScanPayload, ScannerError> {
        let value = JsFuture::from(self.inner.scan_file(&image, true))
            .await
            .map_err(|e| ScannerError::Decode(qrcode_ffi::js_error_message(&e)))?;
        let text = value
            .as_string()
            .ok_or_else(|| ScannerError::Decode("Decoded value is not a string".to_string()))?;
        Ok(ScanPayload::new(text, ScanSource::File))
    }

    fn is_scanning(&self) -> bool {
        self.scanning.get() || self.inner.is_scanning()
    }

    fn release(&self) {
        self.inner.clear();
        self.closures.borrow_mut().take();
        self.scanning.set(false);
    }
}
