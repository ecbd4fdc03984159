use futures::future::LocalBoxFuture;
use crate::dom::get_element_by_id;
use crate::engine::web::Html5QrcodeEngine;
use crate::views::dom_surface::DomScannerSurface;
use crate::views::ScanRegion;
use super::ScannerHost;

/// Host del navegador: DOM + html5-qrcode + spawn_local
#[derive(Clone, Copy, Debug, Default)]
pub struct WebHost;

impl ScannerHost for WebHost {
    type Engine = Html5QrcodeEngine;
    type Surface = DomScannerSurface;

    fn resolve_mount(&self, mount_id: &str) -> Option<DomScannerSurface> {
        get_element_by_id(mount_id).map(|element| DomScannerSurface::new(mount_id, element))
    }

    fn create_engine(&self, region: &ScanRegion, verbose: bool) -> Html5QrcodeEngine {
        Html5QrcodeEngine::new(region.as_str(), verbose)
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}
