// ============================================================================
// DOM SURFACE - UI del scanner construida en Rust puro
// ============================================================================
// Layout:
//   #<mount>__scan_region      video / imagen de reposo
//   #<mount>__dashboard        start, archivo, cámara, status
// ============================================================================

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{self, append_child, on_click, on_file_selected, set_inner_html, set_visible, ElementBuilder, Listener};
use crate::error::ScannerError;
use crate::models::ScanStatus;
use crate::utils::constants::{LABEL_FILE_SCAN, LABEL_START_SCAN, LABEL_STOP_SCAN, LABEL_SWITCH_CAMERA};
use super::{ScanRegion, ScannerActions, ScannerSurface};

struct Layout {
    scan_region: Element,
    camera_region: Element,
    start_button: Element,
    status_span: Element,
    camera_actions: Option<Element>,
    actions: ScannerActions<web_sys::File>,
    // Se sueltan en reset(): desregistra y libera los closures
    listeners: Vec<Listener>,
}

/// Superficie DOM montada sobre un elemento existente
pub struct DomScannerSurface {
    mount_id: String,
    mount: Element,
    // Contenido del contenedor antes de render(), se restaura en reset()
    original_html: RefCell<Option<String>>,
    layout: RefCell<Option<Layout>>,
}

impl DomScannerSurface {
    pub fn new(mount_id: &str, mount: Element) -> Self {
        Self {
            mount_id: mount_id.to_string(),
            mount,
            original_html: RefCell::new(None),
            layout: RefCell::new(None),
        }
    }

    fn child_id(&self, suffix: &str) -> String {
        format!("{}__{}", self.mount_id, suffix)
    }

    fn build_layout(&self, actions: ScannerActions<web_sys::File>) -> Result<(ScanRegion, Layout), JsValue> {
        dom::set_style(&self.mount, "position", "relative")?;
        dom::set_style(&self.mount, "padding", "0px")?;

        let region_id = self.child_id("scan_region");
        let scan_region = ElementBuilder::new("div")?
            .id(&region_id)?
            .style("width", "100%")?
            .style("min-height", "100px")?
            .style("text-align", "center")?
            .build();
        append_child(&self.mount, &scan_region)?;

        let dashboard = ElementBuilder::new("div")?
            .id(&self.child_id("dashboard"))?
            .style("width", "100%")?
            .build();
        let section = ElementBuilder::new("div")?
            .id(&self.child_id("dashboard_section"))?
            .style("width", "100%")?
            .style("text-align", "left")?
            .build();
        let camera_region = ElementBuilder::new("div")?
            .id(&self.child_id("dashboard_section_csr"))?
            .style("text-align", "center")?
            .build();

        let mut listeners = Vec::new();

        // Botón de inicio
        let start_button = ElementBuilder::new("button")?
            .id(&self.child_id("start_scan"))?
            .class("qr-scan-button")
            .text(LABEL_START_SCAN)
            .build();
        {
            let on_start = actions.on_start.clone();
            listeners.push(on_click(&start_button, move |_| on_start())?);
        }
        append_child(&camera_region, &start_button)?;

        // Escaneo desde archivo (opcional)
        if let Some(on_file) = actions.on_file.clone() {
            let file_input = ElementBuilder::new("input")?
                .id(&self.child_id("filescan_input"))?
                .attr("type", "file")?
                .attr("accept", "image/*")?
                .style("width", "0px")?
                .style("opacity", "0")?
                .build();
            listeners.push(on_file_selected(&file_input, move |file| on_file(file))?);

            let file_button = ElementBuilder::new("button")?
                .class("qr-scan-button")
                .text(LABEL_FILE_SCAN)
                .build();
            {
                let file_input = file_input.clone();
                listeners.push(on_click(&file_button, move |_| {
                    if let Err(e) = dom::click(&file_input) {
                        log::warn!("⚠️ [SCANNER] No se pudo abrir el selector: {:?}", e);
                    }
                })?);
            }
            append_child(&camera_region, &file_input)?;
            append_child(&camera_region, &file_button)?;
        }

        let status_span = ElementBuilder::new("div")?
            .id(&self.child_id("status_span"))?
            .style("text-align", "center")?
            .build();

        append_child(&section, &camera_region)?;
        append_child(&section, &status_span)?;
        append_child(&dashboard, &section)?;
        append_child(&self.mount, &dashboard)?;

        let layout = Layout {
            scan_region,
            camera_region,
            start_button,
            status_span,
            camera_actions: None,
            actions,
            listeners,
        };
        Ok((ScanRegion::new(region_id), layout))
    }

    fn build_camera_actions(&self, layout: &mut Layout, can_switch: bool) -> Result<Element, JsValue> {
        let container = ElementBuilder::new("span")?
            .id(&self.child_id("camera_action_container"))?
            .build();

        if can_switch {
            let switch_button = ElementBuilder::new("button")?
                .id(&self.child_id("switch_camera"))?
                .class("qr-scan-button")
                .text(LABEL_SWITCH_CAMERA)
                .build();
            let on_switch = layout.actions.on_switch.clone();
            layout.listeners.push(on_click(&switch_button, move |_| on_switch())?);
            append_child(&container, &switch_button)?;
        }

        let stop_button = ElementBuilder::new("button")?
            .id(&self.child_id("stop_scan"))?
            .class("qr-scan-button")
            .text(LABEL_STOP_SCAN)
            .build();
        let on_stop = layout.actions.on_stop.clone();
        layout.listeners.push(on_click(&stop_button, move |_| on_stop())?);
        append_child(&container, &stop_button)?;

        append_child(&layout.camera_region, &container)?;
        Ok(container)
    }
}

impl ScannerSurface for DomScannerSurface {
    type Image = web_sys::File;

    fn render_layout(&self, actions: ScannerActions<web_sys::File>) -> Result<ScanRegion, ScannerError> {
        *self.original_html.borrow_mut() = Some(self.mount.inner_html());
        set_inner_html(&self.mount, "");

        let (region, layout) = self
            .build_layout(actions)
            .map_err(|e| ScannerError::Ui(format!("{:?}", e)))?;
        *self.layout.borrow_mut() = Some(layout);
        self.show_idle_placeholder();
        Ok(region)
    }

    fn render_camera_actions(&self, can_switch: bool) {
        let mut layout = self.layout.borrow_mut();
        let Some(layout) = layout.as_mut() else {
            return;
        };
        if layout.camera_actions.is_some() {
            return;
        }
        match self.build_camera_actions(layout, can_switch) {
            Ok(container) => layout.camera_actions = Some(container),
            Err(e) => log::error!("❌ [SCANNER] Error creando controles de cámara: {:?}", e),
        }
    }

    fn set_start_visible(&self, visible: bool) {
        if let Some(layout) = self.layout.borrow().as_ref() {
            warn_on_error("botón de inicio", set_visible(&layout.start_button, visible));
        }
    }

    fn set_camera_actions_visible(&self, visible: bool) {
        if let Some(container) = self.layout.borrow().as_ref().and_then(|l| l.camera_actions.as_ref()) {
            warn_on_error("controles de cámara", set_visible(container, visible));
        }
    }

    fn show_idle_placeholder(&self) {
        let layout = self.layout.borrow();
        let Some(layout) = layout.as_ref() else {
            return;
        };
        set_inner_html(&layout.scan_region, "<br>");
        let placeholder = ElementBuilder::new("div")
            .and_then(|b| b.style("opacity", "0.3"))
            .and_then(|b| b.style("font-size", "48px"))
            .map(|b| b.text("📷").build());
        match placeholder {
            Ok(placeholder) => {
                warn_on_error("placeholder", append_child(&layout.scan_region, &placeholder));
            }
            Err(e) => log::warn!("⚠️ [SCANNER] Error creando placeholder: {:?}", e),
        }
    }

    fn set_status(&self, status: &ScanStatus) {
        if let Some(layout) = self.layout.borrow().as_ref() {
            layout.status_span.set_text_content(Some(&status.text));
            layout.status_span.set_class_name(status.kind.css_class());
        }
    }

    fn reset(&self) {
        self.layout.borrow_mut().take();
        let original = self.original_html.borrow_mut().take().unwrap_or_default();
        set_inner_html(&self.mount, &original);
        warn_on_error("contenedor", dom::set_style(&self.mount, "border", "none"));
    }
}

fn warn_on_error(target: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("⚠️ [SCANNER] Error actualizando {}: {:?}", target, e);
    }
}
