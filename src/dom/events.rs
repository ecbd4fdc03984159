// ============================================================================
// EVENT HANDLING - Listeners de la UI del scanner
// ============================================================================
// Cada listener devuelve un `Listener` que es dueño del closure de Rust.
// Al soltarlo se desregistra del elemento y el closure se libera
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, MouseEvent};

/// Listener registrado sobre un elemento
pub struct Listener {
    target: Element,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn register(target: &Element, event: &'static str, closure: Closure<dyn FnMut(Event)>) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("⚠️ [DOM] No se pudo quitar el listener {}: {:?}", self.event, e);
        }
    }
}

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, mut handler: F) -> Result<Listener, JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        if let Ok(e) = e.dyn_into::<MouseEvent>() {
            handler(e);
        }
    }) as Box<dyn FnMut(Event)>);
    Listener::register(element, "click", closure)
}

/// Listener de "change" en un input de tipo file: entrega el primer archivo
pub fn on_file_selected<F>(input: &Element, handler: F) -> Result<Listener, JsValue>
where
    F: Fn(web_sys::File) + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        let Some(input) = e
            .target()
            .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let file = input.files().and_then(|files| files.get(0));
        // Permitir volver a elegir el mismo archivo
        input.set_value("");
        if let Some(file) = file {
            handler(file);
        }
    }) as Box<dyn FnMut(Event)>);
    Listener::register(input, "change", closure)
}
