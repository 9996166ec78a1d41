// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Para listeners en elementos del DOM: cuando el elemento se destruye
//   (p.ej. con set_inner_html("")), el navegador limpia los listeners
//   asociados, por lo que closure.forget() es seguro.
// - Para listeners globales (window/document): registrarlos UNA sola vez.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

/// Helper para crear click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // closure.forget() es necesario para mantener el closure vivo en Rust WASM
    closure.forget();
    Ok(())
}

/// Helper para interceptar submit de formularios (equivale a preventDefault + handler)
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        handler(event);
    }) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
