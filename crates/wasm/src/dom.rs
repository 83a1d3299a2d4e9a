//! Window, canvas and WebGL context lookup.

use glbook_core::CanvasSize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, WebGlRenderingContext, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Finds the `<canvas>` element with the given id.
pub fn find_canvas(id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{id}'")))?;
    element
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("element '{id}' is not a canvas")))
}

/// Requests a WebGL 1 context. `None` means the browser cannot provide one.
pub fn webgl_context(canvas: &HtmlCanvasElement) -> Option<glow::Context> {
    let context = canvas.get_context("webgl").ok().flatten()?;
    let webgl = context.dyn_into::<WebGlRenderingContext>().ok()?;
    Some(glow::Context::from_webgl1_context(webgl))
}

/// Drawing buffer and CSS client size of `canvas`.
pub fn canvas_size(canvas: &HtmlCanvasElement) -> CanvasSize {
    CanvasSize {
        width: canvas.width(),
        height: canvas.height(),
        client_width: canvas.client_width().max(0) as u32,
        client_height: canvas.client_height().max(0) as u32,
    }
}

/// Shows a blocking alert; failures are only logged.
pub fn alert(message: &str) {
    let shown = window().and_then(|w| w.alert_with_message(message));
    if shown.is_err() {
        log::error!("{message}");
    }
}
