#![cfg(target_arch = "wasm32")]
#![deny(unsafe_code)]
//! Browser entry points for the glbook demos.
//!
//! Each demo looks up a canvas, acquires a WebGL 1 context, builds its GPU
//! resources, starts its image downloads and hands control to the
//! animation-frame loop.

mod dom;
mod frame_loop;
mod images;

use std::rc::Rc;

use glbook_core::render::CubeRenderer;
use glbook_core::{Demo, DemoError, DemoKind};
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// DOM id of the canvas the demo pages provide.
pub const CANVAS_ID: &str = "glCanvas";

const NO_WEBGL_MESSAGE: &str =
    "Unable to initialize WebGL. Your browser or machine may not support it.";

fn to_js(e: DemoError) -> JsValue {
    log::error!("{e}");
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second module instance on the page already installed a logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Names accepted by [`start_demo`].
#[wasm_bindgen]
pub fn demo_names() -> Vec<String> {
    DemoKind::list_demos()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Starts demo `name` on the canvas with id `canvas_id`.
///
/// `options_json` is an optional JSON object (`asset_root`, `target_size`,
/// `spin`); pass an empty string for defaults. If the browser has no WebGL
/// an alert is shown and the call returns without error.
#[wasm_bindgen]
pub fn start_demo(name: &str, canvas_id: &str, options_json: &str) -> Result<(), JsValue> {
    let params: Value = if options_json.trim().is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(options_json)
            .map_err(|e| JsValue::from_str(&format!("invalid options JSON: {e}")))?
    };
    let demo = Demo::from_name(name, &params).map_err(to_js)?;

    let canvas = dom::find_canvas(canvas_id)?;
    let Some(gl) = dom::webgl_context(&canvas) else {
        dom::alert(NO_WEBGL_MESSAGE);
        return Ok(());
    };
    let gl = Rc::new(gl);

    let renderer = CubeRenderer::new(&gl, &demo).map_err(to_js)?;
    for (index, url) in demo.image_urls().iter().enumerate() {
        if let Some(texture) = renderer.image_texture(index) {
            images::load_image_texture(gl.clone(), texture, url)?;
        }
    }

    log::info!("starting {} on #{canvas_id}", demo.kind().name());
    frame_loop::run(gl, canvas, demo, renderer)
}

#[wasm_bindgen]
pub fn start_animated_cube() -> Result<(), JsValue> {
    start_demo("animated-cube", CANVAS_ID, "")
}

#[wasm_bindgen]
pub fn start_multi_texture() -> Result<(), JsValue> {
    start_demo("multi-texture", CANVAS_ID, "")
}

#[wasm_bindgen]
pub fn start_render_to_texture() -> Result<(), JsValue> {
    start_demo("render-to-texture", CANVAS_ID, "")
}
