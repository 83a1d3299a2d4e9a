//! The `requestAnimationFrame` render loop.

use std::cell::RefCell;
use std::rc::Rc;

use glbook_core::render::CubeRenderer;
use glbook_core::{Demo, FrameClock};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

use crate::dom::{canvas_size, window};

type FrameCallback = Closure<dyn FnMut(f64)>;

fn request_animation_frame(callback: &FrameCallback) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Draws `demo` every animation frame until a draw fails.
///
/// Each frame ticks the clock, plans the passes at the current angle,
/// draws them, and only then advances the angle.
pub fn run(
    gl: Rc<glow::Context>,
    canvas: HtmlCanvasElement,
    demo: Demo,
    renderer: CubeRenderer,
) -> Result<(), JsValue> {
    let mut clock = FrameClock::new();
    let mut rotation = demo.rotation();

    // The closure re-schedules itself, so it needs a handle to its own
    // slot; the slot is filled right after the closure is built.
    let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let own_slot = slot.clone();

    let callback = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
        let delta = clock.tick(now);
        let angle = rotation.advance(delta);
        let plan = demo.plan(angle, canvas_size(&canvas));

        if let Err(e) = renderer.draw_frame(&gl, &plan) {
            log::error!("{} stopped: {e}", demo.kind().name());
            return;
        }

        if let Some(callback) = own_slot.borrow().as_ref() {
            if let Err(e) = request_animation_frame(callback) {
                log::error!("could not schedule next frame: {e:?}");
            }
        }
    });

    request_animation_frame(&callback)?;
    *slot.borrow_mut() = Some(callback);
    Ok(())
}
