//! Asynchronous image loading into pre-created textures.

use std::rc::Rc;

use glbook_core::render::apply_image_sampling;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlImageElement;

/// Starts downloading `url`; once it arrives its pixels replace the
/// placeholder in `texture`.
pub fn load_image_texture(
    gl: Rc<glow::Context>,
    texture: glow::Texture,
    url: &str,
) -> Result<(), JsValue> {
    let image = Rc::new(HtmlImageElement::new()?);

    let onload = {
        let image = image.clone();
        let url = url.to_owned();
        Closure::<dyn FnMut()>::new(move || {
            let (width, height) = (image.natural_width(), image.natural_height());
            match upload(&gl, texture, &image) {
                Ok(()) => {
                    let sampling = apply_image_sampling(&gl, width, height);
                    unbind(&gl);
                    log::info!("loaded {url} ({width}x{height}, {sampling:?})");
                }
                Err(e) => log::error!("failed to upload {url}: {e:?}"),
            }
        })
    };
    let onerror = {
        let url = url.to_owned();
        Closure::<dyn FnMut()>::new(move || log::error!("failed to load image {url}"))
    };

    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    // The element keeps the callbacks for the page's lifetime.
    onload.forget();
    onerror.forget();

    image.set_src(url);
    log::debug!("requested image {url}");
    Ok(())
}

/// Uploads `image` into `texture`, leaving it bound for sampling setup.
#[allow(unsafe_code)]
fn upload(
    gl: &glow::Context,
    texture: glow::Texture,
    image: &HtmlImageElement,
) -> Result<(), JsValue> {
    use glow::HasContext;

    if image.natural_width() == 0 || image.natural_height() == 0 {
        return Err(JsValue::from_str("image has no pixels"));
    }

    // SAFETY: texture was created on this context and the image element
    // has finished loading.
    unsafe {
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_image_2d_with_html_image(
            glow::TEXTURE_2D,
            0,
            glow::RGBA as i32,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            image,
        );
    }
    Ok(())
}

#[allow(unsafe_code)]
fn unbind(gl: &glow::Context) {
    use glow::HasContext;

    // SAFETY: unbinding is always valid.
    unsafe { gl.bind_texture(glow::TEXTURE_2D, None) };
}
