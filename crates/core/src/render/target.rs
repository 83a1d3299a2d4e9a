//! Off-screen render target: a framebuffer with one colour texture.

use super::texture::{create_texture, TextureConfig};
use crate::error::DemoError;

/// Framebuffer plus the RGBA8 texture attached as `COLOR_ATTACHMENT0`.
///
/// Created once per demo and drawn into every frame before its texture is
/// sampled by the canvas pass.
pub struct RenderTarget {
    fbo: glow::Framebuffer,
    texture: glow::Texture,
    size: u32,
}

impl RenderTarget {
    /// Creates a square target with a `size` x `size` colour texture and
    /// verifies framebuffer completeness.
    ///
    /// # Errors
    ///
    /// Returns `DemoError::InvalidDimensions` for size 0, `DemoError::Gl` if
    /// an object cannot be created, or `DemoError::IncompleteFramebuffer`.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, size: u32) -> Result<Self, DemoError> {
        use glow::HasContext;

        let texture = create_texture(gl, &TextureConfig::render_target(size), None)?;

        // SAFETY: glow exposes raw GL calls as unsafe. The texture handle is
        // live; both objects are deleted if the attachment is incomplete.
        unsafe {
            let fbo = match gl.create_framebuffer() {
                Ok(fbo) => fbo,
                Err(e) => {
                    gl.delete_texture(texture);
                    return Err(DemoError::Gl(e));
                }
            };

            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );
            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);

            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.delete_framebuffer(fbo);
                gl.delete_texture(texture);
                return Err(DemoError::IncompleteFramebuffer(status));
            }

            log::debug!("created {size}x{size} render target");
            Ok(Self { fbo, texture, size })
        }
    }

    /// Makes this target the draw destination and fits the viewport to it.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.fbo is a live framebuffer created in new().
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            gl.viewport(0, 0, self.size as i32, self.size as i32);
        }
    }

    /// The colour texture, for sampling in a later pass.
    pub fn texture(&self) -> glow::Texture {
        self.texture
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}
