//! Executes a [`FramePlan`] against a GL context.

use super::buffers::CubeBuffers;
use super::program::CubeProgram;
use super::target::RenderTarget;
use super::texture::{create_pattern_texture, create_placeholder_texture};
use crate::demo::Demo;
use crate::error::DemoError;
use crate::frame::{DepthFunc, DrawPass, FramePlan, PassTarget, TextureSlot};
use crate::mesh::{CubeMesh, NORMAL_OFFSET, POSITION_OFFSET, TEX_COORD_OFFSET, VERTEX_STRIDE};

/// GPU state for one demo: program, cube buffers, and every texture its
/// passes can sample.
pub struct CubeRenderer {
    program: CubeProgram,
    buffers: CubeBuffers,
    images: Vec<glow::Texture>,
    pattern: Option<glow::Texture>,
    target: Option<RenderTarget>,
}

impl CubeRenderer {
    /// Builds everything `demo` draws with. Image textures start as the
    /// placeholder pixel; callers upload the real image when it loads.
    ///
    /// # Errors
    ///
    /// Propagates shader, buffer, texture and framebuffer failures.
    pub fn new(gl: &glow::Context, demo: &Demo) -> Result<Self, DemoError> {
        let kind = demo.kind();
        let program = CubeProgram::new(gl, kind.fragment_shader())?;
        let buffers = CubeBuffers::new(gl, &CubeMesh::new())?;

        let images = kind
            .image_paths()
            .iter()
            .map(|_| create_placeholder_texture(gl))
            .collect::<Result<Vec<_>, _>>()?;

        let (pattern, target) = match demo.target_size() {
            Some(size) => (
                Some(create_pattern_texture(gl)?),
                Some(RenderTarget::new(gl, size)?),
            ),
            None => (None, None),
        };

        log::info!(
            "{} ready: {} image texture(s), off-screen target: {}",
            kind.name(),
            images.len(),
            target.is_some()
        );

        Ok(Self {
            program,
            buffers,
            images,
            pattern,
            target,
        })
    }

    /// The texture that image `index` should be uploaded into.
    pub fn image_texture(&self, index: usize) -> Option<glow::Texture> {
        self.images.get(index).copied()
    }

    /// Draws every pass of `plan` in order.
    pub fn draw_frame(&self, gl: &glow::Context, plan: &FramePlan) -> Result<(), DemoError> {
        plan.passes()
            .iter()
            .try_for_each(|pass| self.draw_pass(gl, pass))
    }

    fn resolve(&self, slot: TextureSlot) -> Result<glow::Texture, DemoError> {
        let texture = match slot {
            TextureSlot::Image(i) => self.images.get(i).copied(),
            TextureSlot::Pattern => self.pattern,
            TextureSlot::Offscreen => self.target.as_ref().map(RenderTarget::texture),
        };
        texture.ok_or_else(|| DemoError::Gl(format!("no texture for {slot:?}")))
    }

    #[allow(unsafe_code)]
    fn draw_pass(&self, gl: &glow::Context, pass: &DrawPass) -> Result<(), DemoError> {
        use glow::HasContext;

        let textures = pass
            .textures
            .iter()
            .map(|&slot| self.resolve(slot))
            .collect::<Result<Vec<_>, _>>()?;

        // SAFETY: glow exposes raw GL calls as unsafe. Every handle used
        // below was created by this renderer on the same context.
        unsafe {
            match pass.target {
                PassTarget::Offscreen => {
                    let target = self
                        .target
                        .as_ref()
                        .ok_or_else(|| DemoError::Gl("demo has no off-screen target".into()))?;
                    target.bind(gl);
                }
                PassTarget::Canvas => {
                    gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                    gl.viewport(0, 0, pass.viewport.width as i32, pass.viewport.height as i32);
                }
            }

            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(match pass.depth_func {
                DepthFunc::Less => glow::LESS,
                DepthFunc::LessEqual => glow::LEQUAL,
            });
            if pass.cull_back_faces {
                gl.enable(glow::CULL_FACE);
            } else {
                gl.disable(glow::CULL_FACE);
            }

            let [r, g, b, a] = pass.clear_color;
            gl.clear_color(r, g, b, a);
            gl.clear_depth_f32(1.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.use_program(Some(self.program.program()));

            let attribs = self.program.attribs();
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.buffers.vertices()));
            for (location, size, offset) in [
                (attribs.position, 3, POSITION_OFFSET),
                (attribs.normal, 3, NORMAL_OFFSET),
                (attribs.tex_coord, 2, TEX_COORD_OFFSET),
            ] {
                gl.vertex_attrib_pointer_f32(
                    location,
                    size,
                    glow::FLOAT,
                    false,
                    VERTEX_STRIDE,
                    offset,
                );
                gl.enable_vertex_attrib_array(location);
            }
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.buffers.indices()));

            let uniforms = self.program.uniforms();
            let [projection, model_view, normal] = pass.transforms.to_cols_arrays();
            gl.uniform_matrix_4_f32_slice(uniforms.projection.as_ref(), false, &projection);
            gl.uniform_matrix_4_f32_slice(uniforms.model_view.as_ref(), false, &model_view);
            gl.uniform_matrix_4_f32_slice(uniforms.normal.as_ref(), false, &normal);

            for (unit, texture) in textures.into_iter().enumerate() {
                gl.active_texture(glow::TEXTURE0 + unit as u32);
                gl.bind_texture(glow::TEXTURE_2D, Some(texture));
                if let Some(location) = uniforms.samplers.get(unit).and_then(Option::as_ref) {
                    gl.uniform_1_i32(Some(location), unit as i32);
                }
            }

            gl.draw_elements(
                glow::TRIANGLES,
                pass.index_count as i32,
                glow::UNSIGNED_SHORT,
                0,
            );
        }

        Ok(())
    }
}
