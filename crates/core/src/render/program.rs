//! The linked cube program and the locations it exposes.

use super::shader::link_program;
use crate::error::DemoError;
use crate::shaders::{
    ATTR_NORMAL, ATTR_POSITION, ATTR_TEX_COORD, CUBE_VERTEX_SHADER, SAMPLERS, UNIFORM_MODEL_VIEW,
    UNIFORM_NORMAL, UNIFORM_PROJECTION,
};

/// Attribute slots of the cube vertex shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttribLocations {
    pub position: u32,
    pub normal: u32,
    pub tex_coord: u32,
}

/// Uniform slots. A sampler the fragment shader does not declare (or the
/// driver optimized away) is `None` and is skipped when binding.
#[derive(Debug, Clone)]
pub struct UniformLocations {
    pub projection: Option<glow::UniformLocation>,
    pub model_view: Option<glow::UniformLocation>,
    pub normal: Option<glow::UniformLocation>,
    pub samplers: Vec<Option<glow::UniformLocation>>,
}

/// Program plus the locations looked up right after linking.
pub struct CubeProgram {
    program: glow::Program,
    attribs: AttribLocations,
    uniforms: UniformLocations,
}

impl CubeProgram {
    /// Links the shared vertex shader with `fragment_src` and looks up
    /// every attribute and uniform the draw pass binds.
    ///
    /// # Errors
    ///
    /// Propagates compile/link failures and returns
    /// `DemoError::MissingAttribute` if the program lacks a vertex input.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, fragment_src: &str) -> Result<Self, DemoError> {
        use glow::HasContext;

        let program = link_program(gl, CUBE_VERTEX_SHADER, fragment_src)?;

        // SAFETY: program is a live, linked handle.
        unsafe {
            let attrib = |name: &'static str| {
                gl.get_attrib_location(program, name)
                    .ok_or(DemoError::MissingAttribute(name))
            };
            let found = (
                attrib(ATTR_POSITION),
                attrib(ATTR_NORMAL),
                attrib(ATTR_TEX_COORD),
            );
            let attribs = match found {
                (Ok(position), Ok(normal), Ok(tex_coord)) => AttribLocations {
                    position,
                    normal,
                    tex_coord,
                },
                (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                    gl.delete_program(program);
                    return Err(e);
                }
            };

            let uniforms = UniformLocations {
                projection: gl.get_uniform_location(program, UNIFORM_PROJECTION),
                model_view: gl.get_uniform_location(program, UNIFORM_MODEL_VIEW),
                normal: gl.get_uniform_location(program, UNIFORM_NORMAL),
                samplers: SAMPLERS
                    .iter()
                    .map(|name| gl.get_uniform_location(program, name))
                    .collect(),
            };

            Ok(Self {
                program,
                attribs,
                uniforms,
            })
        }
    }

    pub fn program(&self) -> glow::Program {
        self.program
    }

    pub fn attribs(&self) -> AttribLocations {
        self.attribs
    }

    pub fn uniforms(&self) -> &UniformLocations {
        &self.uniforms
    }
}
