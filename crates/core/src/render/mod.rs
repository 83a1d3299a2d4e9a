//! WebGL rendering of the demo frame plans.
//!
//! Only available with the `render` feature. Everything here needs a live
//! `glow::Context`; the pure data it consumes lives in the crate root.
//!
//! # Module overview
//!
//! - [`shader`] -- compile and link with numbered error reports.
//! - [`program`] -- the cube program and its attribute/uniform slots.
//! - [`buffers`] -- vertex and index buffers for the cube mesh.
//! - [`texture`] -- placeholder, pattern and render-target textures.
//! - [`target`] -- framebuffer + colour texture for off-screen passes.
//! - [`renderer`] -- executes a `FramePlan` pass by pass.

pub mod buffers;
pub mod program;
pub mod renderer;
pub mod shader;
pub mod target;
pub mod texture;

pub use buffers::CubeBuffers;
pub use program::{AttribLocations, CubeProgram, UniformLocations};
pub use renderer::CubeRenderer;
pub use shader::{compile_shader, link_program, number_source_lines};
pub use target::RenderTarget;
pub use texture::{
    apply_image_sampling, create_pattern_texture, create_placeholder_texture, create_texture,
    TextureConfig,
};
