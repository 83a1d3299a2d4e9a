//! Draw passes: the state bindings and indexed draw that make up a frame.
//!
//! A [`FramePlan`] is pure data. The `render` module executes it against a
//! GL context; tests and the CLI inspect it directly.

use serde::Serialize;

use crate::mesh::INDEX_COUNT;
use crate::transform::Transforms;

/// Where a pass writes its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassTarget {
    /// The demo's off-screen framebuffer.
    Offscreen,
    /// The default framebuffer backing the canvas.
    Canvas,
}

/// A texture bound to a unit for the duration of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextureSlot {
    /// The n-th image texture the demo loaded.
    Image(usize),
    /// The 3x2 procedural pattern.
    Pattern,
    /// The color attachment of the off-screen framebuffer.
    Offscreen,
}

/// Depth comparison used while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthFunc {
    Less,
    LessEqual,
}

/// Size of a pass's viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// The canvas a demo draws into.
///
/// The drawing buffer size sets the viewport; the CSS client size sets
/// the projection's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
    pub client_width: u32,
    pub client_height: u32,
}

impl CanvasSize {
    /// A canvas whose client size equals its drawing buffer.
    pub fn square_pixels(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            client_width: width,
            client_height: height,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }
}

/// One complete set of bindings plus an indexed triangle draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPass {
    pub target: PassTarget,
    pub viewport: Viewport,
    pub clear_color: [f32; 4],
    pub depth_func: DepthFunc,
    pub cull_back_faces: bool,
    /// Texture bound to unit `i` is `textures[i]`.
    pub textures: Vec<TextureSlot>,
    pub transforms: Transforms,
    pub index_count: usize,
}

impl DrawPass {
    /// A pass drawing the whole cube with the given bindings.
    pub fn cube(
        target: PassTarget,
        viewport: Viewport,
        clear_color: [f32; 4],
        textures: Vec<TextureSlot>,
        transforms: Transforms,
    ) -> Self {
        Self {
            target,
            viewport,
            clear_color,
            depth_func: DepthFunc::LessEqual,
            cull_back_faces: false,
            textures,
            transforms,
            index_count: INDEX_COUNT,
        }
    }

    /// Switches to back-face culling with the default `LESS` depth test.
    pub fn culled(mut self) -> Self {
        self.depth_func = DepthFunc::Less;
        self.cull_back_faces = true;
        self
    }

    pub fn samples(&self, slot: TextureSlot) -> bool {
        self.textures.contains(&slot)
    }
}

/// The ordered passes drawn for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FramePlan {
    passes: Vec<DrawPass>,
}

impl FramePlan {
    pub fn new(passes: Vec<DrawPass>) -> Self {
        Self { passes }
    }

    pub fn passes(&self) -> &[DrawPass] {
        &self.passes
    }

    /// Total indices drawn across all passes.
    pub fn index_count(&self) -> usize {
        self.passes.iter().map(|p| p.index_count).sum()
    }

    /// True when no pass samples the off-screen texture before a pass that
    /// writes it has run in the same frame.
    pub fn offscreen_written_before_read(&self) -> bool {
        let mut written = false;
        for pass in &self.passes {
            let reads = pass.samples(TextureSlot::Offscreen);
            if reads && (!written || pass.target == PassTarget::Offscreen) {
                return false;
            }
            if pass.target == PassTarget::Offscreen {
                written = true;
            }
        }
        true
    }
}
