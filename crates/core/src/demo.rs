//! The demo catalog: which shader, images and passes each demo uses.
//!
//! [`DemoKind`] names the three e-book demos. [`Demo`] pairs a kind with
//! its options and produces the [`FramePlan`] for any rotation angle.

use serde_json::Value;

use crate::clock::Rotation;
use crate::error::DemoError;
use crate::frame::{CanvasSize, DrawPass, FramePlan, PassTarget, TextureSlot, Viewport};
use crate::params::Params;
use crate::shaders::{BLEND_TEXTURE_FRAGMENT_SHADER, SINGLE_TEXTURE_FRAGMENT_SHADER};
use crate::transform::{aspect_ratio, Transforms};

/// All available demo names.
const DEMO_NAMES: &[&str] = &["animated-cube", "multi-texture", "render-to-texture"];

/// Edge length of the render-to-texture target unless overridden.
pub const DEFAULT_TARGET_SIZE: u32 = 256;

const CLEAR_BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const CLEAR_BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const CLEAR_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// The demos shipped with the e-book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    /// A lit cube textured with one image, spinning.
    AnimatedCube,
    /// The cube with two images multiplied together.
    MultiTexture,
    /// The cube drawn into a texture, then drawn with that texture.
    RenderToTexture,
}

impl DemoKind {
    /// Looks a demo up by name.
    ///
    /// Returns `DemoError::UnknownDemo` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, DemoError> {
        match name {
            "animated-cube" => Ok(DemoKind::AnimatedCube),
            "multi-texture" => Ok(DemoKind::MultiTexture),
            "render-to-texture" => Ok(DemoKind::RenderToTexture),
            _ => Err(DemoError::UnknownDemo(name.to_string())),
        }
    }

    /// Returns a slice of all recognized demo names.
    pub fn list_demos() -> &'static [&'static str] {
        DEMO_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            DemoKind::AnimatedCube => DEMO_NAMES[0],
            DemoKind::MultiTexture => DEMO_NAMES[1],
            DemoKind::RenderToTexture => DEMO_NAMES[2],
        }
    }

    /// Static image files the demo textures the cube with, by texture unit.
    pub fn image_paths(&self) -> &'static [&'static str] {
        match self {
            DemoKind::AnimatedCube => &["goldenstart.jpg"],
            DemoKind::MultiTexture => &["star.jpg", "leaves.jpg"],
            DemoKind::RenderToTexture => &[],
        }
    }

    pub fn fragment_shader(&self) -> &'static str {
        match self {
            DemoKind::MultiTexture => BLEND_TEXTURE_FRAGMENT_SHADER,
            DemoKind::AnimatedCube | DemoKind::RenderToTexture => SINGLE_TEXTURE_FRAGMENT_SHADER,
        }
    }

    pub fn initial_angle(&self) -> f32 {
        match self {
            DemoKind::AnimatedCube => 0.1,
            DemoKind::MultiTexture | DemoKind::RenderToTexture => 0.0,
        }
    }

    /// Ratio of the Y rotation to the Z rotation.
    pub fn default_spin(&self) -> f32 {
        match self {
            DemoKind::AnimatedCube => 0.3,
            DemoKind::MultiTexture | DemoKind::RenderToTexture => 0.7,
        }
    }

    pub fn uses_offscreen_target(&self) -> bool {
        matches!(self, DemoKind::RenderToTexture)
    }
}

/// Per-run overrides read from a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoOptions {
    /// Prefix joined onto every image path.
    pub asset_root: String,
    /// Off-screen texture edge in pixels.
    pub target_size: u32,
    pub spin: f32,
}

impl DemoOptions {
    /// Reads `asset_root`, `target_size` and `spin`, defaulting each.
    ///
    /// Returns `DemoError::InvalidDimensions` for a zero `target_size`.
    pub fn from_json(kind: DemoKind, params: &Value) -> Result<Self, DemoError> {
        let params = Params::new(params);
        let target_size = params.u32_or("target_size", DEFAULT_TARGET_SIZE);
        if target_size == 0 {
            return Err(DemoError::InvalidDimensions);
        }

        Ok(Self {
            asset_root: params.str_or("asset_root", ""),
            target_size,
            spin: params.f32_or("spin", kind.default_spin()),
        })
    }

    pub fn defaults(kind: DemoKind) -> Self {
        Self {
            asset_root: String::new(),
            target_size: DEFAULT_TARGET_SIZE,
            spin: kind.default_spin(),
        }
    }
}

/// A configured demo, ready to plan frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Demo {
    kind: DemoKind,
    options: DemoOptions,
}

impl Demo {
    pub fn new(kind: DemoKind, options: DemoOptions) -> Self {
        Self { kind, options }
    }

    /// Constructs a demo by name with options parsed from `params`.
    pub fn from_name(name: &str, params: &Value) -> Result<Self, DemoError> {
        let kind = DemoKind::from_name(name)?;
        let options = DemoOptions::from_json(kind, params)?;
        Ok(Self::new(kind, options))
    }

    pub fn kind(&self) -> DemoKind {
        self.kind
    }

    pub fn options(&self) -> &DemoOptions {
        &self.options
    }

    /// Image URLs with the asset root applied.
    pub fn image_urls(&self) -> Vec<String> {
        self.kind
            .image_paths()
            .iter()
            .map(|path| format!("{}{path}", self.options.asset_root))
            .collect()
    }

    /// A fresh rotation at the demo's starting angle.
    pub fn rotation(&self) -> Rotation {
        Rotation::new(self.kind.initial_angle())
    }

    /// Edge of the off-screen target, if the demo needs one.
    pub fn target_size(&self) -> Option<u32> {
        self.kind
            .uses_offscreen_target()
            .then_some(self.options.target_size)
    }

    /// The passes drawn for a frame at `angle` onto `canvas`.
    pub fn plan(&self, angle: f32, canvas: CanvasSize) -> FramePlan {
        let spin = self.options.spin;
        let canvas_transforms = Transforms::new(
            angle,
            spin,
            aspect_ratio(canvas.client_width, canvas.client_height),
        );

        match self.kind {
            DemoKind::AnimatedCube => FramePlan::new(vec![DrawPass::cube(
                PassTarget::Canvas,
                canvas.viewport(),
                CLEAR_BLACK,
                vec![TextureSlot::Image(0)],
                canvas_transforms,
            )]),
            DemoKind::MultiTexture => FramePlan::new(vec![DrawPass::cube(
                PassTarget::Canvas,
                canvas.viewport(),
                CLEAR_BLACK,
                vec![TextureSlot::Image(0), TextureSlot::Image(1)],
                canvas_transforms,
            )]),
            DemoKind::RenderToTexture => {
                let size = self.options.target_size;
                let offscreen = DrawPass::cube(
                    PassTarget::Offscreen,
                    Viewport {
                        width: size,
                        height: size,
                    },
                    CLEAR_BLUE,
                    vec![TextureSlot::Pattern],
                    Transforms::new(angle, spin, aspect_ratio(size, size)),
                )
                .culled();
                let onscreen = DrawPass::cube(
                    PassTarget::Canvas,
                    canvas.viewport(),
                    CLEAR_WHITE,
                    vec![TextureSlot::Offscreen],
                    canvas_transforms,
                )
                .culled();
                FramePlan::new(vec![offscreen, onscreen])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FrameClock;
    use crate::frame::DepthFunc;
    use crate::shaders::sampler_count;
    use serde_json::json;

    fn canvas() -> CanvasSize {
        CanvasSize {
            width: 640,
            height: 480,
            client_width: 640,
            client_height: 480,
        }
    }

    #[test]
    fn from_name_round_trips_every_listed_demo() {
        for name in DemoKind::list_demos() {
            let kind = DemoKind::from_name(name).unwrap();
            assert_eq!(kind.name(), *name);
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = DemoKind::from_name("teapot");
        assert!(matches!(result, Err(DemoError::UnknownDemo(ref n)) if n == "teapot"));
    }

    #[test]
    fn image_count_matches_fragment_samplers() {
        for name in DemoKind::list_demos() {
            let kind = DemoKind::from_name(name).unwrap();
            let bound = kind.image_paths().len() + usize::from(kind.uses_offscreen_target());
            assert_eq!(bound, sampler_count(kind.fragment_shader()), "demo {name}");
        }
    }

    #[test]
    fn options_default_when_params_empty() {
        let opts = DemoOptions::from_json(DemoKind::AnimatedCube, &json!({})).unwrap();
        assert_eq!(opts, DemoOptions::defaults(DemoKind::AnimatedCube));
        assert_eq!(opts.spin, 0.3);
        assert_eq!(opts.target_size, 256);
    }

    #[test]
    fn options_reject_zero_target_size() {
        let result = DemoOptions::from_json(DemoKind::RenderToTexture, &json!({"target_size": 0}));
        assert!(matches!(result, Err(DemoError::InvalidDimensions)));
    }

    #[test]
    fn zero_spin_override_removes_y_rotation() {
        let opts = DemoOptions::from_json(DemoKind::AnimatedCube, &json!({"spin": 0.0})).unwrap();
        assert_eq!(opts.spin, 0.0);

        let demo = Demo::new(DemoKind::AnimatedCube, opts);
        let plan = demo.plan(1.2, canvas());
        let model_view = plan.passes()[0].transforms.model_view;

        // Rotating only about Z keeps the Z axis fixed.
        let z = model_view.transform_vector3(glam::Vec3::Z);
        assert!((z - glam::Vec3::Z).length() < 1e-5, "z axis moved to {z}");
        let expected = glam::Mat4::from_translation(glam::Vec3::new(0.0, 0.0, -6.0))
            * glam::Mat4::from_rotation_z(1.2);
        assert!(model_view.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn default_spin_tilts_the_z_axis() {
        let demo = Demo::from_name("animated-cube", &json!({})).unwrap();
        let model_view = demo.plan(1.2, canvas()).passes()[0].transforms.model_view;
        let z = model_view.transform_vector3(glam::Vec3::Z);
        assert!((z - glam::Vec3::Z).length() > 0.1);
    }

    #[test]
    fn image_urls_apply_asset_root() {
        let demo = Demo::from_name("multi-texture", &json!({"asset_root": "img/"})).unwrap();
        assert_eq!(demo.image_urls(), vec!["img/star.jpg", "img/leaves.jpg"]);
    }

    #[test]
    fn rotation_starts_at_demo_initial_angle() {
        let cube = Demo::from_name("animated-cube", &json!({})).unwrap();
        assert_eq!(cube.rotation().angle(), 0.1);
        let rtt = Demo::from_name("render-to-texture", &json!({})).unwrap();
        assert_eq!(rtt.rotation().angle(), 0.0);
    }

    #[test]
    fn only_render_to_texture_has_a_target() {
        let rtt = Demo::from_name("render-to-texture", &json!({"target_size": 128})).unwrap();
        assert_eq!(rtt.target_size(), Some(128));
        let cube = Demo::from_name("animated-cube", &json!({"target_size": 128})).unwrap();
        assert_eq!(cube.target_size(), None);
    }

    #[test]
    fn single_pass_demos_clear_black_and_skip_culling() {
        for name in ["animated-cube", "multi-texture"] {
            let plan = Demo::from_name(name, &json!({})).unwrap().plan(0.0, canvas());
            assert_eq!(plan.passes().len(), 1);
            let pass = &plan.passes()[0];
            assert_eq!(pass.target, PassTarget::Canvas);
            assert_eq!(pass.clear_color, [0.0, 0.0, 0.0, 1.0]);
            assert_eq!(pass.depth_func, DepthFunc::LessEqual);
            assert!(!pass.cull_back_faces);
        }
    }

    #[test]
    fn multi_texture_binds_both_images_in_unit_order() {
        let plan = Demo::from_name("multi-texture", &json!({})).unwrap().plan(0.0, canvas());
        assert_eq!(
            plan.passes()[0].textures,
            vec![TextureSlot::Image(0), TextureSlot::Image(1)]
        );
    }

    #[test]
    fn render_to_texture_draws_offscreen_then_canvas() {
        let demo = Demo::from_name("render-to-texture", &json!({})).unwrap();
        let plan = demo.plan(1.0, canvas());
        let [offscreen, onscreen] = plan.passes() else {
            panic!("expected two passes, got {}", plan.passes().len());
        };
        assert_eq!(offscreen.target, PassTarget::Offscreen);
        assert_eq!(offscreen.viewport, Viewport { width: 256, height: 256 });
        assert_eq!(offscreen.clear_color, [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(offscreen.textures, vec![TextureSlot::Pattern]);
        assert_eq!(onscreen.target, PassTarget::Canvas);
        assert_eq!(onscreen.clear_color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(onscreen.textures, vec![TextureSlot::Offscreen]);
        assert!(offscreen.cull_back_faces && onscreen.cull_back_faces);
    }

    #[test]
    fn offscreen_pass_uses_square_aspect_canvas_uses_client_aspect() {
        let demo = Demo::from_name("render-to-texture", &json!({})).unwrap();
        let wide = CanvasSize {
            width: 800,
            height: 400,
            client_width: 400,
            client_height: 100,
        };
        let plan = demo.plan(0.5, wide);
        let expected_off = Transforms::new(0.5, 0.7, 1.0);
        let expected_on = Transforms::new(0.5, 0.7, 4.0);
        assert_eq!(plan.passes()[0].transforms, expected_off);
        assert_eq!(plan.passes()[1].transforms, expected_on);
        assert_eq!(plan.passes()[1].viewport, Viewport { width: 800, height: 400 });
    }

    #[test]
    fn every_pass_of_every_frame_draws_36_indices() {
        for name in DemoKind::list_demos() {
            let demo = Demo::from_name(name, &json!({})).unwrap();
            let mut clock = FrameClock::new();
            let mut rotation = demo.rotation();
            for frame in 1..=60 {
                let angle = rotation.advance(clock.tick(frame as f64 * 16.7));
                let plan = demo.plan(angle, canvas());
                assert!(plan.passes().iter().all(|p| p.index_count == 36));
                assert_eq!(plan.index_count(), 36 * plan.passes().len());
            }
        }
    }

    #[test]
    fn offscreen_pass_precedes_its_reader_every_frame() {
        let demo = Demo::from_name("render-to-texture", &json!({})).unwrap();
        let mut rotation = demo.rotation();
        for _ in 0..512 {
            let angle = rotation.advance(0.5);
            assert!(demo.plan(angle, canvas()).offscreen_written_before_read());
        }
    }

    #[test]
    fn both_passes_of_a_frame_share_the_angle() {
        let demo = Demo::from_name("render-to-texture", &json!({})).unwrap();
        let plan = demo.plan(2.0, CanvasSize::square_pixels(300, 300));
        assert_eq!(
            plan.passes()[0].transforms.model_view,
            plan.passes()[1].transforms.model_view
        );
    }
}
