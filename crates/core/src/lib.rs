#![deny(unsafe_code)]
//! Core data for the glbook WebGL tutorial demos.
//!
//! Provides the static `CubeMesh`, GLSL sources, per-pass `Transforms`,
//! the `FrameClock`/`Rotation` pair driving the animation, the `DemoKind`
//! catalog, and the `FramePlan` of draw passes each demo issues per frame.
//! GL execution of those plans sits behind the `render` feature.

pub mod clock;
pub mod control;
pub mod demo;
pub mod error;
pub mod frame;
pub mod mesh;
pub mod params;
pub mod shaders;
pub mod texels;
pub mod transform;

#[cfg(feature = "render")]
pub mod render;

pub use clock::{FrameClock, Rotation};
pub use control::DemoControl;
pub use demo::{Demo, DemoKind, DemoOptions};
pub use error::DemoError;
pub use frame::{CanvasSize, DrawPass, FramePlan, PassTarget, TextureSlot, Viewport};
pub use mesh::CubeMesh;
pub use texels::ImageSampling;
pub use transform::Transforms;
