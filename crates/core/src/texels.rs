//! Built-in pixel data and the sampling rule applied to loaded images.

/// Width of the procedural pattern texture.
pub const PATTERN_WIDTH: u32 = 3;
/// Height of the procedural pattern texture.
pub const PATTERN_HEIGHT: u32 = 2;

/// Tightly packed RGB8 pattern, row by row (needs unpack alignment 1).
pub const PATTERN_TEXELS: [u8; 18] = [
    128, 64, 128, 0, 192, 0, 128, 64, 128, //
    0, 192, 0, 255, 0, 255, 0, 192, 0,
];

/// Opaque blue RGBA8 pixel shown while an image is still downloading.
pub const PLACEHOLDER_PIXEL: [u8; 4] = [0, 0, 255, 255];

/// How a loaded image texture is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSampling {
    /// Both edges are powers of two: generate a mipmap chain.
    Mipmapped,
    /// Otherwise: clamp to edge and filter linearly without mips.
    ClampLinear,
}

impl ImageSampling {
    pub fn for_size(width: u32, height: u32) -> Self {
        if width.is_power_of_two() && height.is_power_of_two() {
            ImageSampling::Mipmapped
        } else {
            ImageSampling::ClampLinear
        }
    }
}
