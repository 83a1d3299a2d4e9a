//! Texture creation for the demos: image placeholders, the procedural
//! pattern, and empty render-target storage.

use crate::error::DemoError;
use crate::texels::{ImageSampling, PATTERN_HEIGHT, PATTERN_WIDTH, PLACEHOLDER_PIXEL};

/// Storage format and filtering for one 8-bit texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureConfig {
    pub width: u32,
    pub height: u32,
    /// GL format, used for both internal format and upload format
    /// (WebGL 1 requires them to match).
    pub format: u32,
    pub min_filter: u32,
    pub mag_filter: u32,
}

impl TextureConfig {
    /// Colour attachment for an off-screen pass: linear minification,
    /// nearest magnification, no mips.
    pub fn render_target(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            format: glow::RGBA,
            min_filter: glow::LINEAR,
            mag_filter: glow::NEAREST,
        }
    }

    /// The 3x2 RGB pattern, sampled without filtering.
    pub fn pattern() -> Self {
        Self {
            width: PATTERN_WIDTH,
            height: PATTERN_HEIGHT,
            format: glow::RGB,
            min_filter: glow::NEAREST,
            mag_filter: glow::NEAREST,
        }
    }

    /// Single pixel drawn until an image arrives.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            format: glow::RGBA,
            min_filter: glow::LINEAR,
            mag_filter: glow::LINEAR,
        }
    }

    /// Bytes per texel for the configured format.
    pub fn bytes_per_texel(&self) -> usize {
        match self.format {
            glow::RGB => 3,
            _ => 4,
        }
    }

    /// Bytes a full level-0 upload must supply.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * self.bytes_per_texel()
    }
}

/// Creates a 2D texture from `config`, optionally filled with `pixels`.
///
/// Wrapping is `CLAMP_TO_EDGE` on both axes. The texture is left unbound.
///
/// # Errors
///
/// Returns `DemoError::InvalidDimensions` for a zero edge or a pixel slice
/// of the wrong length, and `DemoError::Gl` if the context cannot create
/// the texture.
#[allow(unsafe_code)]
pub fn create_texture(
    gl: &glow::Context,
    config: &TextureConfig,
    pixels: Option<&[u8]>,
) -> Result<glow::Texture, DemoError> {
    use glow::HasContext;

    if config.width == 0 || config.height == 0 {
        return Err(DemoError::InvalidDimensions);
    }
    if pixels.is_some_and(|p| p.len() != config.byte_len()) {
        return Err(DemoError::InvalidDimensions);
    }

    // SAFETY: glow exposes raw GL calls as unsafe. Dimensions are
    // non-zero and the pixel slice length matches the configuration.
    unsafe {
        let texture = gl.create_texture().map_err(DemoError::Gl)?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));

        // RGB rows of odd width are not 4-byte aligned.
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            config.format as i32,
            config.width as i32,
            config.height as i32,
            0,
            config.format,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(pixels),
        );

        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, config.min_filter as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, config.mag_filter as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);

        gl.bind_texture(glow::TEXTURE_2D, None);
        Ok(texture)
    }
}

/// Creates a texture holding the blue placeholder pixel.
pub fn create_placeholder_texture(gl: &glow::Context) -> Result<glow::Texture, DemoError> {
    create_texture(gl, &TextureConfig::placeholder(), Some(&PLACEHOLDER_PIXEL))
}

/// Creates the 3x2 pattern texture.
pub fn create_pattern_texture(gl: &glow::Context) -> Result<glow::Texture, DemoError> {
    create_texture(gl, &TextureConfig::pattern(), Some(&crate::texels::PATTERN_TEXELS))
}

/// Sets up sampling for the image just uploaded into the texture bound to
/// `TEXTURE_2D`, according to its size.
#[allow(unsafe_code)]
pub fn apply_image_sampling(gl: &glow::Context, width: u32, height: u32) -> ImageSampling {
    use glow::HasContext;

    let sampling = ImageSampling::for_size(width, height);

    // SAFETY: only sets parameters on the currently bound texture.
    unsafe {
        match sampling {
            ImageSampling::Mipmapped => {
                gl.generate_mipmap(glow::TEXTURE_2D);
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MIN_FILTER,
                    glow::LINEAR_MIPMAP_LINEAR as i32,
                );
            }
            ImageSampling::ClampLinear => {
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_S,
                    glow::CLAMP_TO_EDGE as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_T,
                    glow::CLAMP_TO_EDGE as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MIN_FILTER,
                    glow::LINEAR as i32,
                );
            }
        }
    }
    sampling
}
