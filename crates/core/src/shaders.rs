//! GLSL ES 1.00 sources for the demos and the names they bind.
//!
//! All demos share one lit vertex shader; the fragment shader differs by
//! how many image samplers it blends.

/// Attribute receiving the vertex position (vec3 at offset 0).
pub const ATTR_POSITION: &str = "aVertexPosition";
/// Attribute receiving the vertex normal (vec3 at offset 12).
pub const ATTR_NORMAL: &str = "aVertexNormal";
/// Attribute receiving the texture coordinate (vec2 at offset 24).
pub const ATTR_TEX_COORD: &str = "aTextureCoord";

pub const UNIFORM_PROJECTION: &str = "uProjectionMatrix";
pub const UNIFORM_MODEL_VIEW: &str = "uModelViewMatrix";
pub const UNIFORM_NORMAL: &str = "uNormalMatrix";

/// Sampler uniforms, indexed by texture unit.
pub const SAMPLERS: [&str; 2] = ["uSampler0", "uSampler1"];

/// Vertex shader with ambient plus one directional light.
pub const CUBE_VERTEX_SHADER: &str = r#"
attribute vec4 aVertexPosition;
attribute vec3 aVertexNormal;
attribute vec2 aTextureCoord;

uniform mat4 uNormalMatrix;
uniform mat4 uModelViewMatrix;
uniform mat4 uProjectionMatrix;

varying highp vec2 vTextureCoord;
varying highp vec3 vLighting;

void main(void) {
  gl_Position = uProjectionMatrix * uModelViewMatrix * aVertexPosition;
  vTextureCoord = aTextureCoord;

  highp vec3 ambientLight = vec3(0.3, 0.3, 0.3);
  highp vec3 directionalLightColor = vec3(1, 1, 1);
  highp vec3 directionalVector = normalize(vec3(0.85, 0.8, 0.75));

  highp vec4 transformedNormal = uNormalMatrix * vec4(aVertexNormal, 1.0);

  highp float directional = max(dot(transformedNormal.xyz, directionalVector), 0.0);
  vLighting = ambientLight + (directionalLightColor * directional);
}
"#;

/// Samples one texture and applies the vertex lighting.
pub const SINGLE_TEXTURE_FRAGMENT_SHADER: &str = r#"
varying highp vec2 vTextureCoord;
varying highp vec3 vLighting;

uniform sampler2D uSampler0;

void main(void) {
  highp vec4 color0 = texture2D(uSampler0, vTextureCoord);
  gl_FragColor = vec4(color0.rgb * vLighting, color0.a);
}
"#;

/// Multiplies two textures together; alpha comes from the second.
pub const BLEND_TEXTURE_FRAGMENT_SHADER: &str = r#"
varying highp vec2 vTextureCoord;
varying highp vec3 vLighting;

uniform sampler2D uSampler0;
uniform sampler2D uSampler1;

void main(void) {
  highp vec4 color0 = texture2D(uSampler0, vTextureCoord);
  highp vec4 color1 = texture2D(uSampler1, vTextureCoord);
  highp vec4 colorBlend = color0 * color1;
  gl_FragColor = vec4(colorBlend.rgb * vLighting, color1.a);
}
"#;

/// Counts the `uniform sampler2D` declarations in a fragment shader.
pub fn sampler_count(fragment_src: &str) -> usize {
    SAMPLERS
        .iter()
        .filter(|name| fragment_src.contains(&format!("uniform sampler2D {name};")))
        .count()
}
