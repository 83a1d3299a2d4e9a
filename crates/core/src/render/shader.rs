//! Shader compilation and linking for WebGL / OpenGL.
//!
//! The compile/link functions need a live `glow::Context`. Source
//! numbering for error reports is plain string work and tested here.

use crate::error::DemoError;

/// Prefixes each source line with its right-aligned line number and
/// appends the driver log, so `ERROR: 0:12:` can be matched by eye.
pub fn number_source_lines(source: &str, log: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().max(1).to_string().len();

    let mut out = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    if !log.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(log);
    }
    out
}

fn stage_name(shader_type: u32) -> &'static str {
    match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

/// Compiles a single shader stage.
///
/// # Errors
///
/// Returns `DemoError::ShaderCompile` with the numbered source and the
/// driver's info log if the GLSL fails to compile.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, DemoError> {
    use glow::HasContext;

    let stage = stage_name(shader_type);

    // SAFETY: glow exposes raw GL calls as unsafe. The stage constant is
    // one of the two GL defines and the shader is deleted on failure.
    unsafe {
        let shader = gl
            .create_shader(shader_type)
            .map_err(|log| DemoError::ShaderCompile {
                stage: stage.to_string(),
                log,
            })?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if gl.get_shader_compile_status(shader) {
            return Ok(shader);
        }

        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        log::error!("{stage} shader failed to compile");
        Err(DemoError::ShaderCompile {
            stage: stage.to_string(),
            log: number_source_lines(source, &log),
        })
    }
}

/// Compiles both stages and links them into a program.
///
/// Stage objects are deleted once linking finishes, whatever the result.
///
/// # Errors
///
/// Returns `DemoError::ShaderCompile` if either stage fails, or
/// `DemoError::ShaderLink` if the program does not link.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, DemoError> {
    use glow::HasContext;

    let vertex = compile_shader(gl, glow::VERTEX_SHADER, vertex_src)?;
    let fragment = match compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: vertex is a live handle from compile_shader.
            unsafe { gl.delete_shader(vertex) };
            return Err(e);
        }
    };

    // SAFETY: both shader handles are live; the program is deleted if
    // linking fails and the stages are released on every path.
    unsafe {
        let program = match gl.create_program() {
            Ok(p) => p,
            Err(log) => {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
                return Err(DemoError::ShaderLink(log));
            }
        };

        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if gl.get_program_link_status(program) {
            Ok(program)
        } else {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            log::error!("shader program failed to link");
            Err(DemoError::ShaderLink(log))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shaders::CUBE_VERTEX_SHADER;

    #[test]
    fn numbers_each_line_and_appends_log() {
        let out = number_source_lines("attribute vec4 a;\nvoid main(void) {\n}", "ERROR: 0:2: x");
        assert!(out.contains("1: attribute vec4 a;"), "got:\n{out}");
        assert!(out.contains("2: void main(void) {"), "got:\n{out}");
        assert!(out.contains("3: }"), "got:\n{out}");
        assert!(out.ends_with("\n\nERROR: 0:2: x"), "got:\n{out}");
    }

    #[test]
    fn right_aligns_numbers_for_long_sources() {
        let out = number_source_lines(CUBE_VERTEX_SHADER, "");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.len() >= 10, "vertex shader unexpectedly short");
        assert!(lines[0].starts_with(" 1: "), "got: '{}'", lines[0]);
        assert!(lines[9].starts_with("10: "), "got: '{}'", lines[9]);
    }

    #[test]
    fn empty_source_yields_only_the_log() {
        assert_eq!(number_source_lines("", "link failed"), "link failed");
    }

    #[test]
    fn empty_log_yields_only_the_source() {
        assert_eq!(number_source_lines("void main(void) {}", ""), "1: void main(void) {}");
    }

    #[test]
    fn both_empty_yields_empty() {
        assert!(number_source_lines("", "").is_empty());
    }

    #[test]
    fn stage_names_follow_gl_constants() {
        assert_eq!(stage_name(glow::VERTEX_SHADER), "vertex");
        assert_eq!(stage_name(glow::FRAGMENT_SHADER), "fragment");
        assert_eq!(stage_name(0), "unknown");
    }

    #[test]
    #[ignore = "requires GL context"]
    fn link_program_builds_every_demo_shader_pair() {
        // Would test: link_program(gl, CUBE_VERTEX_SHADER, kind.fragment_shader())
        // succeeds for every DemoKind.
    }
}
