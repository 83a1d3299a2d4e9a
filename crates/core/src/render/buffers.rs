//! GPU copies of the cube mesh.

use crate::error::DemoError;
use crate::mesh::CubeMesh;

/// Interleaved vertex buffer and `u16` index buffer, both `STATIC_DRAW`.
pub struct CubeBuffers {
    vertices: glow::Buffer,
    indices: glow::Buffer,
}

impl CubeBuffers {
    /// Uploads `mesh` once.
    ///
    /// # Errors
    ///
    /// Returns `DemoError::Gl` if a buffer object cannot be created.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, mesh: &CubeMesh) -> Result<Self, DemoError> {
        use glow::HasContext;

        // SAFETY: glow exposes raw GL calls as unsafe. Byte slices come from
        // the mesh's Pod arrays and outlive the upload calls.
        unsafe {
            let vertices = gl.create_buffer().map_err(DemoError::Gl)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertices));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, mesh.vertex_bytes(), glow::STATIC_DRAW);

            let indices = match gl.create_buffer() {
                Ok(b) => b,
                Err(e) => {
                    gl.delete_buffer(vertices);
                    return Err(DemoError::Gl(e));
                }
            };
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(indices));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                mesh.index_bytes(),
                glow::STATIC_DRAW,
            );

            Ok(Self { vertices, indices })
        }
    }

    pub fn vertices(&self) -> glow::Buffer {
        self.vertices
    }

    pub fn indices(&self) -> glow::Buffer {
        self.indices
    }
}
