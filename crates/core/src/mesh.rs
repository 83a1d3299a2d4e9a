//! The static cube mesh shared by every demo.
//!
//! 24 vertices (four per face, so each face carries its own normal and
//! texture square) interleaving position, normal and texture coordinate,
//! plus 36 `u16` indices forming 12 counter-clockwise triangles.

use bytemuck::{Pod, Zeroable};

/// Number of vertices in the cube (4 per face).
pub const VERTEX_COUNT: usize = 24;

/// Number of indices drawn per pass (6 faces x 2 triangles x 3).
pub const INDEX_COUNT: usize = 36;

/// Byte stride of one interleaved [`Vertex`].
pub const VERTEX_STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

/// Byte offset of the position within a [`Vertex`].
pub const POSITION_OFFSET: i32 = 0;
/// Byte offset of the normal within a [`Vertex`].
pub const NORMAL_OFFSET: i32 = 12;
/// Byte offset of the texture coordinate within a [`Vertex`].
pub const TEX_COORD_OFFSET: i32 = 24;

/// One interleaved cube vertex as laid out in the GPU buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

/// Face corners in counter-clockwise order seen from outside, with the
/// outward normal.
const FACES: [([[f32; 3]; 4], [f32; 3]); 6] = [
    // front
    (
        [[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]],
        [0.0, 0.0, 1.0],
    ),
    // back
    (
        [[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]],
        [0.0, 0.0, -1.0],
    ),
    // top
    (
        [[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]],
        [0.0, 1.0, 0.0],
    ),
    // bottom
    (
        [[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]],
        [0.0, -1.0, 0.0],
    ),
    // right
    (
        [[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]],
        [1.0, 0.0, 0.0],
    ),
    // left
    (
        [[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]],
        [-1.0, 0.0, 0.0],
    ),
];

/// Texture coordinates for the four corners of every face.
const FACE_TEX_COORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// The unit cube (edge 2, centered at the origin).
#[derive(Debug, Clone, PartialEq)]
pub struct CubeMesh {
    vertices: [Vertex; VERTEX_COUNT],
    indices: [u16; INDEX_COUNT],
}

impl CubeMesh {
    /// Builds the cube vertex and index arrays.
    pub fn new() -> Self {
        let mut vertices = [Vertex::zeroed(); VERTEX_COUNT];
        let mut indices = [0u16; INDEX_COUNT];

        for (face, (corners, normal)) in FACES.iter().enumerate() {
            for (corner, position) in corners.iter().enumerate() {
                vertices[face * 4 + corner] = Vertex {
                    position: *position,
                    normal: *normal,
                    tex_coord: FACE_TEX_COORDS[corner],
                };
            }

            let base = (face * 4) as u16;
            indices[face * 6..face * 6 + 6]
                .copy_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// The vertex array as raw bytes for a `STATIC_DRAW` upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The index array as raw bytes for a `STATIC_DRAW` upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl Default for CubeMesh {
    fn default() -> Self {
        Self::new()
    }
}
