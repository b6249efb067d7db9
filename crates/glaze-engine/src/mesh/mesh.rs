use crate::shading::{PackedColor, Vertex};

use super::MeshError;

/// Indexed triangle list in pixel space, as emitted by the layout engine.
///
/// Vertices are never modified once pushed; the renderer only reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// A mesh with no indices draws nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Clears geometry. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Pushes a vertex and returns its index.
    #[inline]
    pub fn add_vertex(&mut self, vertex: Vertex) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(vertex);
        idx
    }

    #[inline]
    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Axis-aligned rectangle in one solid color.
    pub fn add_colored_rect(&mut self, min: [f32; 2], max: [f32; 2], color: PackedColor) {
        self.add_rect_corners(min, max, [color; 4]);
    }

    /// Axis-aligned rectangle with one color per corner, clockwise from top-left.
    ///
    /// The rasterizer blends the corner colors across the two triangles.
    pub fn add_rect_corners(&mut self, min: [f32; 2], max: [f32; 2], colors: [PackedColor; 4]) {
        let [tl, tr, br, bl] = colors;
        let i0 = self.add_vertex(Vertex::new([min[0], min[1]], tl).with_uv([0.0, 0.0]));
        let i1 = self.add_vertex(Vertex::new([max[0], min[1]], tr).with_uv([1.0, 0.0]));
        let i2 = self.add_vertex(Vertex::new([max[0], max[1]], br).with_uv([1.0, 1.0]));
        let i3 = self.add_vertex(Vertex::new([min[0], max[1]], bl).with_uv([0.0, 1.0]));
        self.add_triangle(i0, i1, i2);
        self.add_triangle(i0, i2, i3);
    }

    /// Appends `other`, re-basing its indices onto this mesh's vertices.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Checks that indices form whole triangles over existing vertices.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle { index_count: self.indices.len() });
        }
        let vertex_count = self.vertices.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange { index, vertex_count });
        }
        Ok(())
    }
}
