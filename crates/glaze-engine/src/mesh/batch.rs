use std::ops::Range;

use crate::shading::Vertex;

use super::Mesh;

/// Index range and vertex base for one mesh inside a packed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRange {
    pub index_range: Range<u32>,
    pub base_vertex: i32,
}

/// Byte sizes needed to upload `meshes` into one vertex and one index buffer.
pub fn measure(meshes: &[Mesh]) -> (u64, u64) {
    let (vertex_count, index_count) = meshes
        .iter()
        .fold((0usize, 0usize), |(v, i), m| (v + m.vertices.len(), i + m.indices.len()));
    (
        vertex_count as u64 * Vertex::STRIDE,
        (index_count * std::mem::size_of::<u32>()) as u64,
    )
}

/// Meshes packed back to back, ready for a single upload per buffer.
///
/// Indices are kept mesh-local; each mesh is drawn with its own `base_vertex`.
/// Reusing one batch across frames avoids per-frame allocation once warmed.
#[derive(Debug, Default)]
pub struct MeshBatch {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    ranges: Vec<DrawRange>,
}

impl MeshBatch {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears packed data. Keeps allocated capacity for reuse.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.ranges.clear();
    }

    /// Repacks the batch from `meshes`.
    ///
    /// Meshes without indices or failing validation are skipped; invalid ones
    /// are reported once per call.
    pub fn pack(&mut self, meshes: &[Mesh]) {
        self.clear();

        for (n, mesh) in meshes.iter().enumerate() {
            if mesh.is_empty() {
                continue;
            }
            if let Err(e) = mesh.validate() {
                log::warn!("skipping mesh #{n}: {e}");
                continue;
            }

            let base_vertex = self.vertices.len() as i32;
            let start = self.indices.len() as u32;
            self.vertices.extend_from_slice(&mesh.vertices);
            self.indices.extend_from_slice(&mesh.indices);
            let end = self.indices.len() as u32;

            self.ranges.push(DrawRange { index_range: start..end, base_vertex });
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn ranges(&self) -> &[DrawRange] {
        &self.ranges
    }

    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::PackedColor;

    fn rect(x: f32) -> Mesh {
        let mut m = Mesh::new();
        m.add_colored_rect([x, 0.0], [x + 1.0, 1.0], PackedColor::WHITE);
        m
    }

    #[test]
    fn measure_sums_all_meshes() {
        let meshes = [rect(0.0), rect(5.0), Mesh::new()];
        assert_eq!(measure(&meshes), (8 * 20, 12 * 4));
    }

    #[test]
    fn pack_records_ranges_and_base_vertices() {
        let mut batch = MeshBatch::new();
        batch.pack(&[rect(0.0), rect(5.0)]);

        assert_eq!(batch.vertices().len(), 8);
        assert_eq!(batch.indices().len(), 12);
        assert_eq!(
            batch.ranges(),
            &[
                DrawRange { index_range: 0..6, base_vertex: 0 },
                DrawRange { index_range: 6..12, base_vertex: 4 },
            ]
        );
        // Mesh-local indices are preserved.
        assert_eq!(&batch.indices()[6..], &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn pack_skips_empty_and_invalid_meshes() {
        let mut broken = rect(0.0);
        broken.indices.push(99);

        let mut batch = MeshBatch::new();
        batch.pack(&[Mesh::new(), broken, rect(3.0)]);

        assert_eq!(batch.ranges().len(), 1);
        assert_eq!(batch.ranges()[0].base_vertex, 0);
        assert_eq!(batch.vertices()[0].position, [3.0, 0.0]);
    }

    #[test]
    fn byte_views_match_measure() {
        let meshes = [rect(0.0), rect(2.0)];
        let mut batch = MeshBatch::new();
        batch.pack(&meshes);

        let (vb, ib) = measure(&meshes);
        assert_eq!(batch.vertex_bytes().len() as u64, vb);
        assert_eq!(batch.index_bytes().len() as u64, ib);
    }

    #[test]
    fn repack_replaces_previous_contents() {
        let mut batch = MeshBatch::new();
        batch.pack(&[rect(0.0), rect(1.0)]);
        batch.pack(&[rect(9.0)]);
        assert_eq!(batch.ranges().len(), 1);
        assert_eq!(batch.vertices().len(), 4);

        batch.pack(&[]);
        assert!(batch.is_empty());
    }
}
