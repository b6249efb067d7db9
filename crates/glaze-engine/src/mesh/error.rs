use std::fmt;

/// Structural problem found by [`Mesh::validate`](super::Mesh::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Index count is not a multiple of three.
    PartialTriangle { index_count: usize },
    /// An index refers past the end of the vertex array.
    IndexOutOfRange { index: u32, vertex_count: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::PartialTriangle { index_count } => {
                write!(f, "mesh has {index_count} indices, not a whole number of triangles")
            }
            MeshError::IndexOutOfRange { index, vertex_count } => {
                write!(f, "mesh index {index} is out of range for {vertex_count} vertices")
            }
        }
    }
}

impl std::error::Error for MeshError {}
