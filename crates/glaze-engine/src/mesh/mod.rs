//! CPU-side UI geometry.
//!
//! Meshes are produced by the layout layer and packed into one contiguous
//! vertex/index pair per frame before upload.

mod batch;
mod error;
mod mesh;

pub use batch::{measure, DrawRange, MeshBatch};
pub use error::MeshError;
pub use mesh::Mesh;
