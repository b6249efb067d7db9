//! Adapters for mesh producers outside this crate.

#[cfg(feature = "egui")]
mod egui_mesh;

#[cfg(feature = "egui")]
pub use egui_mesh::mesh_from_egui;
