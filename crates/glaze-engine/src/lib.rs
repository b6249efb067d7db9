//! Glaze engine crate.
//!
//! Shading stage for immediate-mode UI meshes (pixel-space vertices with packed
//! RGBA8 colors) and the wgpu host that feeds it.

pub mod coords;
pub mod core;
pub mod device;
pub mod interop;
pub mod logging;
pub mod mesh;
pub mod render;
pub mod shading;
pub mod window;
