use bytemuck::{Pod, Zeroable};

use super::PackedColor;

/// One UI mesh vertex as laid out in the vertex buffer.
///
/// Layout (20 bytes, tightly packed):
/// - location 0: `position`, pixels, top-left origin, +Y down
/// - location 1: `uv`, reserved for texturing and ignored by the shader
/// - location 2: `color`, packed RGBA8
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: PackedColor,
}

impl Vertex {
    pub const STRIDE: u64 = std::mem::size_of::<Vertex>() as u64;

    pub(crate) const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2, // uv
        2 => Uint32     // color
    ];

    #[inline]
    pub const fn new(position: [f32; 2], color: PackedColor) -> Self {
        Self { position, uv: [0.0, 0.0], color }
    }

    #[inline]
    pub const fn with_uv(self, uv: [f32; 2]) -> Self {
        Self { uv, ..self }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}
