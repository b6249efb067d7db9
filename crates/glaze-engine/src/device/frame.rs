use crate::coords::Viewport;

/// A single acquired frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
pub struct GpuFrame {
    /// Sequence number of this frame on its `Gpu`, starting at 0.
    pub index: u64,
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Size of the texture this frame renders into.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        let tex = &self.surface_texture.texture;
        Viewport::from_physical(tex.width(), tex.height())
    }
}
