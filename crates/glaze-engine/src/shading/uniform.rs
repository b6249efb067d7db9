use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;

/// Per-frame uniform read by the vertex stage (`@group(0) @binding(0)`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ScreenUniform {
    pub screen_size: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ScreenUniform {
    /// Builds the uniform for a render target of `viewport` pixels.
    ///
    /// Each axis is clamped to at least one pixel so the shader never divides by zero.
    #[inline]
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self {
            screen_size: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }

    /// Minimum binding size for the bind group layout entry.
    pub fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<ScreenUniform>() as u64)
            .expect("ScreenUniform has non-zero size by construction")
    }
}

impl From<Viewport> for ScreenUniform {
    fn from(viewport: Viewport) -> Self {
        Self::from_viewport(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<ScreenUniform>(), 16);
        assert_eq!(ScreenUniform::min_binding_size().get(), 16);
    }

    #[test]
    fn from_viewport_copies_size() {
        let u = ScreenUniform::from_viewport(Viewport::new(1360.0, 768.0));
        assert_eq!(u.screen_size, [1360.0, 768.0]);
        assert_eq!(u._pad, [0.0, 0.0]);
    }

    #[test]
    fn from_viewport_clamps_degenerate_axes() {
        let u = ScreenUniform::from_viewport(Viewport::new(0.0, -5.0));
        assert_eq!(u.screen_size, [1.0, 1.0]);
    }

    #[test]
    fn size_lands_in_first_eight_bytes() {
        let u = ScreenUniform::from(Viewport::new(640.0, 480.0));
        let bytes = bytemuck::bytes_of(&u);
        assert_eq!(&bytes[0..4], &640.0f32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &480.0f32.to_ne_bytes());
    }
}
