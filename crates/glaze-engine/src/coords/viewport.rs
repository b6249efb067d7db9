/// Render-target size in pixels.
///
/// This is the basis the vertex stage uses to map pixel positions to clip
/// space. It is uploaded once per frame, so it must describe the target being
/// drawn into at that moment.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Initial window size used when nothing else is configured.
    pub const DEFAULT: Viewport = Viewport::new(1360.0, 768.0);

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn from_physical(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub const fn size(self) -> [f32; 2] {
        [self.width, self.height]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constant_matches_initial_window() {
        assert_eq!(Viewport::DEFAULT.size(), [1360.0, 768.0]);
    }

    #[test]
    fn from_physical_converts_dimensions() {
        assert_eq!(Viewport::from_physical(800, 600), Viewport::new(800.0, 600.0));
    }

    #[test]
    fn zero_and_non_finite_sizes_are_invalid() {
        assert!(Viewport::new(1.0, 1.0).is_valid());
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert!(!Viewport::new(800.0, 0.0).is_valid());
        assert!(!Viewport::new(f32::INFINITY, 600.0).is_valid());
        assert!(!Viewport::new(800.0, f32::NAN).is_valid());
        assert!(!Viewport::default().is_valid());
    }
}
