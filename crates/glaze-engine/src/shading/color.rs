use bytemuck::{Pod, Zeroable};

/// RGBA8 color packed into a single `u32`, red in the least-significant byte.
///
/// This is the on-wire vertex color format. Reading the four bytes in memory
/// order on a little-endian host yields `[r, g, b, a]`.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const BLACK: Self = Self(0xFF00_0000);

    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(u32::from_le_bytes([r, g, b, a]))
    }

    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 0xFF)
    }

    /// Returns `[r, g, b, a]`.
    #[inline]
    pub const fn channels(self) -> [u8; 4] {
        let c = self.0;
        [
            (c & 0xFF) as u8,
            ((c >> 8) & 0xFF) as u8,
            ((c >> 16) & 0xFF) as u8,
            ((c >> 24) & 0xFF) as u8,
        ]
    }

    /// Unpacks the four channels to floats in `[0, 1]`.
    ///
    /// This is a plain bit unpack: no sRGB transfer function is applied, so the
    /// result is in whatever space the packed bytes were authored in.
    #[inline]
    pub fn decode(self) -> LinearRgba {
        let [r, g, b, a] = self.channels();
        LinearRgba::new(unorm8(r), unorm8(g), unorm8(b), unorm8(a))
    }
}

impl From<u32> for PackedColor {
    #[inline]
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<[u8; 4]> for PackedColor {
    #[inline]
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_rgba(r, g, b, a)
    }
}

#[inline]
fn unorm8(v: u8) -> f32 {
    f32::from(v) / 255.0
}

/// Four-channel float color as produced by the vertex stage.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LinearRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantizes back to RGBA8, rounding to nearest and clamping to `[0, 1]`.
    #[inline]
    pub fn quantize(self) -> PackedColor {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        PackedColor::from_rgba(q(self.r), q(self.g), q(self.b), q(self.a))
    }

    /// Weighted sum `self * wa + b * wb + c * wc`.
    ///
    /// This is what the rasterizer does across a triangle with barycentric weights.
    #[inline]
    pub fn blend3(self, b: Self, c: Self, [wa, wb, wc]: [f32; 3]) -> Self {
        Self::new(
            self.r * wa + b.r * wb + c.r * wc,
            self.g * wa + b.g * wb + c.g * wc,
            self.b * wa + b.b * wb + c.b * wc,
            self.a * wa + b.a * wb + c.a * wc,
        )
    }
}

impl From<LinearRgba> for wgpu::Color {
    fn from(c: LinearRgba) -> Self {
        wgpu::Color {
            r: c.r as f64,
            g: c.g as f64,
            b: c.b as f64,
            a: c.a as f64,
        }
    }
}
