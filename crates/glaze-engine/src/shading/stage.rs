//! CPU reference for the two shader stages in `shaders/ui.wgsl`.
//!
//! These functions mirror the WGSL entry points exactly and are what the tests
//! pin down. The GPU never calls them.

use crate::coords::Viewport;

use super::{LinearRgba, Vertex};

/// Vertex stage output / fragment stage input.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ShadedVertex {
    /// Homogeneous clip-space position. `z = 0`, `w = 1` for all UI geometry.
    pub clip_position: [f32; 4],
    pub color: LinearRgba,
}

/// Maps a pixel-space position to clip space for a target of `viewport` pixels.
///
/// Pixel space has its origin at the top-left with +Y down; clip space is
/// centered with +Y up. Positions outside the viewport map outside `[-1, 1]`
/// and are left to the fixed-function clipper.
#[inline]
pub fn pixel_to_clip(position: [f32; 2], viewport: Viewport) -> [f32; 4] {
    let [x, y] = position;
    let x_ndc = (x / viewport.width) * 2.0 - 1.0;
    let y_ndc = 1.0 - (y / viewport.height) * 2.0;
    [x_ndc, y_ndc, 0.0, 1.0]
}

/// `vs_main`: transforms the position and unpacks the color. The uv is not read.
#[inline]
pub fn vertex_stage(vertex: &Vertex, viewport: Viewport) -> ShadedVertex {
    ShadedVertex {
        clip_position: pixel_to_clip(vertex.position, viewport),
        color: vertex.color.decode(),
    }
}

/// `fs_main`: the interpolated color is the output color.
#[inline]
pub fn fragment_stage(input: &ShadedVertex) -> LinearRgba {
    input.color
}
