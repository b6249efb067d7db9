//! GPU rendering for UI meshes.
//!
//! Renderers issue GPU commands via wgpu and own their GPU resources
//! (pipelines, buffers, bind groups).
//!
//! Convention:
//! - CPU geometry is in pixels (top-left origin, +Y down).
//! - The vertex shader converts to clip space using a screen-size uniform.

mod buffer;
mod ctx;
mod ui;

pub use buffer::GrowableBuffer;
pub use ctx::{RenderCtx, RenderTarget};
pub use ui::{BlendMode, UiRenderer, UiRendererConfig};
