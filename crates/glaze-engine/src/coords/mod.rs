//! Coordinate types shared by the shading stage and its host.
//!
//! Canonical CPU space:
//! - pixels
//! - origin top-left
//! - +X right, +Y down
//!
//! The vertex stage converts to clip space using a viewport uniform.

mod viewport;

pub use viewport::Viewport;
