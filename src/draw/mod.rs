//! Pixel-level drawing primitives for board surfaces.
//!
//! This module defines the raster side of a board:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`PixelBuffer`]: the packed pixel store handed to the renderer
//! - [`DrawSurface`]: circle stamping, interpolated strokes and batched commits
//! - [`DirtyTracker`]: damage accumulation between commits

pub mod color;
pub mod dirty;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use dirty::DirtyTracker;
pub use surface::{DrawSurface, PixelBuffer, SurfaceStyle};

pub use color::{BLACK, BLUE, GREEN, ORANGE, RED, WHITE, YELLOW};
