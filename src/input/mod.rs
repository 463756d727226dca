//! Hand input: tracking snapshots, the fingertip pen and stroke processing.
//!
//! This module turns raw tracking data into drawing input. It samples both
//! hands once per tick, detects fingertip contact with boards, and converts
//! the resulting contact stream into interpolated strokes.

pub mod pen;
pub mod stroke;
pub mod tracking;

// Re-export commonly used types at module level
pub use pen::{Pen, PenUpdate};
pub use stroke::{StrokeInputProcessor, StrokeState};
pub use tracking::{Finger, Hand, HandSnapshot, HandTracker, Landmark, TrackingFrame};
