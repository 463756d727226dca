//! Transient visual markers shown while a gesture is in progress.

use crate::draw::Color;
use glam::Vec3;

/// A small sphere the host renders for operator feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub position: Vec3,
    /// Diameter in meters
    pub size: f32,
    pub color: Color,
    pub visible: bool,
}

impl Indicator {
    pub fn new(position: Vec3, size: f32, color: Color) -> Self {
        Self {
            position,
            size,
            color,
            visible: true,
        }
    }

    /// A marker that starts hidden at the origin.
    pub fn hidden(size: f32, color: Color) -> Self {
        Self {
            visible: false,
            ..Self::new(Vec3::ZERO, size, color)
        }
    }
}
