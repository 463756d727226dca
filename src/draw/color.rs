//! RGBA color type, packing helpers and predefined color constants.

use serde::{Deserialize, Serialize};

/// Linear RGBA color, each channel in `0.0..=1.0`.
///
/// # Examples
///
/// ```
/// use airboard::draw::Color;
/// let ink = Color::new(0.1, 0.1, 0.1, 1.0);
/// assert_eq!(ink.to_argb() >> 24, 0xFF);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity; boards are always drawn opaque
    pub a: f32,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Packs the color into a `0xAARRGGBB` pixel.
    pub fn to_argb(self) -> u32 {
        let channel = |v: f32| -> u32 {
            if v.is_nan() {
                0
            } else {
                (v.clamp(0.0, 1.0) * 255.0).round() as u32
            }
        };
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Unpacks a `0xAARRGGBB` pixel.
    pub fn from_argb(pixel: u32) -> Color {
        let channel = |shift: u32| ((pixel >> shift) & 0xFF) as f32 / 255.0;
        Color {
            r: channel(16),
            g: channel(8),
            b: channel(0),
            a: channel(24),
        }
    }
}

/// Calibration indicator color at the start of a hold.
pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

/// Calibration indicator color once a hold completes.
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);

pub const ORANGE: Color = Color::new(1.0, 0.5, 0.0, 1.0);

/// Default board background.
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Default ink.
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_packing_round_trips_primary_colors() {
        assert_eq!(RED.to_argb(), 0xFFFF_0000);
        assert_eq!(GREEN.to_argb(), 0xFF00_FF00);
        assert_eq!(Color::from_argb(0xFF00_00FF), BLUE);
    }

    #[test]
    fn lerp_clamps_parameter() {
        assert_eq!(RED.lerp(GREEN, -1.0), RED);
        assert_eq!(RED.lerp(GREEN, 2.0), GREEN);
        let mid = RED.lerp(GREEN, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.g - 0.5).abs() < 1e-6);
    }
}
