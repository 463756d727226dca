//! Small shared helpers: color names, scalar interpolation, and the pixel
//! rectangle used for dirty region tracking.

use crate::draw::{Color, color::*};

/// Resolves a color name from the config file, ignoring case.
///
/// Known names: red, green, blue, yellow, orange, white, black.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

/// Linear interpolation from `a` to `b`, with `t` clamped to `[0, 1]`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    a + (b - a) * t
}

/// Axis-aligned pixel rectangle used for dirty regions and uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Returns `None` unless both extents are positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Smallest rectangle covering both.
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Intersects the rectangle with `[0, width) x [0, height)`.
    ///
    /// Returns `None` when nothing of the rectangle lies inside the bounds.
    pub fn clamp_to_bounds(self, width: i32, height: i32) -> Option<Rect> {
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = (self.x + self.width).clamp(0, width);
        let max_y = (self.y + self.height).clamp(0, height);
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_to_color_is_case_insensitive() {
        assert_eq!(name_to_color("White").unwrap(), WHITE);
        assert_eq!(name_to_color("BLACK").unwrap(), BLACK);
        assert!(name_to_color("chartreuse").is_none());
    }

    #[test]
    fn rect_union_covers_both() {
        let a = Rect::new(0, 0, 4, 4).unwrap();
        let b = Rect::new(10, 2, 2, 8).unwrap();
        assert_eq!(a.union(b), Rect::new(0, 0, 12, 10).unwrap());
    }

    #[test]
    fn rect_clamp_drops_offscreen_rectangles() {
        let inside = Rect::new(-3, -3, 6, 6).unwrap();
        assert_eq!(inside.clamp_to_bounds(10, 10), Rect::new(0, 0, 3, 3));
        let outside = Rect::new(20, 20, 4, 4).unwrap();
        assert!(outside.clamp_to_bounds(10, 10).is_none());
    }

    #[test]
    fn lerp_clamps_and_handles_nan() {
        assert_eq!(lerp(1.0, 3.0, 0.5), 2.0);
        assert_eq!(lerp(1.0, 3.0, 7.0), 3.0);
        assert_eq!(lerp(1.0, 3.0, f32::NAN), 1.0);
    }
}
