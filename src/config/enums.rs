//! Configuration enum types.

use crate::draw::Color;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// pen_color = "black"
///
/// # Custom RGB color (0-255 per component)
/// pen_color = [20, 40, 160]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, white, black
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    pub fn named(name: &str) -> Self {
        ColorSpec::Name(name.to_string())
    }

    /// Whether the specification resolves to a known color.
    pub fn is_valid(&self) -> bool {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).is_some(),
            ColorSpec::Rgb(_) => true,
        }
    }

    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown color names fall back to `fallback` with a warning. RGB arrays
    /// are converted from 0-255 range to 0.0-1.0 range with full opacity.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using fallback", name);
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color {
                r: f32::from(*r) / 255.0,
                g: f32::from(*g) / 255.0,
                b: f32::from(*b) / 255.0,
                a: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, GREEN, RED, WHITE};

    #[test]
    fn named_and_rgb_specs_resolve() {
        assert_eq!(ColorSpec::named("green").to_color_or(BLACK), GREEN);
        assert_eq!(ColorSpec::Rgb([255, 0, 0]).to_color_or(BLACK), RED);
        assert_eq!(ColorSpec::named("mauve").to_color_or(WHITE), WHITE);
        assert!(!ColorSpec::named("mauve").is_valid());
    }
}
