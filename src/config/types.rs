//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::Hand;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ink and board appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Ink color - a named color (red, green, blue, yellow, orange, white, black)
    /// or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_pen_color")]
    pub pen_color: ColorSpec,

    /// Color of a freshly created or cleared board
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Pen radius in pixels (valid range: 0 - 64)
    #[serde(default = "default_pen_radius")]
    pub pen_radius: i32,

    /// Board texture resolution in pixels per meter (valid range: 64 - 4096)
    #[serde(default = "default_pixels_per_meter")]
    pub pixels_per_meter: f32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            pen_color: default_pen_color(),
            background_color: default_background_color(),
            pen_radius: default_pen_radius(),
            pixels_per_meter: default_pixels_per_meter(),
        }
    }
}

/// Board creation gesture settings.
///
/// Holding the support hand's thumb-middle pinch for `hold_seconds` creates a
/// board; the indicator sphere grows and shifts color while the hold builds up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CalibrationConfig {
    /// Seconds the pinch must be held before a board is created (valid range: 0.0 - 10.0)
    #[serde(default = "default_hold_seconds")]
    pub hold_seconds: f32,

    /// Indicator diameter in meters when the hold starts
    #[serde(default = "default_indicator_min_size")]
    pub indicator_min_size: f32,

    /// Indicator diameter in meters once the hold completes
    #[serde(default = "default_indicator_max_size")]
    pub indicator_max_size: f32,

    /// Indicator color when the hold starts
    #[serde(default = "default_indicator_min_color")]
    pub indicator_min_color: ColorSpec,

    /// Indicator color once the hold completes
    #[serde(default = "default_indicator_max_color")]
    pub indicator_max_color: ColorSpec,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            hold_seconds: default_hold_seconds(),
            indicator_min_size: default_indicator_min_size(),
            indicator_max_size: default_indicator_max_size(),
            indicator_min_color: default_indicator_min_color(),
            indicator_max_color: default_indicator_max_color(),
        }
    }
}

/// Two-handed board move/rotate settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RepositionConfig {
    /// How far in front of the support hand a board is searched for, in meters
    /// (valid range: 0.01 - 2.0)
    #[serde(default = "default_reach_distance")]
    pub reach_distance: f32,

    /// Diameter of the projection markers in meters
    #[serde(default = "default_marker_size")]
    pub marker_size: f32,

    /// Color of the projection markers
    #[serde(default = "default_marker_color")]
    pub marker_color: ColorSpec,
}

impl Default for RepositionConfig {
    fn default() -> Self {
        Self {
            reach_distance: default_reach_distance(),
            marker_size: default_marker_size(),
            marker_color: default_marker_color(),
        }
    }
}

/// Hand assignment and auxiliary gestures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GesturesConfig {
    /// Hand that draws; the other hand creates and anchors boards
    #[serde(default = "default_dominant_hand")]
    pub dominant_hand: Hand,

    /// Pinching the dominant pinky wipes the last board the pen touched
    #[serde(default = "default_true")]
    pub clear_board_on_pinky: bool,

    /// Pinching the support pinky removes every board and restarts the session
    #[serde(default = "default_true")]
    pub reset_session_on_pinky: bool,
}

impl Default for GesturesConfig {
    fn default() -> Self {
        Self {
            dominant_hand: default_dominant_hand(),
            clear_board_on_pinky: true,
            reset_session_on_pinky: true,
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_pen_color() -> ColorSpec {
    ColorSpec::named("black")
}

fn default_background_color() -> ColorSpec {
    ColorSpec::named("white")
}

fn default_pen_radius() -> i32 {
    2
}

fn default_pixels_per_meter() -> f32 {
    1024.0
}

fn default_hold_seconds() -> f32 {
    2.0
}

fn default_indicator_min_size() -> f32 {
    0.01
}

fn default_indicator_max_size() -> f32 {
    0.05
}

fn default_indicator_min_color() -> ColorSpec {
    ColorSpec::named("red")
}

fn default_indicator_max_color() -> ColorSpec {
    ColorSpec::named("green")
}

fn default_reach_distance() -> f32 {
    0.2
}

fn default_marker_size() -> f32 {
    0.01
}

fn default_marker_color() -> ColorSpec {
    ColorSpec::named("white")
}

fn default_dominant_hand() -> Hand {
    Hand::Right
}

fn default_true() -> bool {
    true
}
