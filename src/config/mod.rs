//! Configuration file support for airboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/airboard/config.toml`. Settings include ink defaults, the board
//! creation hold, repositioning reach, and hand assignment.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CalibrationConfig, DrawingConfig, GesturesConfig, RepositionConfig};

use crate::draw::{self, SurfaceStyle};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while locating, reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the user config directory")]
    NoConfigDir,

    #[error("failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// pen_color = "blue"
/// pen_radius = 3
///
/// [calibration]
/// hold_seconds = 1.5
///
/// [reposition]
/// reach_distance = 0.25
///
/// [gestures]
/// dominant_hand = "left"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Ink and board appearance
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Board creation gesture
    #[serde(default)]
    pub calibration: CalibrationConfig,

    /// Two-handed move/rotate gesture
    #[serde(default)]
    pub reposition: RepositionConfig,

    /// Hand assignment and auxiliary gestures
    #[serde(default)]
    pub gestures: GesturesConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `pen_radius`: 0 - 64
    /// - `pixels_per_meter`: 64.0 - 4096.0
    /// - `hold_seconds`: 0.0 - 10.0
    /// - indicator and marker sizes: 0.001 - 1.0, max size at least min size
    /// - `reach_distance`: 0.01 - 2.0
    pub fn validate_and_clamp(&mut self) {
        if !(0..=64).contains(&self.drawing.pen_radius) {
            warn!(
                "Invalid pen_radius {}, clamping to 0-64 range",
                self.drawing.pen_radius
            );
            self.drawing.pen_radius = self.drawing.pen_radius.clamp(0, 64);
        }

        clamp_f32(
            "pixels_per_meter",
            &mut self.drawing.pixels_per_meter,
            64.0,
            4096.0,
            1024.0,
        );
        clamp_f32(
            "hold_seconds",
            &mut self.calibration.hold_seconds,
            0.0,
            10.0,
            2.0,
        );
        clamp_f32(
            "indicator_min_size",
            &mut self.calibration.indicator_min_size,
            0.001,
            1.0,
            0.01,
        );
        clamp_f32(
            "indicator_max_size",
            &mut self.calibration.indicator_max_size,
            0.001,
            1.0,
            0.05,
        );
        if self.calibration.indicator_max_size < self.calibration.indicator_min_size {
            warn!(
                "indicator_max_size {:.3} is below indicator_min_size {:.3}, raising it",
                self.calibration.indicator_max_size, self.calibration.indicator_min_size
            );
            self.calibration.indicator_max_size = self.calibration.indicator_min_size;
        }
        clamp_f32(
            "reach_distance",
            &mut self.reposition.reach_distance,
            0.01,
            2.0,
            0.2,
        );
        clamp_f32(
            "marker_size",
            &mut self.reposition.marker_size,
            0.001,
            1.0,
            0.01,
        );

        for (name, spec, fallback) in [
            ("pen_color", &mut self.drawing.pen_color, "black"),
            ("background_color", &mut self.drawing.background_color, "white"),
            (
                "indicator_min_color",
                &mut self.calibration.indicator_min_color,
                "red",
            ),
            (
                "indicator_max_color",
                &mut self.calibration.indicator_max_color,
                "green",
            ),
            ("marker_color", &mut self.reposition.marker_color, "white"),
        ] {
            if !spec.is_valid() {
                warn!("Invalid {} {:?}, falling back to '{}'", name, spec, fallback);
                *spec = ColorSpec::named(fallback);
            }
        }
    }

    /// Appearance applied to every new or cleared board.
    pub fn surface_style(&self) -> SurfaceStyle {
        SurfaceStyle {
            background: self.drawing.background_color.to_color_or(draw::WHITE),
            pen_color: self.drawing.pen_color.to_color_or(draw::BLACK),
            pen_radius: self.drawing.pen_radius,
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/airboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("airboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config = toml::from_str(&config_str).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Renders the configuration as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Saves the configuration to `path`, creating parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let config_str = self.to_toml_string()?;
        fs::write(path, config_str).map_err(write_err)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_f32(name: &str, value: &mut f32, min: f32, max: f32, fallback: f32) {
    if value.is_nan() {
        warn!("Invalid {} NaN, using {:.3}", name, fallback);
        *value = fallback;
    } else if !(min..=max).contains(&*value) {
        warn!(
            "Invalid {} {:.3}, clamping to {:.3}-{:.3} range",
            name, value, min, max
        );
        *value = value.clamp(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Hand;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.drawing.pixels_per_meter, 1024.0);
        assert_eq!(config.calibration.hold_seconds, 2.0);
        assert_eq!(config.reposition.reach_distance, 0.2);
        assert_eq!(config.gestures.dominant_hand, Hand::Right);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [drawing]
            pen_color = [0, 0, 255]

            [gestures]
            dominant_hand = "left"
            "#,
        )
        .unwrap();
        assert_eq!(config.drawing.pen_color, ColorSpec::Rgb([0, 0, 255]));
        assert_eq!(config.drawing.pen_radius, 2);
        assert_eq!(config.gestures.dominant_hand, Hand::Left);
        assert!(config.gestures.clear_board_on_pinky);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.drawing.pen_radius = 500;
        config.drawing.pixels_per_meter = f32::NAN;
        config.calibration.hold_seconds = -1.0;
        config.calibration.indicator_min_size = 0.2;
        config.calibration.indicator_max_size = 0.1;
        config.reposition.reach_distance = 50.0;
        config.drawing.pen_color = ColorSpec::named("sparkly");

        config.validate_and_clamp();

        assert_eq!(config.drawing.pen_radius, 64);
        assert_eq!(config.drawing.pixels_per_meter, 1024.0);
        assert_eq!(config.calibration.hold_seconds, 0.0);
        assert_eq!(config.calibration.indicator_max_size, 0.2);
        assert_eq!(config.reposition.reach_distance, 2.0);
        assert_eq!(config.drawing.pen_color, ColorSpec::named("black"));
    }

    #[test]
    fn save_and_load_from_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.drawing.pen_radius = 5;
        config.gestures.dominant_hand = Hand::Left;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[drawing\npen_radius = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("calibration"));
        assert!(schema.contains("dominant_hand"));
    }
}
