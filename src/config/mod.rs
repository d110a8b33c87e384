//! Configuration file support for autograph.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/autograph/config.toml`. Settings cover typed signature styling,
//! freehand pen defaults, the canvas and export preferences.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, ExportConfig, FreehandConfig, TypedConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [typed]
/// font_family = "Great Vibes"
/// font_size = 64.0
/// slant = 8.0
/// flourish = "swoosh-right"
///
/// [freehand]
/// pen_color = "navy"
/// pen_size = 2.5
/// smoothing = 60
///
/// [canvas]
/// width = 800
/// height = 250
/// pixel_ratio = 3
///
/// [export]
/// format = "pdf"
/// padding = 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Typed signature styling
    #[serde(default)]
    pub typed: TypedConfig,

    /// Freehand pen defaults
    #[serde(default)]
    pub freehand: FreehandConfig,

    /// Canvas size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Export format, trimming and destination
    #[serde(default)]
    pub export: ExportConfig,
}

/// Clamps `value` into `min..=max`, warning when it was out of range.
fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if value.is_nan() {
        log::warn!("Invalid {} NaN, using {:.1}", name, min);
        *value = min;
    } else if !(min..=max).contains(value) {
        log::warn!(
            "Invalid {} {:.1}, clamping to {:.1}-{:.1} range",
            name,
            value,
            min,
            max
        );
        *value = value.clamp(min, max);
    }
}

fn clamp_int<T: PartialOrd + Copy + std::fmt::Display + Ord>(
    name: &str,
    value: &mut T,
    min: T,
    max: T,
) {
    if !(min..=max).contains(value) {
        log::warn!(
            "Invalid {} {}, clamping to {}-{} range",
            name,
            value,
            min,
            max
        );
        *value = (*value).clamp(min, max);
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    pub fn validate_and_clamp(&mut self) {
        let typed = &mut self.typed;
        clamp_f64("font_size", &mut typed.font_size, 8.0, 200.0);
        clamp_int("font_weight", &mut typed.font_weight, 100, 900);
        clamp_f64("line_height", &mut typed.line_height, 0.5, 3.0);
        clamp_f64("slant", &mut typed.slant, -45.0, 45.0);
        clamp_f64("rotation", &mut typed.rotation, -180.0, 180.0);
        clamp_f64("typed opacity", &mut typed.opacity, 0.0, 1.0);
        clamp_f64("stroke_texture", &mut typed.stroke_texture, 0.0, 100.0);
        clamp_f64("flourish_size", &mut typed.flourish_size, 0.5, 20.0);

        let freehand = &mut self.freehand;
        clamp_f64("pen_size", &mut freehand.pen_size, 0.5, 50.0);
        clamp_f64("pen opacity", &mut freehand.opacity, 0.0, 1.0);
        clamp_f64("smoothing", &mut freehand.smoothing, 0.0, 100.0);

        let canvas = &mut self.canvas;
        clamp_int("canvas width", &mut canvas.width, 50, 4000);
        clamp_int("canvas height", &mut canvas.height, 50, 4000);
        clamp_int("pixel_ratio", &mut canvas.pixel_ratio, 1, 3);

        clamp_int("padding", &mut self.export.padding, 0, 200);

        if self.typed.font_family.trim().is_empty() {
            log::warn!("Empty font_family, falling back to 'Sacramento'");
            self.typed.font_family = "Sacramento".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/autograph/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("autograph");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Serializes the config to TOML and writes it to `config_path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(Config);
        serde_json::to_value(&schema).unwrap_or_default()
    }
}
