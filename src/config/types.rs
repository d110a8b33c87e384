//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::{CanvasSpec, PixelRatio};
use crate::export::ExportFormat;
use crate::input::PenSettings;
use crate::typed::{Alignment, FlourishKind, FlourishStyle, TypedSignatureSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Typed signature defaults.
///
/// The text itself (name, initials, title) is per-signature and never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TypedConfig {
    /// Font family name (e.g., "Sacramento", "Great Vibes", "Dancing Script")
    /// Install fonts system-wide and reference by family name
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font size in canvas pixels (valid range: 8 - 200)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Numeric font weight (valid range: 100 - 900)
    /// 700 and above render bold, 300 and below render light
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,

    /// Extra spacing between glyphs in pixels
    #[serde(default)]
    pub letter_spacing: f64,

    /// Line height multiplier (valid range: 0.5 - 3.0)
    #[serde(default = "default_line_height")]
    pub line_height: f64,

    /// Glyph lean in degrees (valid range: -45 - 45)
    #[serde(default)]
    pub slant: f64,

    /// Vertical shift after centering, in pixels
    #[serde(default)]
    pub baseline_offset: f64,

    /// Clockwise rotation in degrees (valid range: -180 - 180)
    #[serde(default)]
    pub rotation: f64,

    /// Ink color
    #[serde(default = "default_ink")]
    pub color: ColorSpec,

    /// Opacity (valid range: 0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Ink texture: strength of the soft shadow under the glyphs (valid range: 0 - 100)
    #[serde(default)]
    pub stroke_texture: f64,

    /// Horizontal alignment (left, center, right)
    #[serde(default)]
    pub alignment: Alignment,

    /// Flourish (none, underline, double-underline, swoosh-left, swoosh-right, circle)
    #[serde(default)]
    pub flourish: FlourishKind,

    /// Flourish stroke width
    #[serde(default = "default_flourish_size")]
    pub flourish_size: f64,

    /// Distance of the flourish below the text
    #[serde(default = "default_flourish_offset")]
    pub flourish_offset: f64,
}

impl Default for TypedConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            letter_spacing: 0.0,
            line_height: default_line_height(),
            slant: 0.0,
            baseline_offset: 0.0,
            rotation: 0.0,
            color: default_ink(),
            opacity: default_opacity(),
            stroke_texture: 0.0,
            alignment: Alignment::default(),
            flourish: FlourishKind::default(),
            flourish_size: default_flourish_size(),
            flourish_offset: default_flourish_offset(),
        }
    }
}

impl TypedConfig {
    /// A typed spec with these styles and no text.
    pub fn to_spec(&self) -> TypedSignatureSpec {
        TypedSignatureSpec {
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight,
            letter_spacing: self.letter_spacing,
            line_height: self.line_height,
            slant: self.slant,
            baseline_offset: self.baseline_offset,
            rotation: self.rotation,
            color: self.color.to_color(),
            opacity: self.opacity,
            stroke_texture: self.stroke_texture,
            alignment: self.alignment,
            flourish: FlourishStyle {
                kind: self.flourish,
                size: self.flourish_size,
                offset: self.flourish_offset,
            },
            ..TypedSignatureSpec::default()
        }
    }
}

/// Freehand pen defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FreehandConfig {
    /// Pen color
    #[serde(default = "default_ink")]
    pub pen_color: ColorSpec,

    /// Pen width in pixels (valid range: 0.5 - 50.0)
    #[serde(default = "default_pen_size")]
    pub pen_size: f64,

    /// Pen opacity (valid range: 0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Smoothing percentage (valid range: 0 - 100)
    /// 0 keeps raw pointer samples, 100 damps them the most
    #[serde(default = "default_smoothing")]
    pub smoothing: f64,
}

impl Default for FreehandConfig {
    fn default() -> Self {
        Self {
            pen_color: default_ink(),
            pen_size: default_pen_size(),
            opacity: default_opacity(),
            smoothing: default_smoothing(),
        }
    }
}

impl FreehandConfig {
    pub fn pen_settings(&self) -> PenSettings {
        PenSettings {
            color: self.pen_color.to_color(),
            width: self.pen_size,
            opacity: self.opacity,
            smoothing: self.smoothing,
        }
    }
}

/// Canvas defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 50 - 4000)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Canvas height in pixels (valid range: 50 - 4000)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Raster export multiplier (1, 2 or 3)
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: u32,

    /// Keep the background transparent
    #[serde(default = "default_transparent")]
    pub transparent: bool,

    /// Background fill used when `transparent` is false
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            pixel_ratio: default_pixel_ratio(),
            transparent: default_transparent(),
            background: default_background(),
        }
    }
}

impl CanvasConfig {
    /// Canvas spec for these settings; an out-of-range ratio falls back to the default.
    pub fn canvas_spec(&self) -> CanvasSpec {
        CanvasSpec {
            width: self.width,
            height: self.height,
            pixel_ratio: PixelRatio::try_from(self.pixel_ratio).unwrap_or_default(),
            transparent: self.transparent,
            background: self.background.to_color(),
        }
    }
}

/// Export defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Output format (png, svg, pdf)
    #[serde(default)]
    pub format: ExportFormat,

    /// Trim transparent margins from raster exports
    #[serde(default = "default_trim")]
    pub trim: bool,

    /// Padding kept around trimmed content, in canvas pixels (valid range: 0 - 200)
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// Directory exports are saved to (supports `~/`)
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            trim: default_trim(),
            padding: default_padding(),
            output_dir: default_output_dir(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_font_family() -> String {
    "Sacramento".to_string()
}

fn default_font_size() -> f64 {
    72.0
}

fn default_font_weight() -> u16 {
    400
}

fn default_line_height() -> f64 {
    1.2
}

fn default_ink() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_opacity() -> f64 {
    1.0
}

fn default_flourish_size() -> f64 {
    2.0
}

fn default_flourish_offset() -> f64 {
    10.0
}

fn default_pen_size() -> f64 {
    3.0
}

fn default_smoothing() -> f64 {
    50.0
}

fn default_canvas_width() -> u32 {
    600
}

fn default_canvas_height() -> u32 {
    200
}

fn default_pixel_ratio() -> u32 {
    2
}

fn default_transparent() -> bool {
    true
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_trim() -> bool {
    true
}

fn default_padding() -> u32 {
    20
}

fn default_output_dir() -> String {
    "~/Pictures/Signatures".to_string()
}
