//! Typed signature specification.

use crate::draw::{Color, FontDescriptor, color::BLACK};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Horizontal placement of the primary text on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Decorative shape drawn with the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FlourishKind {
    #[default]
    None,
    Underline,
    DoubleUnderline,
    SwooshLeft,
    SwooshRight,
    Circle,
}

/// Flourish selection plus its stroke size and distance below the text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FlourishStyle {
    pub kind: FlourishKind,
    /// Stroke width; also scales double-underline gap and swoosh height
    pub size: f64,
    /// Distance below the text block
    pub offset: f64,
}

impl Default for FlourishStyle {
    fn default() -> Self {
        Self {
            kind: FlourishKind::None,
            size: 2.0,
            offset: 10.0,
        }
    }
}

/// Everything that determines how a typed signature looks.
///
/// A pure value: the layout is recomputed from this plus the canvas each time.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedSignatureSpec {
    pub full_name: String,
    pub initials: String,
    /// Optional subtitle line (e.g. job title)
    pub title: String,
    /// Render `initials` instead of `full_name`
    pub monogram_mode: bool,
    pub font_family: String,
    /// Font size in canvas pixels
    pub font_size: f64,
    /// CSS-style numeric weight (100-900)
    pub font_weight: u16,
    pub letter_spacing: f64,
    pub line_height: f64,
    /// Lean of the glyphs in degrees; positive leans right
    pub slant: f64,
    /// Extra vertical shift added after centering
    pub baseline_offset: f64,
    /// Clockwise rotation of the whole group in degrees
    pub rotation: f64,
    pub color: Color,
    pub opacity: f64,
    /// Ink texture (0-100): strength of the soft shadow under the glyphs
    pub stroke_texture: f64,
    pub alignment: Alignment,
    pub flourish: FlourishStyle,
}

impl Default for TypedSignatureSpec {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            initials: String::new(),
            title: String::new(),
            monogram_mode: false,
            font_family: "Sacramento".to_string(),
            font_size: 72.0,
            font_weight: 400,
            letter_spacing: 0.0,
            line_height: 1.2,
            slant: 0.0,
            baseline_offset: 0.0,
            rotation: 0.0,
            color: BLACK,
            opacity: 1.0,
            stroke_texture: 0.0,
            alignment: Alignment::Center,
            flourish: FlourishStyle::default(),
        }
    }
}

impl TypedSignatureSpec {
    /// Convenience constructor for a plain named signature.
    pub fn named(full_name: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            ..Self::default()
        }
    }

    /// The primary text after trimming: initials in monogram mode, else the name.
    pub fn display_text(&self) -> &str {
        if self.monogram_mode {
            self.initials.trim()
        } else {
            self.full_name.trim()
        }
    }

    /// True when there is something to draw.
    pub fn has_content(&self) -> bool {
        !self.display_text().is_empty()
    }

    /// The subtitle, when present and the primary text is non-empty.
    pub fn subtitle(&self) -> Option<&str> {
        let title = self.title.trim();
        (self.has_content() && !title.is_empty()).then_some(title)
    }

    /// Font face with the weight collapsed into its rendered bucket.
    pub fn font(&self) -> FontDescriptor {
        FontDescriptor::from_numeric_weight(&self.font_family, self.font_weight)
    }

    /// Horizontal shear factor for the glyph run.
    ///
    /// Canvas y grows downwards, so a rightward lean needs a negative factor.
    pub fn skew_x(&self) -> f64 {
        -self.slant.to_radians().tan()
    }
}
