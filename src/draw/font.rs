//! Font descriptor for text rendering.

use serde::{Deserialize, Serialize};

/// Font configuration for text rendering.
///
/// Describes which font to use: the family name and the weight bucket.
/// Lean comes from a skew transform rather than an italic face. This descriptor is passed through the layout and rendering pipeline so that
/// measurement and drawing agree on the exact face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sacramento", "Great Vibes", "Sans")
    /// Reference installed system fonts by name
    pub family: String,

    /// Font weight keyword ("normal", "bold", "light")
    pub weight: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sacramento".to_string(),
            weight: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    /// Builds a descriptor from a numeric CSS-style weight (100-900).
    ///
    /// Weights collapse into three buckets: 700 and above render bold, 300 and
    /// below render light, everything in between renders normal.
    pub fn from_numeric_weight(family: &str, weight: u16) -> Self {
        Self {
            family: family.to_string(),
            weight: weight_bucket(weight).to_string(),
        }
    }

    /// Converts this font descriptor to a Pango font description string.
    ///
    /// Format: "Family Weight Size"
    /// Example: "Sacramento Bold 72" or "Sans 24"
    pub fn to_pango_string(&self, size: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if self.weight.to_lowercase() != "normal" {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}", size.round() as i32));

        parts.join(" ")
    }

    /// Builds a Pango description sized in device pixels rather than points.
    ///
    /// Signature sizes are specified in canvas pixels, so the point size from
    /// the description string is replaced by an absolute size.
    pub fn pango_description(&self, size_px: f64) -> pango::FontDescription {
        let mut desc = pango::FontDescription::from_string(&self.to_pango_string(size_px));
        desc.set_absolute_size(size_px * pango::SCALE as f64);
        desc
    }
}

/// Maps a numeric weight onto the three rendered weight keywords.
pub fn weight_bucket(weight: u16) -> &'static str {
    if weight >= 700 {
        "bold"
    } else if weight <= 300 {
        "light"
    } else {
        "normal"
    }
}

/// Capitalizes the first letter of a string.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
