//! RGBA color type, hex conversion and the named palette.

use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use autograph::draw::Color;
/// let navy = Color::from_hex("#1e3a8a").unwrap();
/// assert_eq!(navy.to_hex(), "#1e3a8a");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 0-255 channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses `#rrggbb` or `#rgb` (leading `#` optional) into an opaque color.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                Some(Self::from_rgb8(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => None,
        }
    }

    /// Formats the RGB channels as a lowercase `#rrggbb` string (alpha is dropped).
    pub fn to_hex(&self) -> String {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }

    /// Returns the same color with its alpha multiplied by `opacity`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Maps color name strings to Color values.
///
/// Used by the configuration system and the CLI to accept friendly names.
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "black" => Some(BLACK),
        "white" => Some(WHITE),
        "navy" => Some(NAVY),
        "blue" => Some(BLUE),
        "slate" => Some(SLATE),
        "red" => Some(RED),
        _ => None,
    }
}

/// Ink black, the default pen and text color.
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Paper white, the default opaque canvas background.
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Executive navy (#1e3a8a)
pub const NAVY: Color = Color {
    r: 30.0 / 255.0,
    g: 58.0 / 255.0,
    b: 138.0 / 255.0,
    a: 1.0,
};

/// Ballpoint blue (#1e40af)
pub const BLUE: Color = Color {
    r: 30.0 / 255.0,
    g: 64.0 / 255.0,
    b: 175.0 / 255.0,
    a: 1.0,
};

/// Slate grey (#4a5568)
pub const SLATE: Color = Color {
    r: 74.0 / 255.0,
    g: 85.0 / 255.0,
    b: 104.0 / 255.0,
    a: 1.0,
};

/// Red ink (#b91c1c)
pub const RED: Color = Color {
    r: 185.0 / 255.0,
    g: 28.0 / 255.0,
    b: 28.0 / 255.0,
    a: 1.0,
};
