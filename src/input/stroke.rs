//! Committed freehand strokes and their style.

use crate::draw::{Color, INK_TENSION, Shape, color::BLACK};
use crate::util::Point;
use serde::{Deserialize, Serialize};

/// Pen settings captured when a stroke is committed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Ink color (serialized as `#rrggbb`)
    #[serde(with = "hex_color")]
    pub color: Color,
    /// Line width in canvas pixels (always positive)
    pub width: f64,
    /// Stroke opacity (0.0 - 1.0)
    pub opacity: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: BLACK,
            width: 3.0,
            opacity: 1.0,
        }
    }
}

impl StrokeStyle {
    /// Smallest width a stroke can carry.
    pub const MIN_WIDTH: f64 = 0.1;

    /// Creates a style, forcing width positive and opacity into 0-1.
    pub fn new(color: Color, width: f64, opacity: f64) -> Self {
        Self {
            color,
            width: if width.is_finite() {
                width.max(Self::MIN_WIDTH)
            } else {
                Self::MIN_WIDTH
            },
            opacity: opacity.clamp(0.0, 1.0),
        }
    }
}

/// One committed freehand polyline with fixed style.
///
/// Strokes are immutable after creation: the fields are private and no method
/// hands out mutable access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
    style: StrokeStyle,
}

impl Stroke {
    pub fn new(points: Vec<Point>, style: StrokeStyle) -> Self {
        Self { points, style }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Coordinates flattened as `[x0, y0, x1, y1, ...]`.
    pub fn flat_points(&self) -> Vec<f64> {
        self.points.iter().flat_map(|&(x, y)| [x, y]).collect()
    }

    /// The scene shape that displays this stroke.
    pub fn to_shape(&self) -> Shape {
        Shape::Polyline {
            points: self.points.clone(),
            color: self.style.color,
            width: self.style.width,
            opacity: self.style.opacity,
            tension: INK_TENSION,
        }
    }
}

mod hex_color {
    use crate::draw::Color;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let value = String::deserialize(deserializer)?;
        Color::from_hex(&value).ok_or_else(|| D::Error::custom(format!("invalid color '{value}'")))
    }
}
