//! Shape definitions for the signature scene.

use super::color::Color;
use super::font::FontDescriptor;
use crate::util::Point;
use serde::{Deserialize, Serialize};

/// Tension used when displaying freehand strokes and swooshes.
pub const INK_TENSION: f64 = 0.5;

/// Represents a drawable element of a signature scene.
///
/// Shapes are declarative: they carry their own color, width and opacity so any
/// renderer (raster, vector, document) can reproduce them independently.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Open polyline, displayed as a cardinal spline with `tension`
    Polyline {
        /// Recorded points in draw order
        points: Vec<Point>,
        /// Stroke color
        color: Color,
        /// Line width in canvas pixels
        width: f64,
        /// Whole-shape opacity (0.0 - 1.0)
        opacity: f64,
        /// Display tension between points (0 = straight segments)
        tension: f64,
    },
    /// A single run of text anchored at its top-left corner
    Text {
        /// Left edge of the run
        x: f64,
        /// Top edge of the run
        y: f64,
        /// Text content
        text: String,
        /// Font face
        font: FontDescriptor,
        /// Font size in canvas pixels
        size: f64,
        /// Extra spacing between glyphs in canvas pixels
        letter_spacing: f64,
        /// Fill color
        color: Color,
        /// Whole-run opacity (0.0 - 1.0)
        opacity: f64,
        /// Horizontal shear factor applied about (x, y)
        skew_x: f64,
        /// Ink texture strength (0 - 100); draws a soft shadow under the glyphs
        #[serde(default)]
        texture: f64,
    },
    /// Circle outline
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Color,
        width: f64,
        opacity: f64,
    },
    /// Children rotated together about a pivot
    Group {
        /// Rotation pivot in canvas coordinates
        pivot: Point,
        /// Clockwise rotation in degrees
        rotation: f64,
        children: Vec<Shape>,
    },
}

impl Shape {
    /// Returns true if rendering this shape would emit no marks.
    pub fn is_blank(&self) -> bool {
        match self {
            Shape::Polyline { points, .. } => points.is_empty(),
            Shape::Text { text, .. } => text.trim().is_empty(),
            Shape::Circle { radius, .. } => *radius <= 0.0,
            Shape::Group { children, .. } => children.iter().all(Shape::is_blank),
        }
    }
}
