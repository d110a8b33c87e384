//! Scene container: canvas dimensions plus the ordered shapes to draw.

use super::color::{Color, WHITE};
use super::shape::Shape;
use crate::export::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer raster scale factor applied at export (1×, 2× or 3×).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PixelRatio(u32);

impl PixelRatio {
    pub const X1: PixelRatio = PixelRatio(1);
    pub const X2: PixelRatio = PixelRatio(2);
    pub const X3: PixelRatio = PixelRatio(3);

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl Default for PixelRatio {
    fn default() -> Self {
        Self::X2
    }
}

impl TryFrom<u32> for PixelRatio {
    type Error = ExportError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1..=3 => Ok(Self(value)),
            other => Err(ExportError::InvalidPixelRatio(other)),
        }
    }
}

impl From<PixelRatio> for u32 {
    fn from(ratio: PixelRatio) -> Self {
        ratio.0
    }
}

impl fmt::Display for PixelRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

/// Logical canvas the signature is composed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSpec {
    /// Width in canvas pixels
    pub width: u32,
    /// Height in canvas pixels
    pub height: u32,
    /// Raster export multiplier
    pub pixel_ratio: PixelRatio,
    /// When false, `background` is painted beneath the signature
    pub transparent: bool,
    /// Fill used for non-transparent canvases
    pub background: Color,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 600,
            height: 200,
            pixel_ratio: PixelRatio::default(),
            transparent: true,
            background: WHITE,
        }
    }
}

impl CanvasSpec {
    pub fn new(width: u32, height: u32, pixel_ratio: PixelRatio) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
            ..Self::default()
        }
    }

    /// Raster dimensions after applying the pixel ratio.
    pub fn scaled_size(&self) -> (u32, u32) {
        let r = self.pixel_ratio.get();
        (self.width * r, self.height * r)
    }

    /// The background fill, or `None` for transparent canvases.
    pub fn background_fill(&self) -> Option<Color> {
        (!self.transparent).then_some(self.background)
    }
}

/// Everything needed to render a signature: the canvas and its shapes.
///
/// Shapes are drawn in order (first = bottom). A scene owns plain data only,
/// so it can be moved to a worker thread for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub canvas: CanvasSpec,
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// Creates a new empty scene on the given canvas.
    pub fn new(canvas: CanvasSpec) -> Self {
        Self {
            canvas,
            shapes: Vec::new(),
        }
    }

    /// Adds a shape on top of the existing ones.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Returns true if no shape would leave a mark.
    pub fn is_empty(&self) -> bool {
        self.shapes.iter().all(Shape::is_blank)
    }

    /// Fails with [`ExportError::InsufficientContent`] when there is nothing to export.
    pub fn ensure_content(&self) -> Result<(), ExportError> {
        if self.is_empty() {
            Err(ExportError::InsufficientContent)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::BLACK;
    use crate::draw::shape::INK_TENSION;

    #[test]
    fn pixel_ratio_accepts_one_to_three() {
        for value in 1..=3 {
            assert_eq!(PixelRatio::try_from(value).unwrap().get(), value);
        }
        assert!(matches!(
            PixelRatio::try_from(0),
            Err(ExportError::InvalidPixelRatio(0))
        ));
        assert!(matches!(
            PixelRatio::try_from(4),
            Err(ExportError::InvalidPixelRatio(4))
        ));
    }

    #[test]
    fn scaled_size_multiplies_both_axes() {
        let canvas = CanvasSpec::new(600, 200, PixelRatio::X3);
        assert_eq!(canvas.scaled_size(), (1800, 600));
    }

    #[test]
    fn background_fill_only_for_opaque_canvas() {
        let mut canvas = CanvasSpec::default();
        assert!(canvas.background_fill().is_none());
        canvas.transparent = false;
        assert_eq!(canvas.background_fill(), Some(WHITE));
    }

    #[test]
    fn scene_without_marks_has_insufficient_content() {
        let mut scene = Scene::new(CanvasSpec::default());
        assert!(matches!(
            scene.ensure_content(),
            Err(ExportError::InsufficientContent)
        ));

        scene.push(Shape::Polyline {
            points: vec![(10.0, 10.0), (40.0, 12.0)],
            color: BLACK,
            width: 3.0,
            opacity: 1.0,
            tension: INK_TENSION,
        });
        assert!(scene.ensure_content().is_ok());
    }
}
