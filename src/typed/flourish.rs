//! Flourish geometry for typed signatures.

use super::spec::{FlourishKind, FlourishStyle};
use crate::draw::{Color, INK_TENSION, Shape};
use crate::util::Point;

/// Extra radius added around the text for the circle flourish.
const CIRCLE_MARGIN: f64 = 10.0;

/// Placement of the text block the flourish decorates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBlock {
    /// Top-left corner of the text
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl TextBlock {
    fn bottom(&self) -> f64 {
        self.origin.1 + self.height
    }

    fn center(&self) -> Point {
        (
            self.origin.0 + self.width / 2.0,
            self.origin.1 + self.height / 2.0,
        )
    }
}

/// Generates the shapes for a flourish around `block`.
///
/// Lines are anchored `style.offset` pixels below the block and span its width;
/// the circle is centred on the block. [`FlourishKind::None`] yields nothing.
pub fn flourish_shapes(
    style: &FlourishStyle,
    block: &TextBlock,
    color: Color,
    opacity: f64,
) -> Vec<Shape> {
    let line = |points: Vec<Point>, tension: f64| Shape::Polyline {
        points,
        color,
        width: style.size,
        opacity,
        tension,
    };

    let left = block.origin.0;
    let right = left + block.width;
    let y = block.bottom() + style.offset;

    match style.kind {
        FlourishKind::None => Vec::new(),
        FlourishKind::Underline => vec![line(vec![(left, y), (right, y)], 0.0)],
        FlourishKind::DoubleUnderline => {
            let y2 = y + style.size * 2.0;
            vec![
                line(vec![(left, y), (right, y)], 0.0),
                line(vec![(left, y2), (right, y2)], 0.0),
            ]
        }
        FlourishKind::SwooshRight | FlourishKind::SwooshLeft => {
            let rise = style.size * 3.0;
            let (start, end) = if style.kind == FlourishKind::SwooshRight {
                (y, y - rise)
            } else {
                (y - rise, y)
            };
            vec![line(
                vec![
                    (left, start),
                    (left + block.width * 0.3, start),
                    (left + block.width * 0.7, end),
                    (right, end),
                ],
                INK_TENSION,
            )]
        }
        FlourishKind::Circle => {
            let (cx, cy) = block.center();
            vec![Shape::Circle {
                cx,
                cy,
                radius: block.width.max(block.height) / 2.0 + CIRCLE_MARGIN,
                color,
                width: style.size,
                opacity,
            }]
        }
    }
}
