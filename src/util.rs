//! Geometry helpers shared by smoothing, flourishes and rendering.
//!
//! This module provides:
//! - Point distance and linear interpolation
//! - Cardinal-spline to cubic Bézier conversion used to display tension
//!   between recorded points

/// A 2D point in canvas coordinates.
pub type Point = (f64, f64);

// ============================================================================
// Point Math
// ============================================================================

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

/// Linear interpolation `a + t·(b − a)`.
pub fn lerp(a: Point, b: Point, t: f64) -> Point {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

// ============================================================================
// Curve Display
// ============================================================================

/// One cubic Bézier segment: start, two control points, end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// Converts a polyline into cubic segments of a cardinal spline through every point.
///
/// `tension` of 0 yields straight segments; 0.5 matches the soft ink look used for
/// strokes and swooshes. Control points for an interior point are placed along the
/// chord of its neighbours, split in proportion to the adjacent segment lengths.
/// End points use themselves as the outer control point.
///
/// Returns an empty vector for fewer than two points.
pub fn cardinal_segments(points: &[Point], tension: f64) -> Vec<CubicSegment> {
    if points.len() < 2 {
        return Vec::new();
    }

    // (incoming, outgoing) control point for every input point
    let controls: Vec<(Point, Point)> = points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            if i == 0 || i + 1 == points.len() || tension == 0.0 {
                return (p, p);
            }
            let prev = points[i - 1];
            let next = points[i + 1];
            let d01 = distance(prev, p);
            let d12 = distance(p, next);
            let total = d01 + d12;
            if total == 0.0 {
                return (p, p);
            }
            let fa = tension * d01 / total;
            let fb = tension * d12 / total;
            let chord = (next.0 - prev.0, next.1 - prev.1);
            (
                (p.0 - fa * chord.0, p.1 - fa * chord.1),
                (p.0 + fb * chord.0, p.1 + fb * chord.1),
            )
        })
        .collect();

    points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| CubicSegment {
            from: pair[0],
            ctrl1: controls[i].1,
            ctrl2: controls[i + 1].0,
            to: pair[1],
        })
        .collect()
}
