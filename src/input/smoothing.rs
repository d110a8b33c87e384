//! Real-time smoothing of pointer samples into a stroke polyline.
//!
//! Each gesture is filtered by an exponential low-pass: a sample further than
//! [`NOISE_THRESHOLD`] pixels from the last accepted point pulls that point
//! towards itself by `1 − s`, where `s` is the smoothing strength. Samples
//! closer than the threshold are dropped, which keeps a slow pointer from piling
//! up near-duplicate points. The stored geometry is exactly the accepted points;
//! visible curvature comes only from display tension.
//!
//! The strength is the inverse of the lerp factor: smoothing 80 moves each
//! point 20% of the way to the sample. Settings stored as a lerp percentage
//! `p` carry over as smoothing `100 - p`.

use crate::util::{self, Point};

/// Samples at or under this distance (pixels) from the last accepted point are discarded.
pub const NOISE_THRESHOLD: f64 = 2.0;

/// Minimum accepted points for a gesture to become a stroke.
pub const MIN_STROKE_POINTS: usize = 2;

/// One raw pointer position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    /// Milliseconds since an arbitrary epoch; only differences matter
    pub timestamp_ms: u64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, timestamp_ms: u64) -> Self {
        Self { x, y, timestamp_ms }
    }

    pub fn point(&self) -> Point {
        (self.x, self.y)
    }
}

/// Smooths the samples of a single in-flight gesture.
#[derive(Debug, Clone)]
pub struct GestureSmoother {
    strength: f64,
    points: Vec<Point>,
    last: Point,
    started_at: u64,
    last_accepted_at: u64,
}

impl GestureSmoother {
    /// Starts a gesture at `start`, which is always the first accepted point.
    ///
    /// `strength` is clamped into 0.0 (raw samples) - 1.0 (fully damped).
    pub fn begin(start: PointerSample, strength: f64) -> Self {
        let strength = if strength.is_finite() {
            strength.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            strength,
            points: vec![start.point()],
            last: start.point(),
            started_at: start.timestamp_ms,
            last_accepted_at: start.timestamp_ms,
        }
    }

    /// Feeds one sample; returns the accepted (smoothed) point, if any.
    pub fn push(&mut self, sample: PointerSample) -> Option<Point> {
        let raw = sample.point();
        if util::distance(self.last, raw) <= NOISE_THRESHOLD {
            return None;
        }

        let accepted = util::lerp(self.last, raw, 1.0 - self.strength);
        self.points.push(accepted);
        self.last = accepted;
        self.last_accepted_at = sample.timestamp_ms;
        Some(accepted)
    }

    /// Accepted points so far, for live preview.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Time between the first and the most recent accepted sample.
    pub fn duration_ms(&self) -> u64 {
        self.last_accepted_at.saturating_sub(self.started_at)
    }

    /// Ends the gesture, returning the polyline or `None` for a tap.
    pub fn finish(self) -> Option<Vec<Point>> {
        (self.points.len() >= MIN_STROKE_POINTS).then_some(self.points)
    }
}

/// Smooths a complete sample stream in one go.
///
/// Returns `None` when the stream is empty or produces fewer than
/// [`MIN_STROKE_POINTS`] accepted points.
pub fn smooth_samples(samples: &[PointerSample], strength: f64) -> Option<Vec<Point>> {
    let (first, rest) = samples.split_first()?;
    let mut smoother = GestureSmoother::begin(*first, strength);
    for sample in rest {
        smoother.push(*sample);
    }
    smoother.finish()
}
