//! Freehand drawing state: pen settings, the in-flight gesture, and history.

use super::history::StrokeHistory;
use super::smoothing::{GestureSmoother, PointerSample};
use super::stroke::{Stroke, StrokeStyle};
use crate::draw::{Color, INK_TENSION, Shape, color::BLACK};
use crate::util::Point;
use log::{debug, warn};

/// Current pen settings applied to the next committed stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenSettings {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
    /// Smoothing percentage, 0 (raw) - 100 (fully damped)
    pub smoothing: f64,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self {
            color: BLACK,
            width: 3.0,
            opacity: 1.0,
            smoothing: 50.0,
        }
    }
}

impl PenSettings {
    /// Smoothing strength in 0.0 - 1.0.
    pub fn strength(&self) -> f64 {
        (self.smoothing / 100.0).clamp(0.0, 1.0)
    }

    pub fn style(&self) -> StrokeStyle {
        StrokeStyle::new(self.color, self.width, self.opacity)
    }
}

/// Freehand drawing mode state machine.
#[derive(Debug, Clone)]
pub enum GestureState {
    /// Waiting for a pointer press
    Idle,
    /// Pointer is down; samples are being smoothed
    Drawing(GestureSmoother),
}

/// Freehand canvas: turns pointer gestures into committed strokes.
///
/// The caller serializes begin/move/end events (single pointer). Pen settings
/// are read when a gesture ends, so a stroke is styled by the settings in effect
/// at commit time.
#[derive(Debug, Clone)]
pub struct FreehandCanvas {
    pub pen: PenSettings,
    state: GestureState,
    history: StrokeHistory,
}

impl Default for FreehandCanvas {
    fn default() -> Self {
        Self::new(PenSettings::default())
    }
}

impl FreehandCanvas {
    pub fn new(pen: PenSettings) -> Self {
        Self {
            pen,
            state: GestureState::Idle,
            history: StrokeHistory::new(),
        }
    }

    /// Processes a pointer press.
    ///
    /// A press while a gesture is already active discards the unfinished gesture.
    pub fn begin_gesture(&mut self, sample: PointerSample) {
        if matches!(self.state, GestureState::Drawing(_)) {
            warn!("Pointer pressed during an active gesture; discarding the unfinished stroke");
        }
        self.state = GestureState::Drawing(GestureSmoother::begin(sample, self.pen.strength()));
    }

    /// Processes pointer motion. Ignored while idle.
    ///
    /// Returns the accepted point when the sample survived noise suppression.
    pub fn extend_gesture(&mut self, sample: PointerSample) -> Option<Point> {
        match &mut self.state {
            GestureState::Drawing(smoother) => smoother.push(sample),
            GestureState::Idle => None,
        }
    }

    /// Processes a pointer release (or leave) and commits the stroke.
    ///
    /// Returns `None` when idle or when the gesture had fewer than two accepted
    /// points; nothing is committed in that case.
    pub fn end_gesture(&mut self) -> Option<&Stroke> {
        let GestureState::Drawing(smoother) = std::mem::replace(&mut self.state, GestureState::Idle)
        else {
            return None;
        };

        let duration = smoother.duration_ms();
        match smoother.finish() {
            Some(points) => {
                debug!(
                    "Committing stroke with {} points ({} ms)",
                    points.len(),
                    duration
                );
                self.history.commit(Stroke::new(points, self.pen.style()));
                self.history.strokes().last()
            }
            None => {
                debug!("Gesture too short to commit");
                None
            }
        }
    }

    /// Drops the in-flight gesture without committing anything.
    pub fn cancel_gesture(&mut self) {
        self.state = GestureState::Idle;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, GestureState::Drawing(_))
    }

    /// Live preview of the in-flight gesture, styled with the current pen.
    pub fn preview(&self) -> Option<Shape> {
        match &self.state {
            GestureState::Drawing(smoother) => Some(Shape::Polyline {
                points: smoother.points().to_vec(),
                color: self.pen.color,
                width: self.pen.width,
                opacity: self.pen.opacity,
                tension: INK_TENSION,
            }),
            GestureState::Idle => None,
        }
    }

    /// Commits an already-smoothed stroke directly.
    pub fn commit(&mut self, stroke: Stroke) {
        self.history.commit(stroke);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn clear_all(&mut self) {
        self.cancel_gesture();
        self.history.clear_all();
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.history.strokes()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    /// Scene shapes for every committed stroke in order.
    pub fn shapes(&self) -> Vec<Shape> {
        self.history.strokes().iter().map(Stroke::to_shape).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::NAVY;

    fn sample(x: f64, y: f64) -> PointerSample {
        PointerSample::new(x, y, 0)
    }

    fn raw_pen() -> PenSettings {
        PenSettings {
            smoothing: 0.0,
            ..PenSettings::default()
        }
    }

    #[test]
    fn gesture_commits_on_release() {
        let mut canvas = FreehandCanvas::new(raw_pen());
        canvas.begin_gesture(sample(0.0, 0.0));
        canvas.extend_gesture(sample(10.0, 0.0));
        canvas.extend_gesture(sample(20.0, 5.0));

        let stroke = canvas.end_gesture().expect("stroke committed").clone();
        assert_eq!(stroke.points(), &[(0.0, 0.0), (10.0, 0.0), (20.0, 5.0)]);
        assert_eq!(canvas.strokes().len(), 1);
        assert!(!canvas.is_drawing());
    }

    #[test]
    fn tap_commits_nothing() {
        let mut canvas = FreehandCanvas::new(raw_pen());
        canvas.begin_gesture(sample(5.0, 5.0));
        canvas.extend_gesture(sample(6.0, 5.0));
        assert!(canvas.end_gesture().is_none());
        assert!(canvas.strokes().is_empty());
    }

    #[test]
    fn motion_while_idle_is_ignored() {
        let mut canvas = FreehandCanvas::default();
        assert!(canvas.extend_gesture(sample(50.0, 50.0)).is_none());
        assert!(canvas.end_gesture().is_none());
    }

    #[test]
    fn stroke_uses_pen_style_at_commit() {
        let mut canvas = FreehandCanvas::new(raw_pen());
        canvas.begin_gesture(sample(0.0, 0.0));
        canvas.extend_gesture(sample(30.0, 0.0));
        canvas.pen.color = NAVY;
        canvas.pen.width = 6.0;
        let stroke = canvas.end_gesture().unwrap();
        assert_eq!(stroke.style().color, NAVY);
        assert_eq!(stroke.style().width, 6.0);
    }

    #[test]
    fn new_commit_after_undo_drops_redo() {
        let mut canvas = FreehandCanvas::new(raw_pen());
        for offset in [0.0, 50.0] {
            canvas.begin_gesture(sample(offset, 0.0));
            canvas.extend_gesture(sample(offset + 20.0, 0.0));
            canvas.end_gesture();
        }
        assert!(canvas.undo());
        assert!(canvas.can_redo());

        canvas.begin_gesture(sample(0.0, 40.0));
        canvas.extend_gesture(sample(20.0, 40.0));
        canvas.end_gesture();
        assert!(!canvas.can_redo());
        assert_eq!(canvas.strokes().len(), 2);
    }

    #[test]
    fn preview_follows_active_gesture() {
        let mut canvas = FreehandCanvas::new(raw_pen());
        assert!(canvas.preview().is_none());
        canvas.begin_gesture(sample(0.0, 0.0));
        canvas.extend_gesture(sample(10.0, 0.0));
        match canvas.preview() {
            Some(Shape::Polyline { points, .. }) => assert_eq!(points.len(), 2),
            other => panic!("unexpected preview {other:?}"),
        }
        canvas.clear_all();
        assert!(canvas.preview().is_none());
    }
}
