//! Freehand input handling.
//!
//! This module turns pointer gestures into committed strokes. It owns the
//! smoothing filter for the in-flight gesture and the undo/redo history of
//! committed strokes.

pub mod canvas;
pub mod history;
pub mod smoothing;
pub mod stroke;

// Re-export commonly used types at module level
pub use canvas::{FreehandCanvas, GestureState, PenSettings};
pub use history::StrokeHistory;
pub use smoothing::{GestureSmoother, PointerSample, smooth_samples};
pub use stroke::{Stroke, StrokeStyle};
