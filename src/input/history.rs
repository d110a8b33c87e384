//! Stroke history with undo/redo.

use super::stroke::Stroke;

/// Owns the committed strokes plus the redo buffer.
///
/// Two LIFO stacks with fixed transfer rules:
/// - `commit` pushes onto `committed` and empties `redo`
/// - `undo` moves the top of `committed` onto `redo`
/// - `redo` moves the top of `redo` back onto `committed`
/// - `clear_all` empties both and is not itself undoable
///
/// Strokes move between the stacks by value, so an undo/redo round trip
/// restores the exact point data. No capacity limit is imposed.
#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    committed: Vec<Stroke>,
    redo: Vec<Stroke>,
}

impl StrokeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stroke and invalidates the redo buffer.
    pub fn commit(&mut self, stroke: Stroke) {
        self.committed.push(stroke);
        self.redo.clear();
    }

    /// Moves the most recent stroke to the redo buffer. No-op when empty.
    ///
    /// Returns true if a stroke was moved.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(stroke) => {
                self.redo.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Restores the most recently undone stroke. No-op when the buffer is empty.
    ///
    /// Returns true if a stroke was restored.
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(stroke) => {
                self.committed.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Empties both stacks.
    pub fn clear_all(&mut self) {
        self.committed.clear();
        self.redo.clear();
    }

    /// Visible strokes in draw order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.committed
    }

    /// Undone strokes, the next one to redo last.
    pub fn redo_buffer(&self) -> &[Stroke] {
        &self.redo
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}
