//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types used for signatures:
//! - [`Color`]: RGBA color representation with hex conversion
//! - [`Shape`]: Declarative scene elements (polylines, text, circles, groups)
//! - [`Scene`]: Canvas specification plus the shapes to draw
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod font;
pub mod render;
pub mod scene;
pub mod shape;

// Re-export commonly used types at module level
pub use color::Color;
pub use font::FontDescriptor;
pub use render::{render_on_canvas, render_scene, render_shape, render_shapes};
pub use scene::{CanvasSpec, PixelRatio, Scene};
pub use shape::{INK_TENSION, Shape};
