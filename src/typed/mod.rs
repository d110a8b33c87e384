//! Typed signatures: specification, layout and flourishes.

pub mod flourish;
pub mod layout;
pub mod spec;

pub use layout::{PangoMeasurer, RenderPlan, TextExtent, TextMeasurer, layout, typed_scene};
pub use spec::{Alignment, FlourishKind, FlourishStyle, TypedSignatureSpec};
