//! Signature rendering and export engine.
//!
//! Produces transparent-background signatures either from styled text
//! ([`typed`]) or from smoothed freehand strokes ([`input`]), renders them with
//! Cairo/Pango ([`draw`]) and exports PNG, SVG or PDF files ([`export`]).
//! [`signature::SignatureSession`] ties the pieces together for front ends.

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod signature;
pub mod typed;
pub mod util;

pub use config::Config;
pub use signature::{SignatureMode, SignatureSession};
