//! Signature export.
//!
//! This module turns a [`Scene`](crate::draw::Scene) into a downloadable file:
//! - Rasterization at 1×, 2× or 3×
//! - Trimming to visible content with padding
//! - PNG, SVG and PDF encoding
//! - Deterministic file names and saving to disk
//! - A background queue for non-blocking exports

pub mod bounds;
pub mod encode;
pub mod file;
pub mod filename;
pub mod raster;
pub mod types;

mod manager;
mod pipeline;

pub use bounds::{BoundingBox, content_bounds, surface_content_bounds};
pub use file::{ArtifactSaver, FileArtifactSaver, save_artifact};
pub use filename::generate_file_name;
pub use manager::ExportManager;
pub use pipeline::{AlphaScan, BoundsAnalyzer, export, export_async, export_with};
pub use types::{
    ExportArtifact, ExportError, ExportFormat, ExportOutcome, ExportRequest, ExportStatus,
    PageOrientation,
};
