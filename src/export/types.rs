//! Data types for signature export.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::draw::CanvasSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Raster image with alpha (PNG).
    #[default]
    Png,
    /// Vector image document (SVG).
    Svg,
    /// Single-page document with an embedded raster (PDF).
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Svg, ExportFormat::Pdf];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Whether the output is built from the pixel raster (and so honours trim and ratio).
    pub fn is_raster_based(self) -> bool {
        !matches!(self, ExportFormat::Svg)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    /// Accepts the extension names and the generic `raster`/`vector`/`document` aliases.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "png" | "raster" => Ok(ExportFormat::Png),
            "svg" | "vector" => Ok(ExportFormat::Svg),
            "pdf" | "document" => Ok(ExportFormat::Pdf),
            _ => Err(ExportError::UnsupportedFormat(value.to_string())),
        }
    }
}

/// Page orientation of a document export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrientation {
    Portrait,
    Landscape,
}

impl PageOrientation {
    /// Landscape when strictly wider than tall, portrait otherwise.
    pub fn for_size(width: u32, height: u32) -> Self {
        if width > height {
            PageOrientation::Landscape
        } else {
            PageOrientation::Portrait
        }
    }
}

/// Everything the pipeline needs besides the scene itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub format: ExportFormat,
    /// Crop to visible content before encoding (raster-based formats only)
    pub trim: bool,
    /// Margin kept around trimmed content, in canvas pixels before scaling
    pub padding: u32,
    pub canvas: CanvasSpec,
    pub file_name: String,
}

impl ExportRequest {
    /// Default padding around trimmed content.
    pub const DEFAULT_PADDING: u32 = 20;

    /// A trimmed request with default padding.
    pub fn new(format: ExportFormat, canvas: CanvasSpec, file_name: impl Into<String>) -> Self {
        Self {
            format,
            trim: true,
            padding: Self::DEFAULT_PADDING,
            canvas,
            file_name: file_name.into(),
        }
    }

    /// Padding in device pixels after the pixel ratio is applied.
    pub fn scaled_padding(&self) -> u32 {
        self.padding.saturating_mul(self.canvas.pixel_ratio.get())
    }
}

/// A finished export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub format: ExportFormat,
    /// Output width in device pixels (canvas units for SVG)
    pub width: u32,
    /// Output height in device pixels (canvas units for SVG)
    pub height: u32,
    /// Set for document exports only
    pub orientation: Option<PageOrientation>,
}

impl ExportArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Errors that can occur while exporting a signature.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0:?}")]
    UnsupportedFormat(String),

    #[error("Pixel ratio must be 1, 2 or 3 (got {0})")]
    InvalidPixelRatio(u32),

    #[error("Nothing to export: the signature is empty")]
    InsufficientContent,

    #[error("Drawing surface error: {0}")]
    Surface(#[from] cairo::Error),

    #[error("Could not access surface pixels: {0}")]
    PixelAccess(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(String),
}

impl ExportError {
    /// True for failures worth retrying (rendering, encoding, I/O).
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ExportError::UnsupportedFormat(_)
                | ExportError::InvalidPixelRatio(_)
                | ExportError::InsufficientContent
        )
    }
}

/// Outcome of a queued export.
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    Success {
        artifact: ExportArtifact,
        /// Where the artifact was written, when a directory was requested
        saved_path: Option<PathBuf>,
    },
    Failed(String),
}

/// Status of the background export queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// No export has run yet (or the status was reset).
    Idle,
    /// An export is rendering or encoding.
    InProgress,
    /// The last export completed.
    Success,
    /// The last export failed.
    Failed(String),
}
