//! Signature session: the state a signing UI drives.
//!
//! A [`SignatureSession`] owns the typed spec, the freehand canvas, the canvas
//! settings and the export preferences. Front ends mutate it through its
//! fields and commands and read back scenes, stroke lists and redo
//! availability; nothing is global.

use std::path::PathBuf;

use log::debug;

use crate::config::Config;
use crate::draw::{CanvasSpec, Scene};
use crate::export::{
    self, ExportArtifact, ExportError, ExportFormat, ExportRequest, file::expand_tilde,
    generate_file_name,
};
use crate::input::{FreehandCanvas, PenSettings};
use crate::typed::{TextMeasurer, TypedSignatureSpec, typed_scene};

/// Which input method produces the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureMode {
    #[default]
    Typed,
    Freehand,
}

/// Export preferences independent of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub format: ExportFormat,
    pub trim: bool,
    /// Padding around trimmed content, in canvas pixels
    pub padding: u32,
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            trim: true,
            padding: ExportRequest::DEFAULT_PADDING,
            output_dir: export::file::default_output_dir(),
        }
    }
}

/// Explicit owner of all signature editing state.
#[derive(Debug, Clone, Default)]
pub struct SignatureSession {
    pub mode: SignatureMode,
    pub typed: TypedSignatureSpec,
    pub freehand: FreehandCanvas,
    pub canvas: CanvasSpec,
    pub export: ExportSettings,
}

impl SignatureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session seeded with the styles and preferences from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            mode: SignatureMode::Typed,
            typed: config.typed.to_spec(),
            freehand: FreehandCanvas::new(config.freehand.pen_settings()),
            canvas: config.canvas.canvas_spec(),
            export: ExportSettings {
                format: config.export.format,
                trim: config.export.trim,
                padding: config.export.padding,
                output_dir: expand_tilde(&config.export.output_dir),
            },
        }
    }

    pub fn pen(&self) -> &PenSettings {
        &self.freehand.pen
    }

    /// True when the active mode has something to export.
    pub fn can_export(&self) -> bool {
        match self.mode {
            SignatureMode::Typed => self.typed.has_content(),
            SignatureMode::Freehand => !self.freehand.strokes().is_empty(),
        }
    }

    /// Scene for the active mode on the current canvas.
    pub fn scene(&self, measurer: &dyn TextMeasurer) -> Scene {
        match self.mode {
            SignatureMode::Typed => typed_scene(&self.typed, &self.canvas, measurer),
            SignatureMode::Freehand => {
                let mut scene = Scene::new(self.canvas);
                for shape in self.freehand.shapes() {
                    scene.push(shape);
                }
                scene
            }
        }
    }

    /// File name for the current signer, canvas and `format`.
    pub fn file_name(&self, format: ExportFormat) -> String {
        generate_file_name(
            &self.typed.full_name,
            &self.typed.initials,
            &self.canvas,
            format,
        )
    }

    /// Export request for the current settings.
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest {
            format: self.export.format,
            trim: self.export.trim,
            padding: self.export.padding,
            canvas: self.canvas,
            file_name: self.file_name(self.export.format),
        }
    }

    /// Renders and encodes the active signature.
    ///
    /// Fails with [`ExportError::InsufficientContent`] when there is nothing to export.
    pub fn export(&self, measurer: &dyn TextMeasurer) -> Result<ExportArtifact, ExportError> {
        if !self.can_export() {
            debug!("Export requested with no content ({:?} mode)", self.mode);
            return Err(ExportError::InsufficientContent);
        }
        export::export(&self.scene(measurer), &self.export_request())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{FontDescriptor, PixelRatio, Shape};
    use crate::input::PointerSample;
    use crate::typed::TextExtent;

    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, text: &str, _: &FontDescriptor, size: f64, _: f64) -> TextExtent {
            TextExtent {
                width: text.chars().count() as f64 * size / 2.0,
                height: size,
            }
        }
    }

    fn draw_line(session: &mut SignatureSession, y: f64) {
        session.freehand.begin_gesture(PointerSample::new(20.0, y, 0));
        session.freehand.extend_gesture(PointerSample::new(60.0, y + 5.0, 16));
        session.freehand.extend_gesture(PointerSample::new(120.0, y, 32));
        session.freehand.end_gesture();
    }

    #[test]
    fn empty_session_cannot_export() {
        let session = SignatureSession::new();
        assert!(!session.can_export());
        assert!(matches!(
            session.export(&FixedMeasurer),
            Err(ExportError::InsufficientContent)
        ));
    }

    #[test]
    fn typed_mode_uses_typed_spec() {
        let mut session = SignatureSession::new();
        session.typed.full_name = "Ada Lovelace".to_string();
        assert!(session.can_export());

        let scene = session.scene(&FixedMeasurer);
        assert!(matches!(scene.shapes.as_slice(), [Shape::Group { .. }]));
    }

    #[test]
    fn freehand_mode_uses_committed_strokes() {
        let mut session = SignatureSession {
            mode: SignatureMode::Freehand,
            ..SignatureSession::new()
        };
        session.typed.full_name = "Ignored For Drawing".to_string();
        assert!(!session.can_export());

        draw_line(&mut session, 50.0);
        draw_line(&mut session, 90.0);
        assert_eq!(session.scene(&FixedMeasurer).shapes.len(), 2);

        session.freehand.undo();
        assert_eq!(session.scene(&FixedMeasurer).shapes.len(), 1);
        assert!(session.freehand.can_redo());
    }

    #[test]
    fn request_carries_settings_and_name() {
        let mut session = SignatureSession::new();
        session.typed.full_name = "Vinit Shahdeo".to_string();
        session.canvas = CanvasSpec::new(600, 200, PixelRatio::X2);
        session.export.format = ExportFormat::Svg;
        session.export.padding = 5;

        let request = session.export_request();
        assert_eq!(request.file_name, "signature-vinit-shahdeo-600x200@2x.svg");
        assert_eq!(request.padding, 5);
        assert_eq!(request.format, ExportFormat::Svg);
    }

    #[test]
    fn freehand_export_produces_png() {
        let mut session = SignatureSession {
            mode: SignatureMode::Freehand,
            ..SignatureSession::new()
        };
        session.canvas = CanvasSpec::new(200, 150, PixelRatio::X1);
        draw_line(&mut session, 60.0);

        let artifact = session.export(&FixedMeasurer).unwrap();
        assert_eq!(artifact.file_name, "signature-200x150.png");
        assert!(artifact.width < 200);
    }

    #[test]
    fn config_seeds_session() {
        let mut config = Config::default();
        config.freehand.smoothing = 0.0;
        config.canvas.pixel_ratio = 3;
        config.export.format = ExportFormat::Pdf;

        let session = SignatureSession::from_config(&config);
        assert_eq!(session.pen().smoothing, 0.0);
        assert_eq!(session.canvas.pixel_ratio, PixelRatio::X3);
        assert_eq!(session.export.format, ExportFormat::Pdf);
    }
}
