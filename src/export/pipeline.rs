use cairo::ImageSurface;
use log::{debug, info};
use tokio::task;

use super::bounds::{self, BoundingBox};
use super::encode;
use super::raster;
use super::types::{ExportArtifact, ExportError, ExportFormat, ExportRequest, PageOrientation};
use crate::draw::Scene;

/// Abstraction over content detection so tests can observe when trimming runs.
pub trait BoundsAnalyzer {
    fn content_bounds(&self, surface: &mut ImageSurface)
    -> Result<Option<BoundingBox>, ExportError>;
}

/// Full alpha scan via [`bounds::surface_content_bounds`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaScan;

impl BoundsAnalyzer for AlphaScan {
    fn content_bounds(
        &self,
        surface: &mut ImageSurface,
    ) -> Result<Option<BoundingBox>, ExportError> {
        bounds::surface_content_bounds(surface)
    }
}

/// Exports `scene` as described by `request`.
///
/// Shapes are rendered on `request.canvas`. Fails with
/// [`ExportError::InsufficientContent`] when the scene has nothing to draw;
/// shapes that leave no visible pixels still export as a transparent image.
pub fn export(scene: &Scene, request: &ExportRequest) -> Result<ExportArtifact, ExportError> {
    export_with(scene, request, &AlphaScan)
}

/// [`export`] with an explicit bounds analyzer.
pub fn export_with(
    scene: &Scene,
    request: &ExportRequest,
    analyzer: &dyn BoundsAnalyzer,
) -> Result<ExportArtifact, ExportError> {
    scene.ensure_content()?;
    let canvas = &request.canvas;

    info!(
        "Exporting {} ({}x{} @ {}, trim={}, padding={})",
        request.format, canvas.width, canvas.height, canvas.pixel_ratio, request.trim, request.padding
    );

    if !request.format.is_raster_based() {
        let bytes = encode::encode_svg(canvas, &scene.shapes)?;
        info!("Encoded svg: {} bytes", bytes.len());
        return Ok(ExportArtifact {
            bytes,
            file_name: request.file_name.clone(),
            format: request.format,
            width: canvas.width,
            height: canvas.height,
            orientation: None,
        });
    }

    let mut surface = raster::rasterize(canvas, &scene.shapes)?;
    if request.trim {
        surface = trim_to_content(surface, request.scaled_padding(), analyzer)?;
    }

    let width = surface.width() as u32;
    let height = surface.height() as u32;
    let (bytes, orientation) = match request.format {
        ExportFormat::Pdf => (
            encode::encode_pdf(&surface)?,
            Some(PageOrientation::for_size(width, height)),
        ),
        _ => (encode::encode_png(&surface)?, None),
    };

    info!(
        "Encoded {}: {}x{} px, {} bytes",
        request.format,
        width,
        height,
        bytes.len()
    );

    Ok(ExportArtifact {
        bytes,
        file_name: request.file_name.clone(),
        format: request.format,
        width,
        height,
        orientation,
    })
}

/// Crops `surface` to its visible content plus `padding`; blank surfaces pass through.
fn trim_to_content(
    mut surface: ImageSurface,
    padding: u32,
    analyzer: &dyn BoundsAnalyzer,
) -> Result<ImageSurface, ExportError> {
    match analyzer.content_bounds(&mut surface)? {
        Some(bounds) => {
            debug!("Content bounds: {:?}", bounds);
            raster::trim(&surface, bounds, padding)
        }
        None => {
            debug!("No visible content; exporting untrimmed surface");
            Ok(surface)
        }
    }
}

/// Runs [`export`] on the blocking thread pool.
///
/// The raster surface lives entirely inside the worker task.
pub async fn export_async(
    scene: Scene,
    request: ExportRequest,
) -> Result<ExportArtifact, ExportError> {
    task::spawn_blocking(move || export(&scene, &request))
        .await
        .map_err(|e| ExportError::Task(format!("Export task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};
    use crate::draw::{CanvasSpec, PixelRatio, Shape};
    use std::cell::Cell;

    struct CountingAnalyzer {
        calls: Cell<usize>,
    }

    impl BoundsAnalyzer for CountingAnalyzer {
        fn content_bounds(
            &self,
            surface: &mut ImageSurface,
        ) -> Result<Option<BoundingBox>, ExportError> {
            self.calls.set(self.calls.get() + 1);
            bounds::surface_content_bounds(surface)
        }
    }

    fn stroke_scene(canvas: CanvasSpec) -> Scene {
        let mut scene = Scene::new(canvas);
        scene.push(Shape::Polyline {
            points: vec![(100.0, 100.0), (140.0, 110.0), (180.0, 100.0)],
            color: BLACK,
            width: 4.0,
            opacity: 1.0,
            tension: 0.5,
        });
        scene
    }

    fn request(format: ExportFormat, canvas: CanvasSpec, trim: bool) -> ExportRequest {
        ExportRequest {
            trim,
            ..ExportRequest::new(format, canvas, "test")
        }
    }

    #[test]
    fn untrimmed_export_skips_bounds_and_keeps_scaled_size() {
        let canvas = CanvasSpec::new(600, 200, PixelRatio::X2);
        let analyzer = CountingAnalyzer { calls: Cell::new(0) };
        let artifact = export_with(
            &stroke_scene(canvas),
            &request(ExportFormat::Png, canvas, false),
            &analyzer,
        )
        .unwrap();

        assert_eq!(analyzer.calls.get(), 0);
        assert_eq!((artifact.width, artifact.height), (1200, 400));
    }

    #[test]
    fn trimmed_export_shrinks_to_content() {
        let canvas = CanvasSpec::new(600, 200, PixelRatio::X2);
        let analyzer = CountingAnalyzer { calls: Cell::new(0) };
        let artifact = export_with(
            &stroke_scene(canvas),
            &request(ExportFormat::Png, canvas, true),
            &analyzer,
        )
        .unwrap();

        assert_eq!(analyzer.calls.get(), 1);
        assert!(artifact.width < 1200);
        assert!(artifact.height < 400);
        // At least the scaled padding on each side
        assert!(artifact.width > 2 * 40);
    }

    #[test]
    fn invisible_content_exports_untrimmed() {
        let canvas = CanvasSpec::new(50, 30, PixelRatio::X1);
        let mut scene = Scene::new(canvas);
        // Entirely off-canvas
        scene.push(Shape::Polyline {
            points: vec![(-100.0, -100.0), (-80.0, -100.0)],
            color: BLACK,
            width: 2.0,
            opacity: 1.0,
            tension: 0.0,
        });

        let artifact = export(&scene, &request(ExportFormat::Png, canvas, true)).unwrap();
        assert_eq!((artifact.width, artifact.height), (50, 30));
    }

    #[test]
    fn opaque_background_trims_to_full_canvas() {
        let mut canvas = CanvasSpec::new(60, 40, PixelRatio::X1);
        canvas.transparent = false;
        canvas.background = WHITE;
        let mut req = request(ExportFormat::Png, canvas, true);
        req.padding = 0;

        let artifact = export(&stroke_scene(canvas), &req).unwrap();
        assert_eq!((artifact.width, artifact.height), (60, 40));
    }

    #[test]
    fn empty_scene_is_insufficient_content() {
        let canvas = CanvasSpec::default();
        let err = export(&Scene::new(canvas), &request(ExportFormat::Png, canvas, true)).unwrap_err();
        assert!(matches!(err, ExportError::InsufficientContent));
    }

    #[test]
    fn pdf_reports_orientation() {
        let canvas = CanvasSpec::new(600, 200, PixelRatio::X1);
        let artifact = export(
            &stroke_scene(canvas),
            &request(ExportFormat::Pdf, canvas, false),
        )
        .unwrap();
        assert_eq!(artifact.orientation, Some(PageOrientation::Landscape));
        assert!(artifact.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn svg_ignores_trim_and_ratio() {
        let canvas = CanvasSpec::new(600, 200, PixelRatio::X3);
        let analyzer = CountingAnalyzer { calls: Cell::new(0) };
        let artifact = export_with(
            &stroke_scene(canvas),
            &request(ExportFormat::Svg, canvas, true),
            &analyzer,
        )
        .unwrap();
        assert_eq!(analyzer.calls.get(), 0);
        assert_eq!((artifact.width, artifact.height), (600, 200));
    }

    #[test]
    fn png_export_is_repeatable() {
        let canvas = CanvasSpec::new(300, 150, PixelRatio::X2);
        let scene = stroke_scene(canvas);
        let req = request(ExportFormat::Png, canvas, true);
        assert_eq!(export(&scene, &req).unwrap(), export(&scene, &req).unwrap());
    }

    #[tokio::test]
    async fn async_export_matches_sync() {
        let canvas = CanvasSpec::new(300, 150, PixelRatio::X1);
        let scene = stroke_scene(canvas);
        let req = request(ExportFormat::Png, canvas, true);
        let expected = export(&scene, &req).unwrap();
        let artifact = export_async(scene, req).await.unwrap();
        assert_eq!(artifact, expected);
    }
}
