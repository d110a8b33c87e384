use autograph::draw::color::{BLACK, NAVY};
use autograph::draw::{CanvasSpec, FontDescriptor, PixelRatio, Scene};
use autograph::export::{
    self, BoundingBox, ExportError, ExportFormat, ExportRequest, PageOrientation,
    surface_content_bounds,
};
use autograph::input::{FreehandCanvas, PenSettings, PointerSample};
use autograph::typed::{FlourishKind, TextExtent, TextMeasurer, TypedSignatureSpec, typed_scene};

struct FixedMeasurer;

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, _: &FontDescriptor, size: f64, spacing: f64) -> TextExtent {
        TextExtent {
            width: text.chars().count() as f64 * (size / 2.0 + spacing),
            height: size,
        }
    }
}

fn freehand_scene(canvas: CanvasSpec) -> Scene {
    let mut freehand = FreehandCanvas::new(PenSettings {
        color: NAVY,
        smoothing: 0.0,
        ..PenSettings::default()
    });
    freehand.begin_gesture(PointerSample::new(100.0, 100.0, 0));
    freehand.extend_gesture(PointerSample::new(150.0, 80.0, 16));
    freehand.extend_gesture(PointerSample::new(200.0, 110.0, 32));
    freehand.end_gesture();

    let mut scene = Scene::new(canvas);
    for shape in freehand.shapes() {
        scene.push(shape);
    }
    scene
}

#[test]
fn trimmed_png_matches_content_plus_padding() {
    let canvas = CanvasSpec::new(400, 200, PixelRatio::X2);
    let scene = freehand_scene(canvas);

    // Locate the content on the untrimmed raster first
    let mut full = ExportRequest::new(ExportFormat::Png, canvas, "full.png");
    full.trim = false;
    let untrimmed = export::export(&scene, &full).unwrap();
    assert_eq!((untrimmed.width, untrimmed.height), (800, 400));

    let mut surface = cairo::ImageSurface::create_from_png(&mut untrimmed.bytes.as_slice()).unwrap();
    let bounds: BoundingBox = surface_content_bounds(&mut surface).unwrap().unwrap();

    let mut trimmed_request = ExportRequest::new(ExportFormat::Png, canvas, "trim.png");
    trimmed_request.padding = 7;
    let trimmed = export::export(&scene, &trimmed_request).unwrap();
    assert_eq!(trimmed.width, bounds.width + 2 * 7 * 2);
    assert_eq!(trimmed.height, bounds.height + 2 * 7 * 2);
}

#[test]
fn every_format_exports_a_typed_signature() {
    let canvas = CanvasSpec::new(600, 200, PixelRatio::X1);
    let mut spec = TypedSignatureSpec {
        title: "Engineer".to_string(),
        color: BLACK,
        ..TypedSignatureSpec::named("Jane Doe")
    };
    spec.flourish.kind = FlourishKind::SwooshRight;
    let scene = typed_scene(&spec, &canvas, &FixedMeasurer);

    for format in ExportFormat::ALL {
        let name = export::generate_file_name(&spec.full_name, &spec.initials, &canvas, format);
        let artifact = export::export(&scene, &ExportRequest::new(format, canvas, name)).unwrap();
        assert!(!artifact.is_empty(), "{format} produced no bytes");
        assert!(artifact.file_name.ends_with(format.extension()));
        assert_eq!(
            artifact.orientation.is_some(),
            format == ExportFormat::Pdf,
            "{format}"
        );
    }
}

#[test]
fn tall_canvas_pdf_is_portrait() {
    let canvas = CanvasSpec::new(300, 500, PixelRatio::X1);
    let scene = freehand_scene(canvas);
    let mut request = ExportRequest::new(ExportFormat::Pdf, canvas, "tall.pdf");
    request.trim = false;
    let artifact = export::export(&scene, &request).unwrap();
    assert_eq!(artifact.orientation, Some(PageOrientation::Portrait));
}

#[test]
fn empty_typed_spec_exports_nothing() {
    let canvas = CanvasSpec::default();
    let scene = typed_scene(&TypedSignatureSpec::default(), &canvas, &FixedMeasurer);
    assert!(scene.is_empty());
    let err = export::export(&scene, &ExportRequest::new(ExportFormat::Png, canvas, "x.png"))
        .unwrap_err();
    assert!(matches!(err, ExportError::InsufficientContent));
}

#[tokio::test]
async fn async_export_runs_off_thread() {
    let canvas = CanvasSpec::new(400, 200, PixelRatio::X3);
    let scene = freehand_scene(canvas);
    let request = ExportRequest::new(ExportFormat::Png, canvas, "async.png");
    let artifact = export::export_async(scene, request).await.unwrap();
    assert_eq!(&artifact.bytes[0..4], &[137, 80, 78, 71]);
}
