//! Layout engine for typed signatures.
//!
//! [`layout`] is a pure function of the spec, the canvas and the text metrics:
//! it decides where the primary text sits, how it is rotated and slanted, where
//! the subtitle goes and what flourish shapes accompany it. Rotation applies to
//! the whole group about the primary text origin; slant shears only the primary
//! glyph run, so the two compose without interacting.

use super::flourish::{TextBlock, flourish_shapes};
use super::spec::{Alignment, TypedSignatureSpec};
use crate::draw::{CanvasSpec, Color, FontDescriptor, Scene, Shape, render};
use crate::util::Point;
use log::warn;

/// Horizontal inset for left/right alignment and the subtitle.
pub const MARGIN: f64 = 20.0;

/// Subtitle font size relative to the primary font size.
pub const SUBTITLE_SCALE: f64 = 0.4;

/// Subtitle opacity relative to the primary opacity.
pub const SUBTITLE_OPACITY: f64 = 0.8;

/// Gap between the primary line block and the subtitle.
pub const SUBTITLE_GAP: f64 = 10.0;

/// Measured size of a text run in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Text metrics provider.
///
/// The layout only needs the advance width and height of a run; production code
/// uses [`PangoMeasurer`], tests can substitute fixed metrics.
pub trait TextMeasurer {
    fn measure(
        &self,
        text: &str,
        font: &FontDescriptor,
        size: f64,
        letter_spacing: f64,
    ) -> TextExtent;
}

/// Measures text with Pango on a scratch Cairo surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct PangoMeasurer;

impl PangoMeasurer {
    fn try_measure(
        text: &str,
        font: &FontDescriptor,
        size: f64,
        letter_spacing: f64,
    ) -> Result<TextExtent, cairo::Error> {
        // Use a tiny image surface for measurement; the layout is all we need.
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1)?;
        let ctx = cairo::Context::new(&surface)?;
        let layout = render::text_layout(&ctx, text, font, size, letter_spacing);
        let (_ink_rect, logical_rect) = layout.extents();
        let scale = pango::SCALE as f64;
        Ok(TextExtent {
            width: logical_rect.width() as f64 / scale,
            height: logical_rect.height() as f64 / scale,
        })
    }
}

impl TextMeasurer for PangoMeasurer {
    fn measure(
        &self,
        text: &str,
        font: &FontDescriptor,
        size: f64,
        letter_spacing: f64,
    ) -> TextExtent {
        Self::try_measure(text, font, size, letter_spacing).unwrap_or_else(|err| {
            warn!("Text measurement failed ({}), estimating extent", err);
            let glyphs = text.chars().count() as f64;
            TextExtent {
                width: glyphs * (size * 0.5 + letter_spacing),
                height: size,
            }
        })
    }
}

/// A positioned run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub font: FontDescriptor,
    pub size: f64,
    pub letter_spacing: f64,
    /// Top-left corner
    pub origin: Point,
    pub extent: TextExtent,
    pub opacity: f64,
    /// Ink texture strength (0 - 100)
    pub texture: f64,
}

/// Resolved placement for a typed signature.
///
/// An empty plan (no primary run) draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub primary: Option<TextRun>,
    pub subtitle: Option<TextRun>,
    /// Rotation pivot (the primary text origin)
    pub pivot: Point,
    /// Clockwise group rotation in degrees
    pub rotation: f64,
    /// Horizontal shear of the primary glyph run
    pub skew_x: f64,
    pub color: Color,
    /// Flourish shapes, unskewed but rotated with the group
    pub flourish: Vec<Shape>,
}

impl RenderPlan {
    fn empty() -> Self {
        Self {
            primary: None,
            subtitle: None,
            pivot: (0.0, 0.0),
            rotation: 0.0,
            skew_x: 0.0,
            color: Color::new(0.0, 0.0, 0.0, 0.0),
            flourish: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    /// Origin of the primary text, if any.
    pub fn origin(&self) -> Option<Point> {
        self.primary.as_ref().map(|run| run.origin)
    }

    /// Scene shapes for this plan: one rotated group, or nothing for an empty plan.
    pub fn to_shapes(&self) -> Vec<Shape> {
        let Some(primary) = &self.primary else {
            return Vec::new();
        };

        let text_shape = |run: &TextRun, skew_x: f64| Shape::Text {
            x: run.origin.0,
            y: run.origin.1,
            text: run.text.clone(),
            font: run.font.clone(),
            size: run.size,
            letter_spacing: run.letter_spacing,
            color: self.color,
            opacity: run.opacity,
            skew_x,
            texture: run.texture,
        };

        let mut children = vec![text_shape(primary, self.skew_x)];
        if let Some(subtitle) = &self.subtitle {
            children.push(text_shape(subtitle, 0.0));
        }
        children.extend(self.flourish.iter().cloned());

        vec![Shape::Group {
            pivot: self.pivot,
            rotation: self.rotation,
            children,
        }]
    }
}

/// Horizontal origin of a run of `text_width` on a canvas of `canvas_width`.
pub fn aligned_x(alignment: Alignment, canvas_width: f64, text_width: f64) -> f64 {
    match alignment {
        Alignment::Left => MARGIN,
        Alignment::Center => (canvas_width - text_width) / 2.0,
        Alignment::Right => canvas_width - text_width - MARGIN,
    }
}

/// Top of the primary text: the line block vertically centred, then shifted.
pub fn text_top(spec: &TypedSignatureSpec, canvas_height: f64) -> f64 {
    canvas_height / 2.0 - (spec.font_size * spec.line_height) / 2.0 + spec.baseline_offset
}

/// Computes the render plan for `spec` on `canvas`.
pub fn layout(
    spec: &TypedSignatureSpec,
    canvas: &CanvasSpec,
    measurer: &dyn TextMeasurer,
) -> RenderPlan {
    let text = spec.display_text();
    if text.is_empty() {
        return RenderPlan::empty();
    }

    let font = spec.font();
    let extent = measurer.measure(text, &font, spec.font_size, spec.letter_spacing);
    let origin = (
        aligned_x(spec.alignment, canvas.width as f64, extent.width),
        text_top(spec, canvas.height as f64),
    );
    let block_height = spec.font_size * spec.line_height;

    let subtitle = spec.subtitle().map(|title| {
        let size = spec.font_size * SUBTITLE_SCALE;
        TextRun {
            text: title.to_string(),
            extent: measurer.measure(title, &font, size, 0.0),
            font: font.clone(),
            size,
            letter_spacing: 0.0,
            origin: (MARGIN, origin.1 + block_height + SUBTITLE_GAP),
            opacity: spec.opacity * SUBTITLE_OPACITY,
            texture: 0.0,
        }
    });

    let block = TextBlock {
        origin,
        width: extent.width,
        height: block_height,
    };
    let flourish = flourish_shapes(&spec.flourish, &block, spec.color, spec.opacity);

    RenderPlan {
        primary: Some(TextRun {
            text: text.to_string(),
            font,
            size: spec.font_size,
            letter_spacing: spec.letter_spacing,
            origin,
            extent,
            opacity: spec.opacity,
            texture: spec.stroke_texture,
        }),
        subtitle,
        pivot: origin,
        rotation: spec.rotation,
        skew_x: spec.skew_x(),
        color: spec.color,
        flourish,
    }
}

/// Lays out `spec` and wraps the result in a scene on `canvas`.
pub fn typed_scene(
    spec: &TypedSignatureSpec,
    canvas: &CanvasSpec,
    measurer: &dyn TextMeasurer,
) -> Scene {
    let mut scene = Scene::new(*canvas);
    for shape in layout(spec, canvas, measurer).to_shapes() {
        scene.push(shape);
    }
    scene
}
