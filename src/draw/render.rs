//! Cairo-based rendering functions for scenes.
//!
//! The same functions drive every output: the raster preview/export surface,
//! the SVG surface for vector export, and measurement contexts.

use super::color::Color;
use super::font::FontDescriptor;
use super::scene::{CanvasSpec, Scene};
use super::shape::Shape;
use crate::util::{self, Point};

/// Renders a whole scene (background, then shapes) to a Cairo context.
///
/// The context is expected to be in canvas coordinates; callers apply any
/// pixel-ratio scaling before calling this.
pub fn render_scene(ctx: &cairo::Context, scene: &Scene) {
    render_on_canvas(ctx, &scene.canvas, &scene.shapes);
}

/// Renders `shapes` over the background of `canvas`.
pub fn render_on_canvas(ctx: &cairo::Context, canvas: &CanvasSpec, shapes: &[Shape]) {
    if let Some(bg) = canvas.background_fill() {
        render_background(ctx, bg);
    }
    render_shapes(ctx, shapes);
}

/// Fills the whole clip area with a solid background color.
///
/// Transparent canvases never call this, so their background stays at alpha 0.
pub fn render_background(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    let _ = ctx.paint(); // if paint fails the background simply stays transparent
}

/// Renders all shapes in a collection to a Cairo context.
///
/// Shapes are drawn in the order they appear (first shape = bottom layer).
pub fn render_shapes(ctx: &cairo::Context, shapes: &[Shape]) {
    for shape in shapes {
        render_shape(ctx, shape);
    }
}

/// Renders a single shape to a Cairo context.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) {
    match shape {
        Shape::Polyline {
            points,
            color,
            width,
            opacity,
            tension,
        } => {
            with_opacity(ctx, *opacity, |ctx| {
                render_polyline(ctx, points, *color, *width, *tension)
            });
        }
        Shape::Text {
            x,
            y,
            text,
            font,
            size,
            letter_spacing,
            color,
            opacity,
            skew_x,
            texture,
        } => {
            with_opacity(ctx, *opacity, |ctx| {
                render_text(
                    ctx,
                    (*x, *y),
                    text,
                    font,
                    *size,
                    *letter_spacing,
                    *color,
                    *skew_x,
                    *texture,
                )
            });
        }
        Shape::Circle {
            cx,
            cy,
            radius,
            color,
            width,
            opacity,
        } => {
            with_opacity(ctx, *opacity, |ctx| {
                render_circle(ctx, (*cx, *cy), *radius, *color, *width)
            });
        }
        Shape::Group {
            pivot,
            rotation,
            children,
        } => {
            let _ = ctx.save();
            if *rotation != 0.0 {
                ctx.translate(pivot.0, pivot.1);
                ctx.rotate(rotation.to_radians());
                ctx.translate(-pivot.0, -pivot.1);
            }
            render_shapes(ctx, children);
            let _ = ctx.restore();
        }
    }
}

/// Runs `draw` so that `opacity` applies to the finished shape as a whole.
///
/// Overlapping segments of a translucent stroke must not darken each other, so
/// translucent shapes are drawn into an intermediate group and composited once.
fn with_opacity(ctx: &cairo::Context, opacity: f64, draw: impl FnOnce(&cairo::Context)) {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }
    if opacity >= 1.0 {
        draw(ctx);
        return;
    }

    ctx.push_group();
    draw(ctx);
    if ctx.pop_group_to_source().is_ok() {
        let _ = ctx.paint_with_alpha(opacity);
    }
}

/// Render a polyline through `points`, curved by `tension`.
///
/// A single point is drawn as a round dot so taps committed by other means
/// remain visible.
pub fn render_polyline(ctx: &cairo::Context, points: &[Point], color: Color, width: f64, tension: f64) {
    if points.is_empty() {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    let (x0, y0) = points[0];
    ctx.move_to(x0, y0);
    if points.len() == 1 {
        ctx.line_to(x0, y0);
    }

    for segment in util::cardinal_segments(points, tension) {
        ctx.curve_to(
            segment.ctrl1.0,
            segment.ctrl1.1,
            segment.ctrl2.0,
            segment.ctrl2.1,
            segment.to.0,
            segment.to.1,
        );
    }

    let _ = ctx.stroke();
}

/// Render a circle outline
fn render_circle(ctx: &cairo::Context, center: Point, radius: f64, color: Color, width: f64) {
    if radius <= 0.0 {
        return;
    }
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.new_sub_path();
    ctx.arc(center.0, center.1, radius, 0.0, 2.0 * std::f64::consts::PI);
    let _ = ctx.stroke();
}

/// Creates a Pango layout for a text run on the given context.
///
/// Shared by rendering and measurement so both see identical metrics.
pub fn text_layout(
    ctx: &cairo::Context,
    text: &str,
    font: &FontDescriptor,
    size: f64,
    letter_spacing: f64,
) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    let desc = font.pango_description(size);
    layout.set_font_description(Some(&desc));

    if letter_spacing != 0.0 {
        let attrs = pango::AttrList::new();
        attrs.insert(pango::AttrInt::new_letter_spacing(
            (letter_spacing * pango::SCALE as f64).round() as i32,
        ));
        layout.set_attributes(Some(&attrs));
    }

    layout.set_text(text);
    layout
}

/// Renders a run of text with its top-left corner at `origin`.
///
/// `skew_x` shears the glyph run horizontally about the origin; it composes
/// with any rotation applied by an enclosing group. A non-zero `texture`
/// (0 - 100) lays a soft ink shadow under the glyphs first.
#[allow(clippy::too_many_arguments)]
pub fn render_text(
    ctx: &cairo::Context,
    origin: Point,
    text: &str,
    font: &FontDescriptor,
    size: f64,
    letter_spacing: f64,
    color: Color,
    skew_x: f64,
    texture: f64,
) {
    if text.is_empty() {
        return;
    }

    let _ = ctx.save();

    // Grayscale antialiasing; subpixel AA fringes on transparent surfaces
    ctx.set_antialias(cairo::Antialias::Best);

    ctx.translate(origin.0, origin.1);
    if skew_x != 0.0 {
        ctx.transform(cairo::Matrix::new(1.0, 0.0, skew_x, 1.0, 0.0, 0.0));
    }

    let layout = text_layout(ctx, text, font, size, letter_spacing);

    if texture > 0.0 {
        render_ink_shadow(ctx, &layout, texture.min(100.0), skew_x);
    }

    ctx.move_to(0.0, 0.0);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    pangocairo::functions::show_layout(ctx, &layout);

    let _ = ctx.restore();
}

/// Shadow color alpha before the texture strength is applied.
const INK_SHADOW_ALPHA: f64 = 0.2;

/// Downward shift of the ink shadow in canvas pixels.
const INK_SHADOW_DROP: f64 = 1.0;

/// Draws `layout` as a blurred black shadow.
///
/// The blur radius is `texture / 10` and the shadow alpha `0.2 * texture / 100`.
/// Blur is approximated by compositing offset copies on two rings around the
/// glyphs into one group, so the centre builds up and the rim fades out.
fn render_ink_shadow(ctx: &cairo::Context, layout: &pango::Layout, texture: f64, skew_x: f64) {
    let radius = texture / 10.0;
    let mut offsets = vec![(0.0, 0.0)];
    if radius >= 0.5 {
        for ring in [radius / 2.0, radius] {
            for step in 0..8 {
                let angle = step as f64 * std::f64::consts::FRAC_PI_4;
                offsets.push((ring * angle.cos(), ring * angle.sin()));
            }
        }
    }
    let copy_alpha = 1.0 / offsets.len() as f64;

    ctx.push_group();
    ctx.set_source_rgba(0.0, 0.0, 0.0, copy_alpha);
    for (dx, dy) in offsets {
        let dy = dy + INK_SHADOW_DROP;
        // Offsets are in canvas space; undo the shear so the shadow does not lean
        ctx.move_to(dx - skew_x * dy, dy);
        pangocairo::functions::show_layout(ctx, layout);
    }
    if ctx.pop_group_to_source().is_ok() {
        let _ = ctx.paint_with_alpha(INK_SHADOW_ALPHA * texture / 100.0);
    }
}
