//! Rasterization at a pixel ratio and trimming to visible content.

use cairo::{Context, Format, ImageSurface};
use log::debug;

use super::bounds::BoundingBox;
use super::types::ExportError;
use crate::draw::{CanvasSpec, Shape, render};

/// Renders `shapes` onto a fresh ARGB32 surface of `canvas` scaled by its pixel ratio.
pub fn rasterize(canvas: &CanvasSpec, shapes: &[Shape]) -> Result<ImageSurface, ExportError> {
    let (width, height) = canvas.scaled_size();
    let surface = ImageSurface::create(Format::ARgb32, width as i32, height as i32)?;

    {
        let ctx = Context::new(&surface)?;
        let ratio = canvas.pixel_ratio.as_f64();
        ctx.scale(ratio, ratio);
        render::render_on_canvas(&ctx, canvas, shapes);
    }

    surface.flush();
    debug!(
        "Rasterized {} shapes at {} ({}x{} px)",
        shapes.len(),
        canvas.pixel_ratio,
        width,
        height
    );
    Ok(surface)
}

/// Copies the `bounds` region of `source` into a new surface with `padding`
/// transparent pixels on every side.
///
/// The result is `bounds.width + 2 * padding` by `bounds.height + 2 * padding`.
pub fn trim(
    source: &ImageSurface,
    bounds: BoundingBox,
    padding: u32,
) -> Result<ImageSurface, ExportError> {
    let side = |extent: u32| {
        i32::try_from(extent.saturating_add(padding.saturating_mul(2)))
            .map_err(|_| cairo::Error::InvalidSize)
    };
    let surface = ImageSurface::create(Format::ARgb32, side(bounds.width)?, side(bounds.height)?)?;

    {
        let ctx = Context::new(&surface)?;
        ctx.set_source_surface(
            source,
            padding as f64 - bounds.x as f64,
            padding as f64 - bounds.y as f64,
        )?;
        ctx.rectangle(
            padding as f64,
            padding as f64,
            bounds.width as f64,
            bounds.height as f64,
        );
        ctx.fill()?;
    }

    surface.flush();
    Ok(surface)
}
