//! Format encoders: PNG from the raster, SVG from the shapes, PDF around the raster.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use cairo::{Context, ImageSurface, PdfSurface, SvgSurface};

use super::types::ExportError;
use crate::draw::{CanvasSpec, Shape, render};

/// In-memory sink that stays readable after a stream surface takes ownership of a clone.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Encodes an ARGB32 surface as PNG, keeping the alpha channel.
pub fn encode_png(surface: &ImageSurface) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    surface.write_to_png(&mut buffer)?;
    Ok(buffer)
}

/// Serializes `shapes` as an SVG document the size of `canvas`.
///
/// Works in canvas units; pixel ratio and trimming do not apply.
pub fn encode_svg(canvas: &CanvasSpec, shapes: &[Shape]) -> Result<Vec<u8>, ExportError> {
    let sink = SharedBuffer::default();
    let surface = SvgSurface::for_stream(canvas.width as f64, canvas.height as f64, sink.clone())?;

    {
        let ctx = Context::new(&surface)?;
        render::render_on_canvas(&ctx, canvas, shapes);
        ctx.status()?;
    }

    surface.finish();
    surface.status()?;
    non_empty(sink.take(), "svg")
}

/// Wraps the raster in a single-page PDF whose page matches the surface in pixels.
pub fn encode_pdf(surface: &ImageSurface) -> Result<Vec<u8>, ExportError> {
    let width = surface.width() as f64;
    let height = surface.height() as f64;
    let sink = SharedBuffer::default();
    let document = PdfSurface::for_stream(width, height, sink.clone())?;

    {
        let ctx = Context::new(&document)?;
        ctx.set_source_surface(surface, 0.0, 0.0)?;
        ctx.paint()?;
        ctx.show_page()?;
    }

    document.finish();
    document.status()?;
    non_empty(sink.take(), "pdf")
}

fn non_empty(bytes: Vec<u8>, format: &str) -> Result<Vec<u8>, ExportError> {
    if bytes.is_empty() {
        Err(ExportError::Encode(format!("{format} surface produced no output")))
    } else {
        Ok(bytes)
    }
}
