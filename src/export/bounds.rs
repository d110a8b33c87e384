//! Bounding box detection over transparent rasters.

use super::types::ExportError;

/// Integer rectangle in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Alpha of the ARGB32 pixel starting at `offset` (native-endian, alpha in the top byte).
fn alpha_at(data: &[u8], offset: usize) -> u8 {
    let pixel = u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]);
    (pixel >> 24) as u8
}

/// Smallest rectangle containing every pixel with non-zero alpha.
///
/// `data` is ARGB32 pixel memory with `stride` bytes per row. Returns `None`
/// when every pixel is fully transparent.
pub fn content_bounds(data: &[u8], width: u32, height: u32, stride: usize) -> Option<BoundingBox> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for y in 0..height {
        let row = y as usize * stride;
        for x in 0..width {
            if alpha_at(data, row + x as usize * 4) == 0 {
                continue;
            }
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    found.then(|| BoundingBox::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Runs [`content_bounds`] over an image surface.
pub fn surface_content_bounds(
    surface: &mut cairo::ImageSurface,
) -> Result<Option<BoundingBox>, ExportError> {
    surface.flush();
    let width = surface.width().max(0) as u32;
    let height = surface.height().max(0) as u32;
    let stride = surface.stride().max(0) as usize;
    let data = surface.data()?;
    Ok(content_bounds(&data, width, height, stride))
}
