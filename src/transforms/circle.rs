//! `circle`: circular crop with an optional ring border

use image::{Rgb, Rgba};

use crate::error::{BoxError, TransformError};
use crate::pixel::mask::{apply_coverage, circle_coverage};
use crate::raster::RasterImage;

use super::types::TransformRequest;
use super::validate::circle_params;

/// Border color when none is given.
pub const DEFAULT_BORDER_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Mask a square image to the inscribed circle.
///
/// # Panics
///
/// If `image` is not square.
pub fn crop_circle(image: &mut RasterImage) {
    assert!(image.is_square(), "crop_circle needs a square image");
    let size = image.width();
    let radius = size as f64 / 2.0;
    image.map_pixels(|x, y, px| apply_coverage(px, circle_coverage(x, y, size, radius)));
}

/// Square canvas of side `size` holding a solid disk of `color`.
///
/// Only the outer edge is soft; everything inside it is fully opaque, so a
/// photo drawn over the middle leaves no see-through seam.
pub fn border_disk(size: u32, color: Rgb<u8>) -> Result<RasterImage, TransformError> {
    let mut canvas = RasterImage::new(size, size)?;
    let radius = size as f64 / 2.0;
    canvas.map_pixels(|x, y, _| {
        let cov = circle_coverage(x, y, size, radius);
        Rgba([color[0], color[1], color[2], (cov * 255.0).round() as u8])
    });
    Ok(canvas)
}

/// Crop `source` to a circle of diameter `min(width, height)`, optionally
/// surrounded by a ring of `border_width` pixels.
///
/// The result is `size x size` without a border and
/// `(size + 2 * border_width)` square with one.
pub fn circle_image(
    source: &RasterImage,
    border_width: u32,
    border_color: Rgb<u8>,
) -> Result<RasterImage, TransformError> {
    let size = source.width().min(source.height());

    if border_width > 0 && border_width as u64 * 2 >= size as u64 {
        return Err(TransformError::BorderTooLarge { border_width, size });
    }

    let mut cropped =
        if source.is_square() { source.clone() } else { source.resize_to_cover(size, size)? };
    crop_circle(&mut cropped);

    if border_width == 0 {
        return Ok(cropped);
    }

    // The disk already carries the outer edge; the ring is whatever the
    // photo leaves uncovered.
    let mut canvas = border_disk(size + 2 * border_width, border_color)?;
    canvas.draw_over(&cropped, border_width, border_width);
    Ok(canvas)
}

/// Handler for `circle`; returns PNG bytes.
pub fn run(request: &TransformRequest) -> Result<Vec<u8>, BoxError> {
    let params = circle_params(request)?;
    let source = params.input.load()?;
    let color = params.border_color.unwrap_or(DEFAULT_BORDER_COLOR);
    tracing::debug!(
        width = source.width(),
        height = source.height(),
        border_width = params.border_width,
        border_color = %crate::color::to_hex(color),
        "circle"
    );
    Ok(circle_image(&source, params.border_width, color)?.encode_png()?)
}
