//! `greyscale`: luma desaturation

use image::Rgba;

use crate::error::BoxError;
use crate::raster::RasterImage;

use super::types::TransformRequest;
use super::validate::greyscale_params;

/// Rec. 601 luma, rounded.
pub fn luma(px: Rgba<u8>) -> u8 {
    let y = 0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64;
    y.round().clamp(0.0, 255.0) as u8
}

/// Desaturate every pixel, keeping alpha.
pub fn greyscale_image(source: &RasterImage) -> RasterImage {
    let mut out = source.clone();
    out.map_pixels(|_, _, px| {
        let y = luma(px);
        Rgba([y, y, y, px[3]])
    });
    out
}

/// Handler for `greyscale`; returns PNG bytes.
pub fn run(request: &TransformRequest) -> Result<Vec<u8>, BoxError> {
    let params = greyscale_params(request)?;
    let source = params.input.load()?;
    tracing::debug!(input = %params.input.describe(), width = source.width(), height = source.height(), "greyscale");
    Ok(greyscale_image(&source).encode_png()?)
}
