//! `color`: blend a target color into every pixel

use crate::error::BoxError;
use crate::pixel::ColorBlend;
use crate::raster::RasterImage;

use super::types::TransformRequest;
use super::validate::color_params;

/// Apply `blend` to every pixel of `source` into a new raster of the same size.
pub fn colorize_image(source: &RasterImage, blend: &ColorBlend) -> RasterImage {
    let mut out = source.clone();
    out.map_pixels(|_, _, px| blend.apply(px));
    out
}

/// Handler for `color`; returns PNG bytes.
pub fn run(request: &TransformRequest) -> Result<Vec<u8>, BoxError> {
    let params = color_params(request)?;
    let source = params.input.load()?;
    let blend = ColorBlend::new(params.mode, params.color, params.opacity, params.intensity);
    tracing::debug!(
        mode = %params.mode,
        color = %crate::color::to_hex(params.color),
        opacity = params.opacity,
        intensity = params.intensity,
        "color"
    );
    Ok(colorize_image(&source, &blend).encode_png()?)
}
