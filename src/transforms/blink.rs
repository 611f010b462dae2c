//! `blink`: multi-frame GIF animation

use rayon::prelude::*;

use crate::codec;
use crate::error::{BoxError, TransformError};
use crate::raster::RasterImage;

use super::types::TransformRequest;
use super::validate::{blink_params, MIN_BLINK_FRAMES};

/// Bring every frame to the dimensions of the first one.
///
/// Mismatched frames are cover-cropped, never letterboxed. Order is kept.
pub fn normalize_frames(frames: Vec<RasterImage>) -> Result<Vec<RasterImage>, TransformError> {
    let Some(first) = frames.first() else {
        return Err(TransformError::NotEnoughFrames(0));
    };
    let (width, height) = first.dimensions();

    frames
        .into_par_iter()
        .map(|frame| {
            if frame.dimensions() == (width, height) {
                Ok(frame)
            } else {
                tracing::debug!(
                    from = ?frame.dimensions(),
                    to = ?(width, height),
                    "resizing blink frame"
                );
                frame.resize_to_cover(width, height)
            }
        })
        .collect()
}

/// Handler for `blink`; returns GIF bytes.
pub fn run(request: &TransformRequest) -> Result<Vec<u8>, BoxError> {
    let params = blink_params(request)?;
    if params.inputs.len() < MIN_BLINK_FRAMES {
        return Err(TransformError::NotEnoughFrames(params.inputs.len()).into());
    }

    let decoded = params
        .inputs
        .par_iter()
        .map(|input| input.load())
        .collect::<Result<Vec<_>, BoxError>>()?;

    let frames = normalize_frames(decoded)?;
    tracing::debug!(
        frames = frames.len(),
        delay_ms = params.delay_ms,
        looping = params.looping,
        "blink"
    );
    Ok(codec::encode_gif(&frames, params.delay_ms, params.looping)?)
}
