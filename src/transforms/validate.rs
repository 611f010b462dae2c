//! Parameter validators for the built-in transforms
//!
//! Validators run before any image is decoded. Checks that need the decoded
//! image (the circle border against the image size) live in the handlers.

use crate::error::TransformError;

use super::types::{
    BlinkParams, CircleParams, ColorParams, GreyscaleParams, TransformRequest, BLINK, CIRCLE,
    COLOR, GREYSCALE,
};

/// Minimum number of frames for `blink`.
pub const MIN_BLINK_FRAMES: usize = 2;

fn mismatch(expected: &str, request: &TransformRequest) -> TransformError {
    TransformError::validation(format!(
        "transform '{}' cannot run a '{}' request",
        expected,
        request.name()
    ))
}

pub(crate) fn greyscale_params(request: &TransformRequest) -> Result<&GreyscaleParams, TransformError> {
    match request {
        TransformRequest::Greyscale(p) => Ok(p),
        other => Err(mismatch(GREYSCALE, other)),
    }
}

pub(crate) fn color_params(request: &TransformRequest) -> Result<&ColorParams, TransformError> {
    match request {
        TransformRequest::Color(p) => Ok(p),
        other => Err(mismatch(COLOR, other)),
    }
}

pub(crate) fn circle_params(request: &TransformRequest) -> Result<&CircleParams, TransformError> {
    match request {
        TransformRequest::Circle(p) => Ok(p),
        other => Err(mismatch(CIRCLE, other)),
    }
}

pub(crate) fn blink_params(request: &TransformRequest) -> Result<&BlinkParams, TransformError> {
    match request {
        TransformRequest::Blink(p) => Ok(p),
        other => Err(mismatch(BLINK, other)),
    }
}

/// Check that `value` is a finite number in `[0, 1]`.
pub fn unit_range(name: &str, value: f64) -> Result<(), TransformError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TransformError::validation(format!("{name} must be between 0 and 1, got {value}")))
    }
}

pub fn validate_greyscale(request: &TransformRequest) -> Result<(), TransformError> {
    greyscale_params(request).map(|_| ())
}

pub fn validate_color(request: &TransformRequest) -> Result<(), TransformError> {
    let params = color_params(request)?;
    unit_range("opacity", params.opacity)?;
    unit_range("intensity", params.intensity)?;
    Ok(())
}

pub fn validate_circle(request: &TransformRequest) -> Result<(), TransformError> {
    circle_params(request).map(|_| ())
}

pub fn validate_blink(request: &TransformRequest) -> Result<(), TransformError> {
    let params = blink_params(request)?;
    if params.inputs.len() < MIN_BLINK_FRAMES {
        return Err(TransformError::NotEnoughFrames(params.inputs.len()));
    }
    Ok(())
}
