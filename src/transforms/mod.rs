//! Built-in transforms
//!
//! # Module Structure
//!
//! - [`types`] - Request types, one variant per transform
//! - [`validate`] - Parameter validators run before any pixel work
//! - [`greyscale`] - Luma desaturation
//! - [`colorize`] - Tint / wash / softlight color blending
//! - [`circle`] - Circular crop with optional ring border
//! - [`blink`] - Multi-frame GIF animation

pub mod blink;
pub mod circle;
pub mod colorize;
pub mod greyscale;
pub mod types;
pub mod validate;

pub use types::{
    BlinkParams, CircleParams, ColorParams, GreyscaleParams, ImageInput, TransformRequest, BLINK,
    CIRCLE, COLOR, GREYSCALE,
};

/// Short human-readable description of a built-in transform.
pub fn explain(name: &str) -> Option<&'static str> {
    match name {
        GREYSCALE => Some("Desaturate to Rec. 601 luma, keeping alpha"),
        COLOR => Some("Blend a target color into every pixel (tint, wash, softlight)"),
        CIRCLE => Some("Crop to a circle, optionally with a ring border"),
        BLINK => Some("Combine two or more frames into an animated GIF"),
        _ => None,
    }
}
