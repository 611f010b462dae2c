//! Transform request types
//!
//! One strongly-typed variant per transform; the dispatcher never sees a
//! loose parameter bag.

use std::io;
use std::path::PathBuf;

use image::Rgb;

use crate::error::{BoxError, TransformError};
use crate::pixel::BlendMode;
use crate::raster::RasterImage;

pub const GREYSCALE: &str = "greyscale";
pub const COLOR: &str = "color";
pub const CIRCLE: &str = "circle";
pub const BLINK: &str = "blink";

/// Where an input image comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ImageInput {
    /// Encoded image bytes already in memory
    Bytes(Vec<u8>),
    /// Path to an encoded image on disk (already resolved)
    File(PathBuf),
}

impl ImageInput {
    /// Read (if needed) and decode the input.
    ///
    /// A missing file becomes [`TransformError::AssetNotFound`]; other I/O
    /// failures are returned as-is for the dispatcher to wrap.
    pub fn load(&self) -> Result<RasterImage, BoxError> {
        match self {
            ImageInput::Bytes(bytes) => Ok(RasterImage::decode(bytes)?),
            ImageInput::File(path) => {
                let bytes = std::fs::read(path).map_err(|e| -> BoxError {
                    if e.kind() == io::ErrorKind::NotFound {
                        Box::new(TransformError::AssetNotFound(path.clone()))
                    } else {
                        Box::new(e)
                    }
                })?;
                Ok(RasterImage::decode(&bytes)?)
            }
        }
    }

    /// Short description for log lines.
    pub fn describe(&self) -> String {
        match self {
            ImageInput::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
            ImageInput::File(path) => path.display().to_string(),
        }
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        ImageInput::Bytes(bytes)
    }
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::File(path)
    }
}

/// Parameters for `greyscale`
#[derive(Debug, Clone, PartialEq)]
pub struct GreyscaleParams {
    pub input: ImageInput,
}

/// Parameters for `color`
#[derive(Debug, Clone, PartialEq)]
pub struct ColorParams {
    pub input: ImageInput,
    pub mode: BlendMode,
    pub color: Rgb<u8>,
    /// Weight of the target color in `wash` mode, `[0, 1]`
    pub opacity: f64,
    /// How far the result moves from the original toward the blend, `[0, 1]`
    pub intensity: f64,
}

/// Parameters for `circle`
#[derive(Debug, Clone, PartialEq)]
pub struct CircleParams {
    pub input: ImageInput,
    /// Ring width in pixels; 0 means no border
    pub border_width: u32,
    /// Ring color, opaque black when `None`
    pub border_color: Option<Rgb<u8>>,
}

/// Parameters for `blink`
#[derive(Debug, Clone, PartialEq)]
pub struct BlinkParams {
    /// Frames in playback order; at least two
    pub inputs: Vec<ImageInput>,
    /// Per-frame delay; GIF stores 10 ms steps, so this is rounded to the nearest one
    pub delay_ms: u32,
    /// Repeat forever when true, play once otherwise
    pub looping: bool,
}

/// A request for one of the built-in transforms
#[derive(Debug, Clone, PartialEq)]
pub enum TransformRequest {
    Greyscale(GreyscaleParams),
    Color(ColorParams),
    Circle(CircleParams),
    Blink(BlinkParams),
}

impl TransformRequest {
    /// Canonical transform name for this variant.
    pub fn name(&self) -> &'static str {
        match self {
            TransformRequest::Greyscale(_) => GREYSCALE,
            TransformRequest::Color(_) => COLOR,
            TransformRequest::Circle(_) => CIRCLE,
            TransformRequest::Blink(_) => BLINK,
        }
    }

    /// Number of input images the request carries.
    pub fn input_count(&self) -> usize {
        match self {
            TransformRequest::Greyscale(_)
            | TransformRequest::Color(_)
            | TransformRequest::Circle(_) => 1,
            TransformRequest::Blink(p) => p.inputs.len(),
        }
    }
}
