//! pixelfx - named image transforms behind a single dispatch point
//!
//! This library provides functionality to:
//! - Register transforms by name and dispatch typed requests to them
//! - Desaturate, color-blend, circle-crop and animate raster images
//! - Decode and encode PNG / GIF payloads as raw bytes
//!
//! Handlers take a [`TransformRequest`] and return encoded bytes; the
//! [`Registry`] validates parameters first and classifies every failure as
//! a [`TransformError`].

pub mod assets;
pub mod cli;
pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod output;
pub mod pixel;
pub mod raster;
pub mod registry;
pub mod transforms;

pub use error::{BoxError, ErrorKind, TransformError};
pub use raster::RasterImage;
pub use registry::{Registry, RegistryBuilder};
pub use transforms::TransformRequest;
