//! Pure per-pixel math: color space conversion, blend modes and masks.
//!
//! Nothing in here touches I/O or owns an image; the transform handlers drive
//! these functions over a [`RasterImage`](crate::raster::RasterImage).

pub mod blend;
pub mod hsl;
pub mod mask;

pub use blend::{softlight, tint, wash, BlendMode, ColorBlend};
pub use hsl::{hsl_to_rgb, rgb_to_hsl, Hsl};
pub use mask::{circle_coverage, source_over};
