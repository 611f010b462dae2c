//! Geometric masks: circle coverage and alpha compositing
//!
//! Coverage is evaluated at pixel centres with a one-pixel linear ramp across
//! the edge, so a pixel whose centre sits exactly on the radius gets half
//! coverage. Every circle in the crate goes through [`circle_coverage`].

use image::Rgba;

/// Distance from the centre of pixel `(x, y)` to the centre of a `size`-wide square.
pub fn center_distance(x: u32, y: u32, size: u32) -> f64 {
    let c = size as f64 / 2.0;
    let dx = x as f64 + 0.5 - c;
    let dy = y as f64 + 0.5 - c;
    (dx * dx + dy * dy).sqrt()
}

/// Fraction of pixel `(x, y)` covered by a circle of `radius` centred in a
/// `size`-wide square.
pub fn circle_coverage(x: u32, y: u32, size: u32, radius: f64) -> f64 {
    (radius - center_distance(x, y, size) + 0.5).clamp(0.0, 1.0)
}

/// Scale a pixel's alpha by `coverage`.
pub fn apply_coverage(px: Rgba<u8>, coverage: f64) -> Rgba<u8> {
    let alpha = (px[3] as f64 * coverage).round() as u8;
    Rgba([px[0], px[1], px[2], alpha])
}

/// Porter-Duff "source over" for straight-alpha pixels.
pub fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let src_alpha = src[3] as f64 / 255.0;
    let dst_alpha = dst[3] as f64 / 255.0;

    if src_alpha == 0.0 {
        return dst;
    }

    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);

    let composite = |s: u8, d: u8| -> u8 {
        let s = s as f64 / 255.0;
        let d = d as f64 / 255.0;
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        composite(src[0], dst[0]),
        composite(src[1], dst[1]),
        composite(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
