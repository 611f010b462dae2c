//! RGB <-> HSL conversion

use image::Rgb;

/// A color in HSL space.
///
/// - `hue` is in degrees, `[0, 360)`
/// - `saturation` and `lightness` are in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self { hue, saturation, lightness }
    }
}

/// Convert 8-bit RGB to HSL.
pub fn rgb_to_hsl(color: Rgb<u8>) -> Hsl {
    let r = color[0] as f64 / 255.0;
    let g = color[1] as f64 / 255.0;
    let b = color[2] as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let lightness = (max + min) / 2.0;

    if delta < f64::EPSILON {
        return Hsl::new(0.0, 0.0, lightness);
    }

    let saturation = delta / (1.0 - (2.0 * lightness - 1.0).abs());

    let hue = if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    // rem_euclid can land exactly on 360.0 through rounding
    let hue = if hue >= 360.0 { hue - 360.0 } else { hue };

    Hsl::new(hue, saturation.clamp(0.0, 1.0), lightness)
}

/// Convert HSL back to 8-bit RGB, rounding each channel.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb<u8> {
    let Hsl { hue, saturation, lightness } = hsl;

    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let m = lightness - chroma / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgb([to_channel(r + m), to_channel(g + m), to_channel(b + m)])
}

fn to_channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
