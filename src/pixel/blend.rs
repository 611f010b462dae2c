//! Blend modes for mixing a source pixel with a constant target color

use image::{Rgb, Rgba};
use serde::{Deserialize, Serialize};

use super::hsl::{hsl_to_rgb, rgb_to_hsl, Hsl};

/// How the target color is mixed into each source pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Keep source lightness, take hue and saturation from the target
    #[default]
    Tint,
    /// Linear mix of target and source weighted by opacity
    Wash,
    /// Soft-light compositing with the target as the blend layer
    Softlight,
}

impl BlendMode {
    pub const ALL: [BlendMode; 3] = [BlendMode::Tint, BlendMode::Wash, BlendMode::Softlight];

    /// Parse a blend mode name (case-insensitive)
    pub fn parse(s: &str) -> Option<BlendMode> {
        match s.to_ascii_lowercase().as_str() {
            "tint" => Some(BlendMode::Tint),
            "wash" => Some(BlendMode::Wash),
            "softlight" | "soft-light" => Some(BlendMode::Softlight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlendMode::Tint => "tint",
            BlendMode::Wash => "wash",
            BlendMode::Softlight => "softlight",
        }
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `target*opacity + orig*(1-opacity)` per channel, truncated.
pub fn wash(orig: Rgb<u8>, target: Rgb<u8>, opacity: f64) -> Rgb<u8> {
    let mix = |o: u8, t: u8| -> u8 {
        let v = t as f64 * opacity + o as f64 * (1.0 - opacity);
        v.clamp(0.0, 255.0) as u8
    };
    Rgb([mix(orig[0], target[0]), mix(orig[1], target[1]), mix(orig[2], target[2])])
}

/// Source lightness with the hue and saturation of `target`.
pub fn tint(orig: Rgb<u8>, target: Hsl) -> Rgb<u8> {
    let source = rgb_to_hsl(orig);
    hsl_to_rgb(Hsl::new(target.hue, target.saturation, source.lightness))
}

/// Soft-light of `target` over `orig`.
pub fn softlight(orig: Rgb<u8>, target: Rgb<u8>) -> Rgb<u8> {
    let mix = |o: u8, t: u8| -> u8 {
        let out = softlight_channel(o as f64 / 255.0, t as f64 / 255.0);
        (out.clamp(0.0, 1.0) * 255.0) as u8
    };
    Rgb([mix(orig[0], target[0]), mix(orig[1], target[1]), mix(orig[2], target[2])])
}

/// Soft-light for a single normalized channel; `b` is the backdrop, `s` the source.
pub(crate) fn softlight_channel(b: f64, s: f64) -> f64 {
    if s < 0.5 {
        b - (1.0 - 2.0 * s) * b * (1.0 - b)
    } else {
        let d = if b <= 0.25 { ((16.0 * b - 12.0) * b + 4.0) * b } else { b.sqrt() };
        b + (2.0 * s - 1.0) * (d - b)
    }
}

/// A fully parameterized blend: mode, target color, opacity and intensity.
///
/// The target's HSL form is computed once here rather than per pixel.
#[derive(Debug, Clone, Copy)]
pub struct ColorBlend {
    mode: BlendMode,
    target: Rgb<u8>,
    target_hsl: Hsl,
    opacity: f64,
    intensity: f64,
}

impl ColorBlend {
    /// `opacity` and `intensity` are expected in `[0, 1]`; they are clamped.
    pub fn new(mode: BlendMode, target: Rgb<u8>, opacity: f64, intensity: f64) -> Self {
        Self {
            mode,
            target,
            target_hsl: rgb_to_hsl(target),
            opacity: opacity.clamp(0.0, 1.0),
            intensity: intensity.clamp(0.0, 1.0),
        }
    }

    pub fn mode(&self) -> BlendMode {
        self.mode
    }

    /// Blend one pixel. Alpha is passed through untouched.
    pub fn apply(&self, px: Rgba<u8>) -> Rgba<u8> {
        let orig = Rgb([px[0], px[1], px[2]]);
        let blended = match self.mode {
            BlendMode::Wash => wash(orig, self.target, self.opacity),
            BlendMode::Tint => tint(orig, self.target_hsl),
            BlendMode::Softlight => softlight(orig, self.target),
        };

        let lerp = |o: u8, b: u8| -> u8 {
            let v = o as f64 + (b as f64 - o as f64) * self.intensity;
            v.clamp(0.0, 255.0) as u8
        };

        Rgba([
            lerp(orig[0], blended[0]),
            lerp(orig[1], blended[1]),
            lerp(orig[2], blended[2]),
            px[3],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [Rgb<u8>; 6] = [
        Rgb([0, 0, 0]),
        Rgb([255, 255, 255]),
        Rgb([12, 200, 99]),
        Rgb([128, 64, 32]),
        Rgb([1, 2, 3]),
        Rgb([250, 5, 180]),
    ];

    #[test]
    fn test_wash_opacity_bounds() {
        for orig in SAMPLES {
            for target in SAMPLES {
                assert_eq!(wash(orig, target, 0.0), orig);
                assert_eq!(wash(orig, target, 1.0), target);
            }
        }
    }

    #[test]
    fn test_wash_truncates() {
        // 255*0.5 + 0*0.5 = 127.5 -> 127
        assert_eq!(wash(Rgb([0, 0, 0]), Rgb([255, 255, 255]), 0.5), Rgb([127, 127, 127]));
    }

    #[test]
    fn test_tint_keeps_lightness() {
        let target = Rgb([200, 30, 60]);
        let target_hsl = rgb_to_hsl(target);
        for orig in SAMPLES {
            let out = tint(orig, target_hsl);
            let l_in = rgb_to_hsl(orig).lightness;
            let l_out = rgb_to_hsl(out).lightness;
            assert!((l_in - l_out).abs() <= 1.0 / 255.0, "{:?} -> {:?}", orig, out);
        }
    }

    #[test]
    fn test_softlight_mid_grey_target_is_identity() {
        // s = 127/255 sits just below 0.5, so the result barely moves
        for orig in SAMPLES {
            let out = softlight(orig, Rgb([127, 127, 127]));
            for c in 0..3 {
                assert!((orig[c] as i16 - out[c] as i16).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_softlight_channel_formula() {
        assert!((softlight_channel(0.5, 0.0) - 0.25).abs() < 1e-12);
        // b <= 0.25 branch
        let b: f64 = 0.2;
        let d = ((16.0 * b - 12.0) * b + 4.0) * b;
        assert!((softlight_channel(b, 1.0) - d).abs() < 1e-12);
        // b > 0.25 branch
        assert!((softlight_channel(0.64, 1.0) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_intensity_zero_leaves_pixel_unchanged() {
        let blend = ColorBlend::new(BlendMode::Wash, Rgb([255, 0, 0]), 1.0, 0.0);
        let px = Rgba([10, 20, 30, 40]);
        assert_eq!(blend.apply(px), px);
    }

    #[test]
    fn test_full_intensity_wash_equals_target() {
        let blend = ColorBlend::new(BlendMode::Wash, Rgb([255, 0, 0]), 1.0, 1.0);
        assert_eq!(blend.apply(Rgba([10, 20, 30, 99])), Rgba([255, 0, 0, 99]));
    }

    #[test]
    fn test_alpha_preserved_in_every_mode() {
        for mode in BlendMode::ALL {
            let blend = ColorBlend::new(mode, Rgb([0, 128, 255]), 0.7, 0.8);
            assert_eq!(blend.apply(Rgba([90, 90, 90, 13]))[3], 13);
        }
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(BlendMode::parse("TINT"), Some(BlendMode::Tint));
        assert_eq!(BlendMode::parse("soft-light"), Some(BlendMode::Softlight));
        assert_eq!(BlendMode::parse("multiply"), None);
        for mode in BlendMode::ALL {
            assert_eq!(BlendMode::parse(mode.as_str()), Some(mode));
        }
    }
}
