//! Codec boundary: decoding input bytes, encoding PNG and animated GIF

use std::io::Cursor;
use std::time::Duration;

use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::codecs::png::PngEncoder;
use image::{AnimationDecoder, ColorType, Delay, Frame, ImageEncoder};

use crate::error::TransformError;
use crate::raster::RasterImage;

/// Smallest input worth handing to a decoder; the PNG signature alone is 8 bytes.
pub const MIN_INPUT_LEN: usize = 8;

/// Decode any supported still image (PNG, GIF first frame, JPEG, ...) into RGBA8.
pub fn decode(bytes: &[u8]) -> Result<RasterImage, TransformError> {
    if bytes.len() < MIN_INPUT_LEN {
        return Err(TransformError::decode(format!(
            "input is {} bytes, too small to contain an image header",
            bytes.len()
        )));
    }
    let image = image::load_from_memory(bytes).map_err(|e| TransformError::decode(e.to_string()))?;
    RasterImage::from_image(image.into_rgba8())
}

/// Encode a raster as PNG.
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buf = Vec::new();
    let (w, h) = image.dimensions();
    PngEncoder::new(&mut buf).write_image(image.as_image().as_raw(), w, h, ColorType::Rgba8)?;
    Ok(buf)
}

/// GIF frame delays are stored in hundredths of a second.
pub const GIF_DELAY_UNIT_MS: u32 = 10;

/// Largest delay a GIF frame can carry.
pub const GIF_MAX_DELAY_MS: u32 = u16::MAX as u32 * GIF_DELAY_UNIT_MS;

/// The delay a GIF will actually store for `delay_ms`: rounded to the
/// nearest 10 ms (halves round up) and capped at [`GIF_MAX_DELAY_MS`].
pub fn gif_delay_ms(delay_ms: u32) -> u32 {
    let units = delay_ms.saturating_add(GIF_DELAY_UNIT_MS / 2) / GIF_DELAY_UNIT_MS;
    (units * GIF_DELAY_UNIT_MS).min(GIF_MAX_DELAY_MS)
}

/// Encode frames as an animated GIF.
///
/// Every frame carries `delay_ms`, snapped with [`gif_delay_ms`]. `looping`
/// repeats forever; otherwise the animation plays once.
pub fn encode_gif(
    frames: &[RasterImage],
    delay_ms: u32,
    looping: bool,
) -> Result<Vec<u8>, image::ImageError> {
    let stored_ms = gif_delay_ms(delay_ms);
    if stored_ms != delay_ms {
        tracing::warn!(
            requested_ms = delay_ms,
            stored_ms,
            "GIF delays have 10 ms resolution; frame delay adjusted"
        );
    }

    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);

        // Without a NETSCAPE loop extension viewers play the animation once;
        // a loop count of zero in that extension means "forever".
        if looping {
            encoder.set_repeat(Repeat::Infinite)?;
        }

        for raster in frames {
            let delay = Delay::from_numer_denom_ms(stored_ms, 1);
            let frame = Frame::from_parts(raster.as_image().clone(), 0, 0, delay);
            encoder.encode_frame(frame)?;
        }
    }
    Ok(buf)
}

/// Decode every frame of a GIF together with its delay.
pub fn decode_gif_frames(bytes: &[u8]) -> Result<Vec<(RasterImage, Duration)>, TransformError> {
    let decoder =
        GifDecoder::new(Cursor::new(bytes)).map_err(|e| TransformError::decode(e.to_string()))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| TransformError::decode(e.to_string()))?;

    frames
        .into_iter()
        .map(|frame| {
            let delay = Duration::from(frame.delay());
            RasterImage::from_image(frame.into_buffer()).map(|raster| (raster, delay))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, color: Rgba<u8>) -> RasterImage {
        RasterImage::filled(width, height, color).unwrap()
    }

    #[test]
    fn test_png_roundtrip_preserves_pixels() {
        let mut img = solid(7, 3, Rgba([10, 20, 30, 255]));
        img.put_pixel(6, 2, Rgba([1, 2, 3, 4]));
        let bytes = encode_png(&img).unwrap();
        let back = decode(&bytes).unwrap();
        assert_eq!(back.dimensions(), (7, 3));
        assert_eq!(back, img);
    }

    #[test]
    fn test_decode_too_small() {
        let err = decode(&[0x89, b'P', b'N']).unwrap_err();
        assert!(matches!(err, TransformError::Decode(_)));
        assert!(err.to_string().contains("too small"));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode(b"definitely not an image at all").unwrap_err();
        assert!(matches!(err, TransformError::Decode(_)));
    }

    #[test]
    fn test_gif_frames_and_delay() {
        let frames = vec![solid(4, 4, Rgba([255, 0, 0, 255])), solid(4, 4, Rgba([0, 0, 255, 255]))];
        let bytes = encode_gif(&frames, 120, true).unwrap();
        let decoded = decode_gif_frames(&bytes).unwrap();
        assert_eq!(decoded.len(), 2);
        for (raster, delay) in &decoded {
            assert_eq!(raster.dimensions(), (4, 4));
            assert_eq!(*delay, Duration::from_millis(120));
        }
    }

    #[test]
    fn test_gif_play_once() {
        let frames = vec![solid(2, 2, Rgba([0, 255, 0, 255])), solid(2, 2, Rgba([0, 0, 0, 255]))];
        let bytes = encode_gif(&frames, 50, false).unwrap();
        assert_eq!(&bytes[..6], b"GIF89a");
        assert!(!bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

        let looping = encode_gif(&frames, 50, true).unwrap();
        assert!(looping.windows(11).any(|w| w == b"NETSCAPE2.0"));
    }

    #[test]
    fn test_gif_delay_snaps_to_centiseconds() {
        assert_eq!(gif_delay_ms(0), 0);
        assert_eq!(gif_delay_ms(4), 0);
        assert_eq!(gif_delay_ms(5), 10);
        assert_eq!(gif_delay_ms(15), 20);
        assert_eq!(gif_delay_ms(120), 120);
        assert_eq!(gif_delay_ms(124), 120);
        assert_eq!(gif_delay_ms(u32::MAX), GIF_MAX_DELAY_MS);
    }

    #[test]
    fn test_gif_delay_rounds_instead_of_truncating() {
        let frames = vec![solid(2, 2, Rgba([9, 9, 9, 255])), solid(2, 2, Rgba([99, 99, 99, 255]))];
        for (requested, stored) in [(5, 10), (15, 20), (99, 100)] {
            let bytes = encode_gif(&frames, requested, true).unwrap();
            let decoded = decode_gif_frames(&bytes).unwrap();
            assert!(decoded.iter().all(|(_, d)| *d == Duration::from_millis(stored)), "{requested}ms");
        }
    }
}
