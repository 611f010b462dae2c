//! Owned RGBA8 raster used by every transform
//!
//! A thin wrapper around [`image::RgbaImage`] that guarantees non-zero
//! dimensions and provides the geometric helpers the handlers need.
//! Coordinate access outside the image panics; callers must stay within
//! `[0, width) x [0, height)`.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::codec;
use crate::error::TransformError;

/// A 2-D grid of RGBA samples, row-major, no padding.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    image: RgbaImage,
}

impl RasterImage {
    /// Allocate a fully transparent image.
    pub fn new(width: u32, height: u32) -> Result<Self, TransformError> {
        Self::filled(width, height, Rgba([0, 0, 0, 0]))
    }

    /// Allocate an image where every pixel is `color`.
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Result<Self, TransformError> {
        check_dimensions(width, height)?;
        Ok(Self { image: RgbaImage::from_pixel(width, height, color) })
    }

    /// Wrap an existing buffer.
    pub fn from_image(image: RgbaImage) -> Result<Self, TransformError> {
        check_dimensions(image.width(), image.height())?;
        Ok(Self { image })
    }

    /// Decode PNG/GIF/etc. bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, TransformError> {
        codec::decode(bytes)
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        codec::encode_png(self)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn is_square(&self) -> bool {
        self.width() == self.height()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Read the sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside the image.
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Write the sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside the image.
    pub fn put_pixel(&mut self, x: u32, y: u32, px: Rgba<u8>) {
        self.image.put_pixel(x, y, px);
    }

    /// Overwrite every sample with `color`.
    pub fn fill(&mut self, color: Rgba<u8>) {
        for px in self.image.pixels_mut() {
            *px = color;
        }
    }

    /// Replace every sample with `f(x, y, current)`.
    pub fn map_pixels<F>(&mut self, mut f: F)
    where
        F: FnMut(u32, u32, Rgba<u8>) -> Rgba<u8>,
    {
        for (x, y, px) in self.image.enumerate_pixels_mut() {
            *px = f(x, y, *px);
        }
    }

    /// Aspect-preserving scale so the image covers `width x height`, then a
    /// centred crop to exactly that size.
    pub fn resize_to_cover(&self, width: u32, height: u32) -> Result<RasterImage, TransformError> {
        check_dimensions(width, height)?;
        let (src_w, src_h) = self.dimensions();
        if (src_w, src_h) == (width, height) {
            return Ok(self.clone());
        }

        let scale = (width as f64 / src_w as f64).max(height as f64 / src_h as f64);
        let scaled_w = ((src_w as f64 * scale).round() as u32).max(width);
        let scaled_h = ((src_h as f64 * scale).round() as u32).max(height);

        let scaled = if (scaled_w, scaled_h) == (src_w, src_h) {
            self.image.clone()
        } else {
            imageops::resize(&self.image, scaled_w, scaled_h, FilterType::Triangle)
        };

        let x = (scaled_w - width) / 2;
        let y = (scaled_h - height) / 2;
        let cropped = imageops::crop_imm(&scaled, x, y, width, height).to_image();
        Ok(Self { image: cropped })
    }

    /// Centred `size x size` crop.
    ///
    /// # Panics
    ///
    /// If `size` is zero or larger than either dimension.
    pub fn crop_square(&self, size: u32) -> RasterImage {
        let (w, h) = self.dimensions();
        assert!(size > 0 && size <= w && size <= h, "crop {size} out of bounds for {w}x{h}");
        let x = (w - size) / 2;
        let y = (h - size) / 2;
        Self { image: imageops::crop_imm(&self.image, x, y, size, size).to_image() }
    }

    /// Composite `src` over this image with its top-left corner at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If `src` does not fit inside this image at that offset.
    pub fn draw_over(&mut self, src: &RasterImage, x: u32, y: u32) {
        assert!(
            x + src.width() <= self.width() && y + src.height() <= self.height(),
            "source {}x{} at ({x}, {y}) exceeds {}x{}",
            src.width(),
            src.height(),
            self.width(),
            self.height()
        );
        for (sx, sy, px) in src.image.enumerate_pixels() {
            let dst = self.image.get_pixel_mut(x + sx, y + sy);
            *dst = crate::pixel::source_over(*px, *dst);
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), TransformError> {
    if width == 0 || height == 0 {
        return Err(TransformError::validation(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RasterImage {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 0, 255])
        });
        RasterImage::from_image(image).unwrap()
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(RasterImage::new(0, 5).is_err());
        assert!(RasterImage::new(5, 0).is_err());
        assert!(RasterImage::from_image(RgbaImage::new(0, 0)).is_err());
    }

    #[test]
    fn test_get_put_fill() {
        let mut img = RasterImage::new(3, 2).unwrap();
        assert_eq!(img.get_pixel(2, 1), Rgba([0, 0, 0, 0]));
        img.put_pixel(2, 1, Rgba([9, 8, 7, 6]));
        assert_eq!(img.get_pixel(2, 1), Rgba([9, 8, 7, 6]));
        img.fill(Rgba([1, 1, 1, 1]));
        assert_eq!(img.get_pixel(2, 1), Rgba([1, 1, 1, 1]));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_read_panics() {
        let img = RasterImage::new(3, 2).unwrap();
        let _ = img.get_pixel(3, 0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_write_panics() {
        let mut img = RasterImage::new(3, 2).unwrap();
        img.put_pixel(0, 2, Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_resize_to_cover_dimensions() {
        let img = gradient(160, 80);
        assert_eq!(img.resize_to_cover(80, 80).unwrap().dimensions(), (80, 80));
        assert_eq!(img.resize_to_cover(100, 100).unwrap().dimensions(), (100, 100));
        assert_eq!(img.resize_to_cover(30, 70).unwrap().dimensions(), (30, 70));
        assert_eq!(img.resize_to_cover(160, 80).unwrap(), img);
    }

    #[test]
    fn test_resize_to_cover_without_scaling_is_center_crop() {
        let img = gradient(160, 80);
        let covered = img.resize_to_cover(80, 80).unwrap();
        assert_eq!(covered, img.crop_square(80));
        assert_eq!(covered.get_pixel(0, 0), img.get_pixel(40, 0));
    }

    #[test]
    fn test_crop_square_centres() {
        let img = gradient(10, 6);
        let sq = img.crop_square(6);
        assert_eq!(sq.dimensions(), (6, 6));
        assert_eq!(sq.get_pixel(0, 0), img.get_pixel(2, 0));
    }

    #[test]
    fn test_draw_over_offsets() {
        let mut canvas = RasterImage::filled(4, 4, Rgba([0, 0, 255, 255])).unwrap();
        let red = RasterImage::filled(2, 2, Rgba([255, 0, 0, 255])).unwrap();
        canvas.draw_over(&red, 1, 1);
        assert_eq!(canvas.get_pixel(0, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(canvas.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(2, 2), Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(3, 3), Rgba([0, 0, 255, 255]));
    }
}
