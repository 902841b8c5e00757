use image::{DynamicImage, RgbImage};

use crate::error::{ClipboardError, Result};

/// Normalized raster image: 8-bit RGB, row-major, no padding
///
/// The only way to build one is through a constructor that checks
/// `pixels.len() == width * height * 3`, so every value is encodable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CanonicalImage {
    /// Bytes per pixel in the canonical layout
    pub const CHANNELS: usize = 3;

    /// Create from an RGB8 pixel buffer, validating its shape
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ClipboardError::UnsupportedImageFormat(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        let expected = rgb_len(width, height).ok_or_else(|| {
            ClipboardError::UnsupportedImageFormat(format!(
                "image dimensions {}x{} overflow",
                width, height
            ))
        })?;

        if pixels.len() != expected {
            return Err(ClipboardError::UnsupportedImageFormat(format!(
                "pixel buffer holds {} bytes, {}x{} RGB needs {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }

        Ok(CanonicalImage {
            width,
            height,
            pixels,
        })
    }

    /// Create an image filled with a single colour
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self> {
        let len = rgb_len(width, height).unwrap_or(0);
        let pixels = rgb.iter().copied().cycle().take(len).collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGB triple at (x, y), if in bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * Self::CHANNELS;
        Some([
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ])
    }
}

impl TryFrom<RgbImage> for CanonicalImage {
    type Error = ClipboardError;

    fn try_from(image: RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        CanonicalImage::new(width, height, image.into_raw())
    }
}

impl TryFrom<DynamicImage> for CanonicalImage {
    type Error = ClipboardError;

    /// Any colour type or depth is converted to RGB8; alpha is dropped
    fn try_from(image: DynamicImage) -> Result<Self> {
        match image {
            DynamicImage::ImageRgb8(rgb) => CanonicalImage::try_from(rgb),
            other => CanonicalImage::try_from(other.to_rgb8()),
        }
    }
}

fn rgb_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CanonicalImage::CHANNELS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};

    #[test]
    fn test_new_enforces_buffer_length() {
        assert!(CanonicalImage::new(2, 2, vec![0; 12]).is_ok());

        let short = CanonicalImage::new(2, 2, vec![0; 11]);
        assert!(matches!(
            short,
            Err(ClipboardError::UnsupportedImageFormat(_))
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(CanonicalImage::new(0, 4, Vec::new()).is_err());
        assert!(CanonicalImage::new(4, 0, Vec::new()).is_err());
        assert!(CanonicalImage::filled(0, 0, [1, 2, 3]).is_err());
    }

    #[test]
    fn test_filled_and_pixel_lookup() {
        let image = CanonicalImage::filled(3, 2, [10, 20, 30]).unwrap();
        assert_eq!(image.pixels().len(), 18);
        assert_eq!(image.pixel(2, 1), Some([10, 20, 30]));
        assert_eq!(image.pixel(3, 0), None);
    }

    #[test]
    fn test_from_rgba_drops_alpha() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([255, 0, 0, 0]));
        rgba.put_pixel(1, 0, Rgba([0, 0, 255, 128]));

        let image = CanonicalImage::try_from(DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(image.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(image.pixel(1, 0), Some([0, 0, 255]));
    }

    #[test]
    fn test_from_rgb_image_keeps_pixels() {
        let rgb = RgbImage::from_pixel(4, 4, Rgb([7, 8, 9]));
        let image = CanonicalImage::try_from(rgb).unwrap();
        assert_eq!((image.width(), image.height()), (4, 4));
        assert_eq!(image.pixel(3, 3), Some([7, 8, 9]));
    }
}
