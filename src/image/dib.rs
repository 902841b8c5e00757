use image::codecs::bmp::BmpEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::CanonicalImage;
use crate::error::{ClipboardError, Result};

/// Size of the BITMAPFILEHEADER that precedes the DIB in a `.bmp` file
pub const BITMAP_FILE_HEADER_LEN: usize = 14;

const BITMAP_INFO_HEADER_LEN: usize = 40;

/// Length of an uncompressed 24-bit `.bmp` file of the given size
///
/// Rows are padded to a multiple of four bytes.
pub fn bitmap_file_len(width: u32, height: u32) -> usize {
    let row = (width as usize * 3 + 3) & !3;
    BITMAP_FILE_HEADER_LEN + BITMAP_INFO_HEADER_LEN + row * height as usize
}

/// Encode an image as a CF_DIB payload
///
/// Writes an uncompressed 24-bit bitmap and strips the 14-byte file header,
/// leaving BITMAPINFOHEADER followed by bottom-up BGR rows. Fails only when
/// the bitmap encoder rejects dimensions whose file size overflows its header
/// fields, reported as `UnsupportedImageFormat`.
pub fn encode_dib(image: &CanonicalImage) -> Result<Vec<u8>> {
    let mut bmp = Vec::with_capacity(bitmap_file_len(image.width(), image.height()));

    BmpEncoder::new(&mut bmp)
        .write_image(
            image.pixels(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| {
            ClipboardError::UnsupportedImageFormat(format!("bitmap encoding failed: {}", e))
        })?;

    if bmp.len() <= BITMAP_FILE_HEADER_LEN || !bmp.starts_with(b"BM") {
        return Err(ClipboardError::UnsupportedImageFormat(
            "bitmap encoder produced no file header".to_string(),
        ));
    }

    bmp.drain(..BITMAP_FILE_HEADER_LEN);
    log::debug!(
        "Encoded {}x{} image as {} byte DIB",
        image.width(),
        image.height(),
        bmp.len()
    );
    Ok(bmp)
}
