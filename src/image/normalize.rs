use std::fs;
use std::path::{Path, PathBuf};

use super::CanonicalImage;
use crate::error::{ClipboardError, Result};

/// Image handed to `save_image`, tagged by how it is represented
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// Already normalized RGB8 image
    Canonical(CanonicalImage),
    /// Encoded raster container (PNG, BMP, JPEG, ...), detected by signature
    Encoded(Vec<u8>),
    /// Raw samples with explicit shape
    Raw(RawPixels),
    /// Raster image file on disk
    Path(PathBuf),
}

impl From<CanonicalImage> for ImageInput {
    fn from(image: CanonicalImage) -> Self {
        ImageInput::Canonical(image)
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        ImageInput::Encoded(bytes)
    }
}

impl From<RawPixels> for ImageInput {
    fn from(raw: RawPixels) -> Self {
        ImageInput::Raw(raw)
    }
}

impl From<PathBuf> for ImageInput {
    fn from(path: PathBuf) -> Self {
        ImageInput::Path(path)
    }
}

impl From<&Path> for ImageInput {
    fn from(path: &Path) -> Self {
        ImageInput::Path(path.to_path_buf())
    }
}

/// Raw pixel samples, row-major, `channels` samples per pixel
#[derive(Debug, Clone, PartialEq)]
pub struct RawPixels {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub samples: SampleBuffer,
}

/// Sample storage for raw pixel buffers
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl SampleBuffer {
    fn len(&self) -> usize {
        match self {
            SampleBuffer::U8(v) => v.len(),
            SampleBuffer::U16(v) => v.len(),
            SampleBuffer::I32(v) => v.len(),
            SampleBuffer::F32(v) => v.len(),
            SampleBuffer::F64(v) => v.len(),
        }
    }

    /// Convert every sample to u8, clipping to [0, 255] then truncating
    fn into_u8(self) -> Vec<u8> {
        match self {
            SampleBuffer::U8(v) => v,
            SampleBuffer::U16(v) => v.into_iter().map(|s| s.min(255) as u8).collect(),
            SampleBuffer::I32(v) => v.into_iter().map(|s| s.clamp(0, 255) as u8).collect(),
            SampleBuffer::F32(v) => v.into_iter().map(|s| clip_truncate(f64::from(s))).collect(),
            SampleBuffer::F64(v) => v.into_iter().map(clip_truncate).collect(),
        }
    }
}

/// Clip a sample to [0, 255] and truncate toward zero (no rounding)
///
/// NaN maps to 0.
pub fn clip_truncate(sample: f64) -> u8 {
    // `as` saturates and truncates; NaN becomes 0
    sample.clamp(0.0, 255.0) as u8
}

/// Converts any `ImageInput` into a `CanonicalImage`
///
/// Every failure is reported as `UnsupportedImageFormat`.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    max_encoded_bytes: u64,
}

impl ImageNormalizer {
    pub fn new(max_encoded_bytes: u64) -> Self {
        ImageNormalizer { max_encoded_bytes }
    }

    pub fn normalize(&self, input: ImageInput) -> Result<CanonicalImage> {
        match input {
            ImageInput::Canonical(image) => Ok(image),
            ImageInput::Path(path) => self.from_path(&path),
            ImageInput::Encoded(bytes) => self.from_encoded(&bytes),
            ImageInput::Raw(raw) => from_raw(raw),
        }
    }

    fn from_path(&self, path: &Path) -> Result<CanonicalImage> {
        let metadata = fs::metadata(path).map_err(|e| {
            ClipboardError::UnsupportedImageFormat(format!("cannot stat {:?}: {}", path, e))
        })?;
        self.check_size(metadata.len())?;

        let bytes = fs::read(path).map_err(|e| {
            ClipboardError::UnsupportedImageFormat(format!("cannot read {:?}: {}", path, e))
        })?;

        log::debug!("Read {} bytes image file {:?}", bytes.len(), path);
        self.from_encoded(&bytes)
    }

    fn from_encoded(&self, bytes: &[u8]) -> Result<CanonicalImage> {
        self.check_size(bytes.len() as u64)?;

        let format = image::guess_format(bytes).map_err(|e| {
            ClipboardError::UnsupportedImageFormat(format!("unrecognized container: {}", e))
        })?;

        let decoded = image::load_from_memory_with_format(bytes, format).map_err(|e| {
            ClipboardError::UnsupportedImageFormat(format!("failed to decode {:?}: {}", format, e))
        })?;

        log::debug!(
            "Decoded {:?} image {}x{} ({:?})",
            format,
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        CanonicalImage::try_from(decoded)
    }

    fn check_size(&self, len: u64) -> Result<()> {
        if len > self.max_encoded_bytes {
            return Err(ClipboardError::UnsupportedImageFormat(format!(
                "image is {} bytes, limit is {}",
                len, self.max_encoded_bytes
            )));
        }
        Ok(())
    }
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new(crate::storage::GeneralConfig::default().max_image_size_bytes)
    }
}

fn from_raw(raw: RawPixels) -> Result<CanonicalImage> {
    let RawPixels {
        width,
        height,
        channels,
        samples,
    } = raw;

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize));

    if expected != Some(samples.len()) {
        return Err(ClipboardError::UnsupportedImageFormat(format!(
            "{} samples do not match shape {}x{}x{}",
            samples.len(),
            width,
            height,
            channels
        )));
    }

    let bytes = samples.into_u8();
    let rgb = match channels {
        3 => bytes,
        1 => bytes.iter().flat_map(|&g| [g, g, g]).collect(),
        2 => bytes.chunks_exact(2).flat_map(|p| [p[0], p[0], p[0]]).collect(),
        4 => bytes.chunks_exact(4).flat_map(|p| [p[0], p[1], p[2]]).collect(),
        other => {
            return Err(ClipboardError::UnsupportedImageFormat(format!(
                "unsupported channel count {}",
                other
            )));
        }
    };

    CanonicalImage::new(width, height, rgb)
}
