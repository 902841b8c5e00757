pub mod canonical;
pub mod dib;
pub mod normalize;

pub use canonical::CanonicalImage;
pub use dib::{bitmap_file_len, encode_dib, BITMAP_FILE_HEADER_LEN};
pub use normalize::{clip_truncate, ImageInput, ImageNormalizer, RawPixels, SampleBuffer};

/// Create an image normalizer from the general configuration
///
/// Encoded buffers and files larger than `max_image_size_bytes` are
/// rejected before decoding.
pub fn create_normalizer(config: &crate::storage::GeneralConfig) -> ImageNormalizer {
    let normalizer = ImageNormalizer::new(config.max_image_size_bytes);
    log::debug!(
        "Created image normalizer (max encoded size {} bytes)",
        config.max_image_size_bytes
    );
    normalizer
}
