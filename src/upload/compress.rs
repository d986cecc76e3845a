//! Downscale and re-encode images before upload.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use super::UploadError;
use crate::constants::upload::{COMPRESS_MAX_DIM, COMPRESS_QUALITY};

/// A JPEG ready to upload.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Output size for a source image: unchanged if both sides fit, otherwise
/// scaled so the longer side is exactly the limit.
pub fn target_size(width: u32, height: u32) -> (u32, u32) {
    if width <= COMPRESS_MAX_DIM && height <= COMPRESS_MAX_DIM {
        return (width, height);
    }

    let max = f64::from(COMPRESS_MAX_DIM);
    let ratio = (max / f64::from(width)).min(max / f64::from(height));
    let scaled_width = (f64::from(width) * ratio).round().max(1.0) as u32;
    let scaled_height = (f64::from(height) * ratio).round().max(1.0) as u32;
    (scaled_width, scaled_height)
}

/// Decode `bytes`, shrink to fit the size limit and encode as JPEG.
pub fn compress_image(bytes: &[u8]) -> Result<CompressedImage, UploadError> {
    let img = image::load_from_memory(bytes).map_err(UploadError::Decode)?;
    let (width, height) = target_size(img.width(), img.height());

    let img = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Triangle)
    };

    // JPEG has no alpha channel; flatten to RGB.
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, COMPRESS_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(UploadError::Compress)?;

    Ok(CompressedImage {
        bytes: out,
        width,
        height,
    })
}
