//! Image normalization applied to every input before storage and inference.

use crate::Result;
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, codecs::jpeg::JpegEncoder, imageops::FilterType};

/// Side length of the square image the endpoint expects.
pub const TARGET_SIZE: u32 = 224;

pub const JPEG_QUALITY: u8 = 75;

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Decode the base64 text carried in the request body. ASCII whitespace is
/// dropped anywhere in the input so line-wrapped (MIME style) text decodes.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
    let compact: Vec<u8> = encoded
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    Ok(STANDARD.decode(compact)?)
}

/// Decode image bytes of any supported format, convert to RGB and resize
/// to `TARGET_SIZE` x `TARGET_SIZE`. Aspect ratio is not preserved.
pub fn normalize(data: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(data)?;
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    Ok(rgb.resize_exact(TARGET_SIZE, TARGET_SIZE, FilterType::CatmullRom))
}

/// Encode image to JPEG bytes
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    image.write_with_encoder(encoder)?;
    Ok(buffer)
}

/// Full normalization: raw image bytes in, 224x224 RGB JPEG bytes out.
pub fn normalize_to_jpeg(data: &[u8]) -> Result<Vec<u8>> {
    let normalized = normalize(data)?;
    encode_jpeg(&normalized)
}

/// Guess the format of an encoded image, used for logging only.
pub fn sniff_format(data: &[u8]) -> Option<ImageFormat> {
    image::guess_format(data).ok()
}
