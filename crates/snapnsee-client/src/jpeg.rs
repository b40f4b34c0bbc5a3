use image::codecs::jpeg::JpegEncoder;
use image::ImageResult;

/// Fixed JPEG quality used for every upload (0.8 on a 0-1 scale)
pub const JPEG_QUALITY: u8 = 80;

/// Decode any supported image format and re-encode it as JPEG.
///
/// Alpha is dropped since JPEG cannot carry it.
pub fn encode_jpeg(image_bytes: &[u8]) -> ImageResult<Vec<u8>> {
    let decoded = image::load_from_memory(image_bytes)?;
    let rgb = decoded.to_rgb8();

    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
    encoder.encode_image(&rgb)?;
    Ok(jpeg)
}
