//! Image preprocessing: decode, filter, enhance, resize.

use image::imageops::{self, FilterType};
use image::RgbImage;
use std::path::Path;

use scast_models::FilterKind;

use crate::error::{MediaError, MediaResult};
use crate::filters::{apply_enhancement, apply_filter};

/// Decode raw image bytes into an RGB buffer.
pub fn decode_image(bytes: &[u8]) -> MediaResult<RgbImage> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| MediaError::image_decode(e.to_string()))?;
    Ok(decoded.to_rgb8())
}

/// Prepare an uploaded image for composition.
///
/// Applies the filter first, then the optional enhancement pass, then
/// resizes to the exact target frame regardless of input aspect ratio.
pub fn preprocess_image(
    bytes: &[u8],
    filter: FilterKind,
    enhance: bool,
    target_width: u32,
    target_height: u32,
) -> MediaResult<RgbImage> {
    let mut img = decode_image(bytes)?;

    if filter != FilterKind::None {
        img = apply_filter(&img, filter);
    }
    if enhance {
        img = apply_enhancement(&img);
    }

    Ok(imageops::resize(
        &img,
        target_width,
        target_height,
        FilterType::Triangle,
    ))
}

/// Write a frame to disk as JPEG.
pub fn write_frame(img: &RgbImage, path: impl AsRef<Path>) -> MediaResult<()> {
    img.save_with_format(path.as_ref(), image::ImageFormat::Jpeg)
        .map_err(|e| MediaError::internal(format!("Failed to write frame: {}", e)))
}

/// Encode an RGB buffer as JPEG bytes.
pub fn encode_jpeg(img: &RgbImage) -> MediaResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    img.write_to(&mut cursor, image::ImageOutputFormat::Jpeg(90))
        .map_err(|e| MediaError::internal(format!("Failed to encode JPEG: {}", e)))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([120, 60, 200]));
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageOutputFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, MediaError::ImageDecode(_)));
    }

    #[test]
    fn test_preprocess_resizes_to_exact_target() {
        // A portrait input still lands on the fixed landscape frame.
        let bytes = png_bytes(30, 80);
        let out = preprocess_image(&bytes, FilterKind::None, false, 128, 72).unwrap();
        assert_eq!((out.width(), out.height()), (128, 72));
    }

    #[test]
    fn test_preprocess_with_filter_and_enhance() {
        let bytes = png_bytes(64, 64);
        let out = preprocess_image(&bytes, FilterKind::Sepia, true, 32, 18).unwrap();
        assert_eq!((out.width(), out.height()), (32, 18));
    }

    #[test]
    fn test_jpeg_round_trip() {
        let img = RgbImage::from_pixel(16, 16, Rgb([10, 20, 30]));
        let jpeg = encode_jpeg(&img).unwrap();
        let decoded = decode_image(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 16));
    }
}
