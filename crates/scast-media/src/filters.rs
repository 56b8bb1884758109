//! Pixel-level image filters.
//!
//! Every filter is a pure, order-independent transform over RGB buffers:
//! channel scaling, saturation/contrast adjustment, blur, or the fixed
//! linear sepia matrix.

use image::{imageops, Rgb, RgbImage};

use scast_models::FilterKind;

/// Fixed linear sepia matrix, rows are output R/G/B.
const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Rec. 601 luma weights used for saturation blending.
const LUMA: [f32; 3] = [0.299, 0.587, 0.114];

/// Apply a filter to an image.
pub fn apply_filter(image: &RgbImage, kind: FilterKind) -> RgbImage {
    match kind {
        FilterKind::None => image.clone(),
        FilterKind::Vintage => scale_brightness(&scale_saturation(image, 0.7), 1.1),
        FilterKind::Warm => scale_channels(image, 1.2, 1.1, 1.0),
        FilterKind::Cool => scale_channels(image, 1.0, 1.0, 1.2),
        FilterKind::BlackAndWhite => desaturate(image),
        FilterKind::Sepia => sepia(image),
        FilterKind::Vibrant => scale_contrast(&scale_saturation(image, 1.5), 1.2),
        FilterKind::Dramatic => scale_saturation(&scale_contrast(image, 1.4), 0.85),
        FilterKind::Soft => scale_brightness(&imageops::blur(image, 1.5), 1.05),
        FilterKind::Neon => scale_contrast(&scale_saturation(image, 1.8), 1.3),
        FilterKind::Cyberpunk => scale_contrast(&scale_channels(image, 1.1, 0.9, 1.25), 1.2),
        FilterKind::Dreamy => {
            scale_brightness(&scale_saturation(&imageops::blur(image, 2.0), 0.8), 1.1)
        }
    }
}

/// Sharpening and contrast pass stacked after filtering.
pub fn apply_enhancement(image: &RgbImage) -> RgbImage {
    let sharpened = imageops::unsharpen(image, 1.0, 4);
    scale_contrast(&sharpened, 1.1)
}

fn map_pixels(image: &RgbImage, f: impl Fn([f32; 3]) -> [f32; 3]) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (dst, src) in out.pixels_mut().zip(image.pixels()) {
        let [r, g, b] = src.0;
        let mapped = f([r as f32, g as f32, b as f32]);
        *dst = Rgb([
            mapped[0].clamp(0.0, 255.0) as u8,
            mapped[1].clamp(0.0, 255.0) as u8,
            mapped[2].clamp(0.0, 255.0) as u8,
        ]);
    }
    out
}

/// Scale each color channel independently.
pub fn scale_channels(image: &RgbImage, r: f32, g: f32, b: f32) -> RgbImage {
    map_pixels(image, |[pr, pg, pb]| [pr * r, pg * g, pb * b])
}

/// Uniform brightness scale.
pub fn scale_brightness(image: &RgbImage, factor: f32) -> RgbImage {
    scale_channels(image, factor, factor, factor)
}

/// Blend each pixel against its luma; factor 0 is grayscale, 1 is identity.
pub fn scale_saturation(image: &RgbImage, factor: f32) -> RgbImage {
    map_pixels(image, |[r, g, b]| {
        let luma = r * LUMA[0] + g * LUMA[1] + b * LUMA[2];
        [
            luma + (r - luma) * factor,
            luma + (g - luma) * factor,
            luma + (b - luma) * factor,
        ]
    })
}

/// Scale contrast around the mid-gray pivot.
pub fn scale_contrast(image: &RgbImage, factor: f32) -> RgbImage {
    map_pixels(image, |[r, g, b]| {
        [
            (r - 128.0) * factor + 128.0,
            (g - 128.0) * factor + 128.0,
            (b - 128.0) * factor + 128.0,
        ]
    })
}

/// Full grayscale conversion, kept as a three-channel buffer.
pub fn desaturate(image: &RgbImage) -> RgbImage {
    scale_saturation(image, 0.0)
}

/// Apply the fixed linear sepia matrix.
pub fn sepia(image: &RgbImage) -> RgbImage {
    map_pixels(image, |[r, g, b]| {
        [
            r * SEPIA_MATRIX[0][0] + g * SEPIA_MATRIX[0][1] + b * SEPIA_MATRIX[0][2],
            r * SEPIA_MATRIX[1][0] + g * SEPIA_MATRIX[1][1] + b * SEPIA_MATRIX[1][2],
            r * SEPIA_MATRIX[2][0] + g * SEPIA_MATRIX[2][1] + b * SEPIA_MATRIX[2][2],
        ]
    })
}
