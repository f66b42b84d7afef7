//! Signature image decoding
//!
//! Signatures are stored as `data:image/png;base64,...` or
//! `data:image/jpeg;base64,...` URIs and decoded to raw RGB (+ alpha) before
//! they are placed on a page.

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, RgbaImage};
use regex::Regex;
use thiserror::Error;

use super::page::RasterImage;

static DATA_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:image/(png|jpeg);base64,(.+)$").expect("data URI pattern is valid")
});

/// Why a signature could not be embedded
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("unsupported signature format (expected a PNG or JPEG base64 data URI)")]
    UnsupportedFormat,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("image has zero width or height")]
    Empty,
}

/// Turns a stored signature into a raster
pub trait SignatureDecoder {
    fn decode(&self, data_uri: &str) -> Result<RasterImage, EmbedError>;
}

/// Decoder for base64 PNG/JPEG data URIs
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriDecoder;

impl SignatureDecoder for DataUriDecoder {
    fn decode(&self, data_uri: &str) -> Result<RasterImage, EmbedError> {
        let caps = DATA_URI
            .captures(data_uri.trim())
            .ok_or(EmbedError::UnsupportedFormat)?;
        let format = match &caps[1] {
            "png" => ImageFormat::Png,
            _ => ImageFormat::Jpeg,
        };
        let bytes = STANDARD.decode(caps[2].trim())?;
        let decoded = image::load_from_memory_with_format(&bytes, format)?;
        raster_from_rgba(decoded.to_rgba8())
    }
}

/// Split an RGBA buffer into RGB and an alpha plane; the alpha plane is
/// dropped when fully opaque.
pub fn raster_from_rgba(image: RgbaImage) -> Result<RasterImage, EmbedError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EmbedError::Empty);
    }
    let pixels = (width * height) as usize;
    let mut rgb = Vec::with_capacity(pixels * 3);
    let mut alpha = Vec::with_capacity(pixels);
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        rgb.extend_from_slice(&[r, g, b]);
        alpha.push(a);
    }
    let alpha = alpha.iter().any(|&a| a != u8::MAX).then_some(alpha);
    Ok(RasterImage {
        width,
        height,
        rgb,
        alpha,
    })
}

/// Largest size with the image's aspect ratio that fits `max_width` x
/// `max_height`
pub fn fit_within(width: u32, height: u32, max_width: f32, max_height: f32) -> (f32, f32) {
    if width == 0 || height == 0 {
        return (0.0, 0.0);
    }
    let (w, h) = (width as f32, height as f32);
    let scale = (max_width / w).min(max_height / h);
    (w * scale, h * scale)
}
