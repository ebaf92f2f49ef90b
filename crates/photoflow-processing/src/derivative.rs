//! Derivative rendering: decode once, then produce sized JPEG variants.

use crate::flatten::flatten_onto_white;
use crate::resize::fit_within;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};
use photoflow_core::SizeProfile;
use std::io::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Image decode failed: {0}")]
    DecodeFailed(String),

    #[error("Image encode failed: {0}")]
    EncodeFailed(String),
}

/// One rendered derivative: JPEG bytes plus the output dimensions.
#[derive(Debug, Clone)]
pub struct DerivativeImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decode image bytes, sniffing the format from content.
pub fn decode(data: &[u8]) -> Result<DynamicImage, ProcessingError> {
    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::DecodeFailed(e.to_string()))?
        .decode()
        .map_err(|e| ProcessingError::DecodeFailed(e.to_string()))
}

/// Render one derivative from a flattened source image: fit-within
/// resize to the profile's bound, then JPEG-encode at the given
/// quality. The source is copied, not mutated, so the three profiles
/// are independent of each other.
pub fn render_derivative(
    flattened: &RgbImage,
    profile: SizeProfile,
    quality: u8,
) -> Result<DerivativeImage, ProcessingError> {
    let resized = fit_within(flattened, profile.bound());
    let (width, height) = resized.dimensions();

    let mut buffer = Vec::with_capacity((width * height / 4) as usize);
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality);
    resized
        .write_with_encoder(encoder)
        .map_err(|e| ProcessingError::EncodeFailed(e.to_string()))?;

    tracing::debug!(
        profile = %profile,
        width,
        height,
        size_bytes = buffer.len(),
        "Rendered derivative"
    );

    Ok(DerivativeImage {
        data: buffer,
        width,
        height,
    })
}

/// Decode and flatten a source image, ready for derivative rendering.
pub fn prepare_source(data: &[u8]) -> Result<RgbImage, ProcessingError> {
    let img = decode(data)?;
    Ok(flatten_onto_white(&img))
}
