//! Test payload builders.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// An RGBA PNG of the given dimensions, as raw bytes.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([0, 100, 200, 255]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

/// Base64-encode `data` the way a browser upload does, with a data-URL
/// prefix.
pub fn data_url(content_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, BASE64.encode(data))
}

/// A small valid PNG upload payload.
pub fn png_data_url(width: u32, height: u32) -> String {
    data_url("image/png", &png_bytes(width, height))
}
