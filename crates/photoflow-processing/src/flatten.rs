//! Color mode normalization.

use image::{DynamicImage, Rgb, RgbImage};

/// Flatten an image onto an opaque white background, producing 3-channel
/// RGB suitable for JPEG encoding.
///
/// Transparent and partially transparent pixels are composited over
/// white using their alpha; palette sources are already expanded to
/// full color (with alpha where present) at decode time. Without this
/// step, JPEG encoding of unpremultiplied transparency produces
/// corrupted color artifacts.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut flattened = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        if alpha == 0 {
            continue;
        }
        let out = flattened.get_pixel_mut(x, y);
        for channel in 0..3 {
            let src = pixel[channel] as u32;
            out[channel] = ((src * alpha + 255 * (255 - alpha)) / 255) as u8;
        }
    }

    flattened
}
