//! Fit-within resizing.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Resize so neither dimension exceeds `bound`, preserving aspect
/// ratio. Images already within the bound are returned unchanged,
/// never upscaled. Uses Lanczos3 resampling.
pub fn fit_within(img: &RgbImage, bound: u32) -> RgbImage {
    let (width, height) = img.dimensions();
    if width <= bound && height <= bound {
        return img.clone();
    }

    let ratio = (bound as f64 / width as f64).min(bound as f64 / height as f64);
    let new_width = ((width as f64 * ratio).round() as u32).max(1);
    let new_height = ((height as f64 * ratio).round() as u32).max(1);

    imageops::resize(img, new_width, new_height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([100, 150, 200]))
    }

    #[test]
    fn test_landscape_binds_on_width() {
        let resized = fit_within(&solid(2000, 1000), 500);
        assert_eq!(resized.dimensions(), (500, 250));
    }

    #[test]
    fn test_portrait_binds_on_height() {
        let resized = fit_within(&solid(1000, 2000), 500);
        assert_eq!(resized.dimensions(), (250, 500));
    }

    #[test]
    fn test_square_bound() {
        let resized = fit_within(&solid(3000, 3000), 1200);
        assert_eq!(resized.dimensions(), (1200, 1200));
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let resized = fit_within(&solid(100, 80), 500);
        assert_eq!(resized.dimensions(), (100, 80));
    }

    #[test]
    fn test_exact_bound_is_untouched() {
        let resized = fit_within(&solid(150, 150), 150);
        assert_eq!(resized.dimensions(), (150, 150));
    }

    #[test]
    fn test_never_exceeds_bound() {
        for (width, height) in [(2000, 1000), (1333, 777), (151, 150), (99, 1500)] {
            for bound in [150u32, 500, 1200] {
                let resized = fit_within(&solid(width, height), bound);
                let (rw, rh) = resized.dimensions();
                if width > bound || height > bound {
                    assert!(rw <= bound && rh <= bound, "{}x{} @ {}", width, height, bound);
                } else {
                    assert_eq!((rw, rh), (width, height));
                }
            }
        }
    }
}
