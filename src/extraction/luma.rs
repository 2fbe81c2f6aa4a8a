//! Grayscale conversion of decoded images.

use image::DynamicImage;

/// Converts one RGB pixel to luma with ITU-R 601-2 weights.
///
/// L = R·299/1000 + G·587/1000 + B·114/1000, in 16-bit fixed point with
/// rounding, so pure grays map to themselves.
#[inline]
pub fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (r as u32, g as u32, b as u32);
    ((19595 * r + 38470 * g + 7471 * b + 0x8000) >> 16) as u8
}

/// Flattens an image into row-major luma intensities.
///
/// 8-bit grayscale images pass through untouched; everything else goes
/// through RGB8 and [`luma_601`]. Alpha is ignored.
pub fn luma_from_image(image: &DynamicImage) -> Vec<u8> {
    match image {
        DynamicImage::ImageLuma8(gray) => gray.as_raw().clone(),
        other => other
            .to_rgb8()
            .pixels()
            .map(|p| luma_601(p[0], p[1], p[2]))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_grays_are_fixed_points() {
        for v in 0..=255u8 {
            assert_eq!(luma_601(v, v, v), v);
        }
    }

    #[test]
    fn test_primary_weights() {
        assert_eq!(luma_601(255, 0, 0), 76);
        assert_eq!(luma_601(0, 255, 0), 150);
        assert_eq!(luma_601(0, 0, 255), 29);
    }

    #[test]
    fn test_gray_passthrough_row_major() {
        let img = GrayImage::from_fn(3, 2, |x, y| Luma([(y * 3 + x) as u8 * 10]));
        let luma = luma_from_image(&DynamicImage::ImageLuma8(img));
        assert_eq!(luma, vec![0, 10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_rgb_converted() {
        let img = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
        let luma = luma_from_image(&DynamicImage::ImageRgb8(img));
        assert_eq!(luma, vec![76; 4]);
    }

    #[test]
    fn test_alpha_ignored() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 0]));
        let luma = luma_from_image(&DynamicImage::ImageRgba8(img));
        assert_eq!(luma, vec![150]);
    }
}
