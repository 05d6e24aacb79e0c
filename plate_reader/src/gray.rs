use common::buffer2::Buffer2;
use image::{GrayImage, Luma, RgbImage};

use crate::geometry::ImageDimensions;

/// Fixed-point BT.601 luma weights (sum = 1 << LUMA_SHIFT).
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// Single-channel 8-bit intensity buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayBuffer {
    buffer: Buffer2<u8>,
}

impl GrayBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            buffer: Buffer2::new(width as usize, height as usize, pixels),
        }
    }

    pub fn new_filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            buffer: Buffer2::new_filled(width as usize, height as usize, value),
        }
    }

    /// Luma of an RGB image: `0.299 R + 0.587 G + 0.114 B`, rounded to nearest.
    pub fn from_rgb(image: &RgbImage) -> Self {
        let pixels = image
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                let y = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
                ((y + LUMA_ROUND) >> LUMA_SHIFT) as u8
            })
            .collect();

        Self::new(image.width(), image.height(), pixels)
    }

    /// `255 - v` for every pixel, so dark spots become high values.
    pub fn inverted(&self) -> Self {
        Self {
            buffer: self.buffer.map(|&v| u8::MAX - v),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width() as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height() as u32
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions {
            width: self.width(),
            height: self.height(),
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        *self.buffer.get(x as usize, y as usize)
    }

    /// One image row.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        self.buffer.row(y as usize)
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.buffer.pixels()
    }

    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| Luma([self.get(x, y)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn luma_matches_bt601_rounding() {
        let mut image = RgbImage::new(4, 1);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(1, 0, Rgb([0, 255, 0]));
        image.put_pixel(2, 0, Rgb([0, 0, 255]));
        image.put_pixel(3, 0, Rgb([255, 255, 255]));

        let gray = GrayBuffer::from_rgb(&image);
        assert_eq!(gray.pixels(), &[76, 150, 29, 255]);
    }

    #[test]
    fn neutral_gray_is_preserved() {
        for v in [0u8, 1, 55, 128, 200, 254, 255] {
            let image = RgbImage::from_pixel(3, 2, Rgb([v, v, v]));
            let gray = GrayBuffer::from_rgb(&image);
            assert!(gray.pixels().iter().all(|&p| p == v), "value {v}");
        }
    }

    #[test]
    fn inversion_maps_dark_to_bright() {
        let gray = GrayBuffer::new(3, 1, vec![0, 200, 255]);
        let inverted = gray.inverted();
        assert_eq!(inverted.pixels(), &[255, 55, 0]);
        assert_eq!(inverted.inverted(), gray);
    }

    #[test]
    fn get_and_row_are_row_major() {
        let gray = GrayBuffer::new(3, 2, vec![10, 20, 30, 40, 50, 60]);
        assert_eq!(gray.get(2, 0), 30);
        assert_eq!(gray.get(0, 1), 40);
        assert_eq!(gray.row(1), &[40, 50, 60]);
        assert_eq!(gray.dimensions(), ImageDimensions { width: 3, height: 2 });
    }

    #[test]
    #[should_panic(expected = "pixels length must equal width * height")]
    fn new_panics_on_size_mismatch() {
        GrayBuffer::new(3, 2, vec![1, 2, 3]);
    }

    #[test]
    fn to_image_keeps_pixels() {
        let gray = GrayBuffer::new(2, 2, vec![1, 2, 3, 4]);
        let image = gray.to_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(1, 1).0, [4]);
    }
}
