//! Threshold binarization and the ink mask handed to tracers

use image::{Rgba, RgbaImage};

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];

/// Force every pixel's color to pure black or pure white.
///
/// A pixel becomes black when the unweighted average of its red, green and
/// blue channels is below `threshold`. Alpha is left as stored.
pub fn binarize(pixels: &RgbaImage, threshold: u8) -> RgbaImage {
    let mut output = pixels.clone();
    for pixel in output.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        // avg < threshold, without the division
        let sum = r as u32 + g as u32 + b as u32;
        let [r, g, b] = if sum < 3 * threshold as u32 { BLACK } else { WHITE };
        *pixel = Rgba([r, g, b, a]);
    }
    output
}

/// Ink mask of a binarized image, row-major, `true` meaning ink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    ink: Vec<bool>,
}

impl Bitmap {
    /// An all-background bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ink: vec![false; width as usize * height as usize],
        }
    }

    /// Build the mask from a binarized image; black pixels are ink
    pub fn from_binarized(pixels: &RgbaImage) -> Self {
        let ink = pixels.pixels().map(|pixel| pixel.0[0] == 0).collect();
        Self {
            width: pixels.width(),
            height: pixels.height(),
            ink,
        }
    }

    /// Build a mask from text rows, `#` marking ink. Handy in tests.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0) as u32;
        let mut bitmap = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                bitmap.set(x as u32, y as u32, c == '#');
            }
        }
        bitmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set(&mut self, x: u32, y: u32, ink: bool) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.ink[idx] = ink;
        }
    }

    /// Whether the pixel is ink; anything outside the bitmap is background
    pub fn is_ink(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.ink[y as usize * self.width as usize + x as usize]
    }

    pub fn ink_count(&self) -> usize {
        self.ink.iter().filter(|&&ink| ink).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(pixel: &Rgba<u8>) -> [u8; 3] {
        [pixel.0[0], pixel.0[1], pixel.0[2]]
    }

    #[test]
    fn test_threshold_compares_rgb_average() {
        let mut pixels = RgbaImage::new(3, 1);
        pixels.put_pixel(0, 0, Rgba([127, 127, 127, 255]));
        pixels.put_pixel(1, 0, Rgba([128, 128, 128, 255]));
        // average 128 exactly: not below the threshold
        pixels.put_pixel(2, 0, Rgba([255, 129, 0, 255]));

        let output = binarize(&pixels, 128);
        assert_eq!(rgb(output.get_pixel(0, 0)), BLACK);
        assert_eq!(rgb(output.get_pixel(1, 0)), WHITE);
        assert_eq!(rgb(output.get_pixel(2, 0)), WHITE);
    }

    #[test]
    fn test_threshold_extremes() {
        let pixels = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        // nothing is below zero
        assert_eq!(rgb(binarize(&pixels, 0).get_pixel(0, 0)), WHITE);

        let pixels = RgbaImage::from_pixel(1, 1, Rgba([254, 254, 254, 255]));
        assert_eq!(rgb(binarize(&pixels, 255).get_pixel(0, 0)), BLACK);
    }

    #[test]
    fn test_alpha_is_ignored_and_kept() {
        let mut pixels = RgbaImage::new(2, 1);
        pixels.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        pixels.put_pixel(1, 0, Rgba([200, 200, 200, 40]));

        let output = binarize(&pixels, 128);
        assert_eq!(*output.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*output.get_pixel(1, 0), Rgba([255, 255, 255, 40]));

        let bitmap = Bitmap::from_binarized(&output);
        assert!(bitmap.is_ink(0, 0));
        assert_eq!(bitmap.ink_count(), 1);
    }

    #[test]
    fn test_bitmap_from_binarized() {
        let mut pixels = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        pixels.put_pixel(1, 0, Rgba([10, 10, 10, 255]));
        let bitmap = Bitmap::from_binarized(&binarize(&pixels, 128));

        assert!(bitmap.is_ink(1, 0));
        assert!(!bitmap.is_ink(0, 0));
        assert!(!bitmap.is_ink(-1, 0));
        assert!(!bitmap.is_ink(2, 0));
        assert_eq!(bitmap.ink_count(), 1);
    }

    #[test]
    fn test_bitmap_from_rows() {
        let bitmap = Bitmap::from_rows(&["#.", ".#", "##"]);
        assert_eq!((bitmap.width(), bitmap.height()), (2, 3));
        assert_eq!(bitmap.ink_count(), 4);
        assert!(bitmap.is_ink(1, 1));
    }
}
