// src/binarize.rs - Operator-tuned threshold and inverted binarization

use image::{imageops, GrayImage, Luma, Rgb, RgbImage};
use imageproc::contrast::threshold;

/// Threshold in [0, 255], stepped by the operator.
///
/// Coarse steps keep the value inside [10, 245] exactly the way the
/// interactive tool always has; fine steps reach the full range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold(u8);

impl Threshold {
    pub const COARSE_STEP: u8 = 10;

    pub fn new(value: u8) -> Self {
        Threshold(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns true if the value changed
    pub fn coarse_down(&mut self) -> bool {
        if self.0 > Self::COARSE_STEP {
            self.0 -= Self::COARSE_STEP;
            return true;
        }
        false
    }

    pub fn coarse_up(&mut self) -> bool {
        if self.0 < u8::MAX - Self::COARSE_STEP {
            self.0 += Self::COARSE_STEP;
            return true;
        }
        false
    }

    pub fn fine_down(&mut self) -> bool {
        if self.0 > 0 {
            self.0 -= 1;
            return true;
        }
        false
    }

    pub fn fine_up(&mut self) -> bool {
        if self.0 < u8::MAX {
            self.0 += 1;
            return true;
        }
        false
    }
}

// Rec. 601 luma weights in 14-bit fixed point, summing to 1 << 14
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Rec. 601 luma of one pixel, rounded half up
#[inline]
pub fn luma_601(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let weighted = r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B;
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Grayscale version of a color scan, using the Rec. 601 weights
/// (0.299, 0.587, 0.114) thresholds have always been tuned against.
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([luma_601(image.get_pixel(x, y))])
    })
}

/// Inverted binarization: dark pixels (<= threshold) become foreground 255,
/// everything brighter becomes background 0. Roots are darker than the
/// scanner background.
pub fn binarize(gray: &GrayImage, thd: Threshold) -> GrayImage {
    let mut binary = threshold(gray, thd.value());
    imageops::invert(&mut binary);
    binary
}
