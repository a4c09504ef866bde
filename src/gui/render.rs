// src/gui/render.rs - Image buffers to minifb framebuffers

use image::{GrayImage, RgbImage};

use crate::image_utils::{pack_luma, pack_rgb};

/// Framebuffer in minifb's 0xRRGGBB layout with its dimensions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Framebuffer {
    pub pixels: Vec<u32>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn from_rgb(image: &RgbImage) -> Self {
        Self {
            pixels: image.pixels().map(pack_rgb).collect(),
            width: image.width() as usize,
            height: image.height() as usize,
        }
    }

    pub fn from_gray(image: &GrayImage) -> Self {
        Self {
            pixels: image.pixels().map(pack_luma).collect(),
            width: image.width() as usize,
            height: image.height() as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn rgb_is_row_major() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 0, Rgb([0x12, 0x34, 0x56]));
        img.put_pixel(0, 1, Rgb([255, 0, 0]));

        let fb = Framebuffer::from_rgb(&img);
        assert_eq!((fb.width, fb.height), (3, 2));
        assert_eq!(fb.pixels[2], 0x123456);
        assert_eq!(fb.pixels[3], 0xFF0000);
    }

    #[test]
    fn gray_is_replicated_into_channels() {
        let img = GrayImage::from_pixel(2, 2, Luma([0x80]));
        let fb = Framebuffer::from_gray(&img);
        assert!(fb.pixels.iter().all(|&p| p == 0x808080));
        assert!(!fb.is_empty());
        assert!(Framebuffer::default().is_empty());
    }
}
