use std::ops::Range;

use image::{imageops, GenericImageView, ImageBuffer, Luma, Pixel, Rgb};

/// Rotate a buffer by 90° counter-clockwise. Width and height swap.
pub fn rotate_ccw<P: Pixel + 'static>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    imageops::rotate270(image)
}

/// Rotate a buffer by 90° clockwise. Exact inverse of [`rotate_ccw`].
pub fn rotate_cw<P: Pixel + 'static>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
) -> ImageBuffer<P, Vec<P::Subpixel>> {
    imageops::rotate90(image)
}

/// Copy out the part of `image` covered by `x_range` x `y_range`,
/// clipped to the image bounds. Returns `None` if nothing is left.
pub fn crop_clipped<P: Pixel + 'static>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    x_range: Range<u32>,
    y_range: Range<u32>,
) -> Option<ImageBuffer<P, Vec<P::Subpixel>>> {
    let (width, height) = image.dimensions();
    let x0 = x_range.start.min(width);
    let y0 = y_range.start.min(height);
    let x1 = x_range.end.min(width);
    let y1 = y_range.end.min(height);

    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    Some(image.view(x0, y0, x1 - x0, y1 - y0).to_image())
}

/// Check if a point is inside the image bounds
#[inline]
pub fn in_bounds(x: i64, y: i64, width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && x < width as i64 && y < height as i64
}

/// Pack an RGB pixel into the 0xRRGGBB layout minifb expects
#[inline]
pub fn pack_rgb(pixel: &Rgb<u8>) -> u32 {
    let r = pixel[0] as u32;
    let g = pixel[1] as u32;
    let b = pixel[2] as u32;
    (r << 16) | (g << 8) | b
}

/// Pack a gray pixel into 0xRRGGBB
#[inline]
pub fn pack_luma(pixel: &Luma<u8>) -> u32 {
    let v = pixel[0] as u32;
    (v << 16) | (v << 8) | v
}
