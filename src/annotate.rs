// src/annotate.rs - Drawing primitives burned into analysis images

use bresenham::Bresenham;
use imageproc::drawing::{draw_hollow_rect_mut, Canvas};
use imageproc::rect::Rect;

use crate::font::{glyph, is_set, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::image_utils::in_bounds;

/// Plot a pixel, silently dropping anything outside the canvas
#[inline]
fn plot<C: Canvas>(canvas: &mut C, x: i64, y: i64, color: C::Pixel) {
    let (width, height) = canvas.dimensions();
    if in_bounds(x, y, width, height) {
        canvas.draw_pixel(x as u32, y as u32, color);
    }
}

/// Outline the inclusive box from `(x, y)` to `(x + width, y + height)`.
///
/// Extra rings for `thickness > 1` grow outward, so the innermost ring
/// always lies exactly on the requested box.
pub fn draw_box<C: Canvas>(
    canvas: &mut C,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    thickness: u32,
    color: C::Pixel,
) where
    C::Pixel: 'static,
{
    for ring in 0..thickness as i32 {
        let rect = Rect::at(x - ring, y - ring)
            .of_size(width + 1 + 2 * ring as u32, height + 1 + 2 * ring as u32);
        draw_hollow_rect_mut(canvas, rect, color);
    }
}

/// Draw `text` with its baseline (bottom edge) at `y` and left edge at `x`.
/// Each font pixel becomes a `scale` x `scale` block.
pub fn draw_label<C: Canvas>(
    canvas: &mut C,
    text: &str,
    x: i32,
    baseline_y: i32,
    scale: u32,
    color: C::Pixel,
) {
    let scale = scale.max(1) as i64;
    let top = baseline_y as i64 - GLYPH_HEIGHT as i64 * scale;
    let mut cursor_x = x as i64;

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if !is_set(&rows, col, row) {
                        continue;
                    }
                    let px = cursor_x + col as i64 * scale;
                    let py = top + row as i64 * scale;
                    for dy in 0..scale {
                        for dx in 0..scale {
                            plot(canvas, px + dx, py + dy, color);
                        }
                    }
                }
            }
        }
        cursor_x += GLYPH_ADVANCE as i64 * scale;
    }
}

fn draw_stroke<C: Canvas>(canvas: &mut C, start: (isize, isize), end: (isize, isize), color: C::Pixel) {
    for (x, y) in Bresenham::new(start, end) {
        plot(canvas, x as i64, y as i64, color);
    }
    // Bresenham excludes the end point
    plot(canvas, end.0 as i64, end.1 as i64, color);
}

/// Upright `+` marker of edge length `size` centred on `(x, y)`
pub fn draw_cross_marker<C: Canvas>(canvas: &mut C, x: u32, y: u32, size: u32, color: C::Pixel) {
    let (cx, cy) = (x as isize, y as isize);
    let half = (size / 2) as isize;
    draw_stroke(canvas, (cx - half, cy), (cx + half, cy), color);
    draw_stroke(canvas, (cx, cy - half), (cx, cy + half), color);
}

/// Diagonal `x` marker of edge length `size` centred on `(x, y)`
pub fn draw_tilted_cross_marker<C: Canvas>(canvas: &mut C, x: u32, y: u32, size: u32, color: C::Pixel) {
    let (cx, cy) = (x as isize, y as isize);
    let half = (size / 2) as isize;
    draw_stroke(canvas, (cx - half, cy - half), (cx + half, cy + half), color);
    draw_stroke(canvas, (cx - half, cy + half), (cx + half, cy - half), color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    const INK: Rgb<u8> = Rgb([0, 255, 0]);

    #[test]
    fn box_outline_is_inclusive() {
        let mut img = RgbImage::new(20, 20);
        draw_box(&mut img, 5, 5, 4, 3, 1, INK);

        assert_eq!(*img.get_pixel(5, 5), INK);
        assert_eq!(*img.get_pixel(9, 8), INK);
        assert_eq!(*img.get_pixel(7, 5), INK);
        assert_eq!(*img.get_pixel(7, 6), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(10, 8), Rgb([0, 0, 0]));
    }

    #[test]
    fn thick_box_grows_outward() {
        let mut img = RgbImage::new(20, 20);
        draw_box(&mut img, 5, 5, 4, 4, 2, INK);

        assert_eq!(*img.get_pixel(4, 4), INK);
        assert_eq!(*img.get_pixel(5, 5), INK);
        assert_eq!(*img.get_pixel(6, 6), Rgb([0, 0, 0]));
    }

    #[test]
    fn box_partially_outside_does_not_panic() {
        let mut img = GrayImage::new(10, 10);
        draw_box(&mut img, 7, -3, 20, 20, 2, Luma([200]));
        assert_eq!(img.get_pixel(7, 0)[0], 200);
    }

    #[test]
    fn label_sits_on_baseline() {
        let mut img = GrayImage::new(40, 20);
        draw_label(&mut img, "1", 0, 14, 2, Luma([255]));

        // top pixel of '1' is column 2, row 0 -> block at (4..6, 0..2)
        assert_eq!(img.get_pixel(4, 0)[0], 255);
        assert_eq!(img.get_pixel(5, 1)[0], 255);
        // nothing drawn at or below the baseline
        assert!((0..40).all(|x| img.get_pixel(x, 14)[0] == 0));
    }

    #[test]
    fn label_is_clipped_at_edges() {
        let mut img = GrayImage::new(10, 21);
        draw_label(&mut img, "Root: 12.5", -6, 21, 3, Luma([255]));
        // third column of the 'R' top bar lands on x = 0
        assert_eq!(img.get_pixel(0, 0)[0], 255);
        assert_eq!(img.get_pixel(9, 20)[0], 0);
    }

    #[test]
    fn markers_cross_at_centre() {
        let mut img = RgbImage::new(30, 30);
        draw_cross_marker(&mut img, 15, 15, 10, INK);
        assert_eq!(*img.get_pixel(15, 15), INK);
        assert_eq!(*img.get_pixel(10, 15), INK);
        assert_eq!(*img.get_pixel(20, 15), INK);
        assert_eq!(*img.get_pixel(15, 10), INK);
        assert_eq!(*img.get_pixel(16, 16), Rgb([0, 0, 0]));

        let mut img = RgbImage::new(30, 30);
        draw_tilted_cross_marker(&mut img, 15, 15, 10, INK);
        assert_eq!(*img.get_pixel(15, 15), INK);
        assert_eq!(*img.get_pixel(10, 10), INK);
        assert_eq!(*img.get_pixel(20, 20), INK);
        assert_eq!(*img.get_pixel(20, 10), INK);
        assert_eq!(*img.get_pixel(15, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn marker_near_corner_is_clipped() {
        let mut img = RgbImage::new(5, 5);
        draw_tilted_cross_marker(&mut img, 0, 0, 50, INK);
        assert_eq!(*img.get_pixel(0, 0), INK);
        assert_eq!(*img.get_pixel(4, 4), INK);
    }
}
