// src/measure.rs - Root detection, filtering and length estimation

use std::f64::consts::SQRT_2;

use image::{GrayImage, Luma, Pixel, Rgb, RgbImage};
use imageproc::contours::find_contours;
use log::debug;

use crate::annotate::{draw_box, draw_label};
use crate::config::{AnnotationStyle, Config, ShapeFilter};
use crate::errors::{RootLengthError, Result};
use crate::image_utils::{rotate_ccw, rotate_cw};

/// Pixels per physical length unit, guaranteed finite and > 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(pixels_per_unit: f64) -> Result<Self> {
        if pixels_per_unit.is_finite() && pixels_per_unit > 0.0 {
            Ok(ScaleFactor(pixels_per_unit))
        } else {
            Err(RootLengthError::DegenerateScale(pixels_per_unit))
        }
    }

    pub fn pixels_per_unit(self) -> f64 {
        self.0
    }
}

/// Axis-aligned bounding box; `width` and `height` count pixels, so a
/// single pixel has size 1x1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingRect {
    /// Smallest box enclosing all points
    pub fn from_points(points: &[(u32, u32)]) -> Option<Self> {
        let (&(first_x, first_y), rest) = points.split_first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first_x, first_y, first_x, first_y);

        for &(x, y) in rest {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        Some(BoundingRect {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// Map a box found on the counter-clockwise rotated image back onto the
    /// unrotated source image of width `source_width`.
    pub fn to_source_frame(&self, source_width: u32) -> BoundingRect {
        BoundingRect {
            x: source_width.saturating_sub(self.y + self.height),
            y: self.x,
            width: self.height,
            height: self.width,
        }
    }
}

/// One accepted root candidate
#[derive(Debug, Clone, PartialEq)]
pub struct RootMeasurement {
    /// Position of the contour in the full contour enumeration
    pub contour_index: usize,
    /// Bounding box in the analysis (rotated) frame
    pub bounds: BoundingRect,
    /// Bounding box in the source image frame
    pub source_bounds: BoundingRect,
    /// Chain-style boundary length in pixels
    pub boundary_length_px: f64,
    /// Estimated root length in physical units
    pub length: f64,
    pub color: Rgb<u8>,
}

/// Chain-style length of an ordered point sequence.
///
/// Every consecutive step counts 1 if it keeps either coordinate, and √2
/// otherwise, regardless of how far it actually moves. The sequence is not
/// closed: there is no step from the last point back to the first.
pub fn chain_length(points: &[(u32, u32)]) -> f64 {
    points
        .windows(2)
        .map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            if a.0 == b.0 || a.1 == b.1 {
                1.0
            } else {
                SQRT_2
            }
        })
        .sum()
}

/// A closed trace runs along both sides of a thin root, so half the
/// boundary approximates the root's length.
pub fn boundary_to_length(boundary_length_px: f64, scale: ScaleFactor) -> f64 {
    boundary_length_px / (2.0 * scale.pixels_per_unit())
}

/// Shape filter on the rotated frame: the box width is the root's length
/// dimension, the box height its cross-section.
pub fn passes_shape_filter(rect: &BoundingRect, filter: &ShapeFilter) -> bool {
    rect.width < filter.root_height_max
        && rect.width > filter.root_height_min
        && rect.height < filter.root_width_max
}

/// Annotation color for the contour at `contour_index`
pub fn select_color(style: &AnnotationStyle, contour_index: usize, multi_color: bool) -> Rgb<u8> {
    if multi_color {
        Rgb(style.palette_rgb[contour_index % style.palette_rgb.len()])
    } else {
        Rgb(style.primary_rgb)
    }
}

/// Finds roots on a binary image and annotates them in place.
///
/// Holds no state between calls: every [`measure`](Self::measure) is a
/// function of its arguments alone.
#[derive(Debug, Clone, PartialEq)]
pub struct RootMeasurer {
    pub filter: ShapeFilter,
    pub style: AnnotationStyle,
}

impl RootMeasurer {
    pub fn new(filter: ShapeFilter, style: AnnotationStyle) -> Self {
        Self { filter, style }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.filter, config.annotation.clone())
    }

    /// Measure all roots and burn boxes and length labels into both buffers.
    ///
    /// Both buffers are rotated 90° counter-clockwise for analysis so labels
    /// run along upright roots, then rotated back.
    pub fn measure(
        &self,
        binary: &mut GrayImage,
        color: &mut RgbImage,
        scale: ScaleFactor,
        multi_color: bool,
    ) -> Vec<RootMeasurement> {
        debug_assert_eq!(binary.dimensions(), color.dimensions());
        let source_width = binary.width();

        let mut rotated_binary = rotate_ccw(binary);
        let mut rotated_color = rotate_ccw(color);

        let mut measurements =
            self.measure_oriented(&mut rotated_binary, &mut rotated_color, scale, multi_color);

        *binary = rotate_cw(&rotated_binary);
        *color = rotate_cw(&rotated_color);

        for m in &mut measurements {
            m.source_bounds = m.bounds.to_source_frame(source_width);
        }

        measurements
    }

    /// Measure on buffers that are already in the analysis orientation.
    /// `source_bounds` equals `bounds` in the result.
    pub fn measure_oriented(
        &self,
        binary: &mut GrayImage,
        color: &mut RgbImage,
        scale: ScaleFactor,
        multi_color: bool,
    ) -> Vec<RootMeasurement> {
        let contours = find_contours::<u32>(binary);
        debug!("Found {} contours", contours.len());

        // Gray ink for the binary view: neither 0 nor 255, so it shows on both
        // background and foreground.
        let primary_luma: Luma<u8> = Rgb(self.style.primary_rgb).to_luma();
        let primary_rgb = Rgb(self.style.primary_rgb);
        let mut measurements = Vec::new();

        for (idx, contour) in contours.iter().enumerate() {
            let points: Vec<(u32, u32)> = contour.points.iter().map(|p| (p.x, p.y)).collect();

            let bounds = match BoundingRect::from_points(&points) {
                Some(b) => b,
                None => continue,
            };

            if !passes_shape_filter(&bounds, &self.filter) {
                continue;
            }

            let boundary_length_px = chain_length(&points);
            let length = boundary_to_length(boundary_length_px, scale);
            let root_color = select_color(&self.style, idx, multi_color);

            self.annotate(binary, &bounds, length, primary_luma);
            self.annotate(color, &bounds, length, root_color);

            debug!(
                "Root {} at ({}, {}) {}x{}: {:.1} px boundary, length {:.4}",
                idx, bounds.x, bounds.y, bounds.width, bounds.height, boundary_length_px, length
            );

            measurements.push(RootMeasurement {
                contour_index: idx,
                bounds,
                source_bounds: bounds,
                boundary_length_px,
                length,
                color: root_color,
            });
        }

        debug!("Accepted {} of {} contours", measurements.len(), contours.len());
        measurements
    }

    fn annotate<P: Pixel + 'static>(
        &self,
        canvas: &mut image::ImageBuffer<P, Vec<P::Subpixel>>,
        bounds: &BoundingRect,
        length: f64,
        ink: P,
    ) {
        let (x, y) = (bounds.x as i32, bounds.y as i32);
        let (w, h) = (bounds.width as i32, bounds.height as i32);

        draw_box(canvas, x, y, bounds.width, bounds.height, self.style.line_thickness, ink);
        draw_label(
            canvas,
            &format!("Root: {:.6}", length),
            x + w + self.style.label_offset,
            y + h,
            self.style.label_scale,
            ink,
        );
    }
}
