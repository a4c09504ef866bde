// src/pipeline.rs - One measurement pass: binarize, copy color, measure

use image::{GrayImage, RgbImage};
use log::debug;

use crate::binarize::{binarize, Threshold};
use crate::measure::{RootMeasurer, RootMeasurement, ScaleFactor};

/// Annotated buffers and the accepted roots from one pass
#[derive(Debug, Clone)]
pub struct Frame {
    pub binary: GrayImage,
    pub color: RgbImage,
    pub measurements: Vec<RootMeasurement>,
}

impl Frame {
    /// Sum of all measured root lengths, in physical units
    pub fn total_length(&self) -> f64 {
        self.measurements.iter().map(|m| m.length).sum()
    }
}

/// Binarize `gray` at `threshold`, annotate a fresh copy of `source` and
/// return both. The inputs are never modified.
pub fn process_frame(
    gray: &GrayImage,
    source: &RgbImage,
    threshold: Threshold,
    scale: ScaleFactor,
    measurer: &RootMeasurer,
    multi_color: bool,
) -> Frame {
    let mut binary = binarize(gray, threshold);
    let mut color = source.clone();

    let measurements = measurer.measure(&mut binary, &mut color, scale, multi_color);
    debug!(
        "Threshold {}: {} roots, total length {:.4}",
        threshold.value(),
        measurements.len(),
        measurements.iter().map(|m| m.length).sum::<f64>()
    );

    Frame {
        binary,
        color,
        measurements,
    }
}
