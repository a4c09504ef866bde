// src/calibration.rs - Scale calibration from two operator-placed markers

use image::{imageops, Rgb, RgbImage};
use log::{info, trace, warn};

use crate::annotate::{draw_cross_marker, draw_tilted_cross_marker};
use crate::config::Config;
use crate::errors::{RootLengthError, Result};
use crate::input::{Action, Frontend, View};
use crate::measure::ScaleFactor;

// Colors (RGB)
pub const COLOR_CURSOR: Rgb<u8> = Rgb([255, 255, 0]); // Yellow
pub const COLOR_MARKER: Rgb<u8> = Rgb([0, 255, 255]); // Cyan

/// Result of a finished calibration
#[derive(Debug, Clone)]
pub struct Calibration {
    pub first_marker: (u32, u32),
    pub second_marker: (u32, u32),
    /// Euclidean pixel distance between the markers
    pub pixels_per_unit: f64,
    /// Reference region with both markers drawn on it
    pub annotated: RgbImage,
}

impl Calibration {
    /// The validated scale; coinciding markers give an error, not a zero.
    pub fn scale(&self) -> Result<ScaleFactor> {
        ScaleFactor::new(self.pixels_per_unit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationStep {
    Continue,
    Done,
}

/// Cursor and marker state while the operator places the two markers
#[derive(Debug, Clone)]
pub struct CalibrationSession {
    annotated: RgbImage,
    cursor: (u32, u32),
    first: Option<(u32, u32)>,
    second: Option<(u32, u32)>,
    marker_size: u32,
}

/// Euclidean distance between two pixel positions
pub fn marker_distance(a: (u32, u32), b: (u32, u32)) -> f64 {
    let dx = a.0 as f64 - b.0 as f64;
    let dy = a.1 as f64 - b.1 as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Top-left crop of the scan holding the physical length reference,
/// clipped to the image size.
pub fn reference_region(image: &RgbImage, width: u32, height: u32) -> Result<RgbImage> {
    let w = width.min(image.width());
    let h = height.min(image.height());
    if w == 0 || h == 0 {
        return Err(RootLengthError::EmptyReferenceRegion {
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(imageops::crop_imm(image, 0, 0, w, h).to_image())
}

impl CalibrationSession {
    pub fn new(region: RgbImage, cursor_start: [u32; 2], marker_size: u32) -> Result<Self> {
        let (width, height) = region.dimensions();
        if width == 0 || height == 0 {
            return Err(RootLengthError::EmptyReferenceRegion { width, height });
        }

        Ok(Self {
            annotated: region,
            cursor: (cursor_start[0].min(width - 1), cursor_start[1].min(height - 1)),
            first: None,
            second: None,
            marker_size,
        })
    }

    pub fn cursor(&self) -> (u32, u32) {
        self.cursor
    }

    pub fn first_marker(&self) -> Option<(u32, u32)> {
        self.first
    }

    /// Region with confirmed markers plus the transient cursor crosshair.
    /// The crosshair is drawn on a fresh copy every time.
    pub fn working_frame(&self) -> RgbImage {
        let mut frame = self.annotated.clone();
        draw_cross_marker(&mut frame, self.cursor.0, self.cursor.1, self.marker_size, COLOR_CURSOR);
        frame
    }

    /// Apply one operator action. Quitting before both markers are set
    /// aborts the calibration.
    pub fn apply(&mut self, action: Action) -> Result<CalibrationStep> {
        let (width, height) = self.annotated.dimensions();
        let (x, y) = self.cursor;

        match action {
            Action::Up => self.cursor.1 = y.saturating_sub(1),
            Action::Down => self.cursor.1 = (y + 1).min(height - 1),
            Action::Left => self.cursor.0 = x.saturating_sub(1),
            Action::Right => self.cursor.0 = (x + 1).min(width - 1),
            Action::Confirm => {
                draw_tilted_cross_marker(&mut self.annotated, x, y, self.marker_size, COLOR_MARKER);
                if self.first.is_none() {
                    info!("First reference marker at ({}, {})", x, y);
                    self.first = Some((x, y));
                } else {
                    info!("Second reference marker at ({}, {})", x, y);
                    self.second = Some((x, y));
                    return Ok(CalibrationStep::Done);
                }
            }
            Action::Quit => return Err(RootLengthError::CalibrationAborted),
            other => warn!("Ignoring {:?} during calibration", other),
        }

        trace!("Cursor at {:?}", self.cursor);
        Ok(CalibrationStep::Continue)
    }

    /// Consume the session once both markers are placed
    pub fn finish(self) -> Option<Calibration> {
        let (first_marker, second_marker) = (self.first?, self.second?);
        Some(Calibration {
            first_marker,
            second_marker,
            pixels_per_unit: marker_distance(first_marker, second_marker),
            annotated: self.annotated,
        })
    }
}

/// Let the operator mark two points a known distance apart on the
/// reference region and return their pixel distance.
pub fn calibrate<F: Frontend>(frontend: &mut F, region: RgbImage, config: &Config) -> Result<Calibration> {
    let mut session = CalibrationSession::new(region, config.reference_cursor_start, config.marker_size)?;

    loop {
        frontend.show_rgb(View::Binary, &session.working_frame())?;

        let action = match frontend.next_action()? {
            Some(action) => action,
            None => continue,
        };

        if session.apply(action)? == CalibrationStep::Done {
            break;
        }
    }

    let calibration = session.finish().ok_or(RootLengthError::CalibrationAborted)?;
    println!("Reference Factor: {} px/cm", calibration.pixels_per_unit);
    info!(
        "Calibrated between {:?} and {:?}: {:.3} px/unit",
        calibration.first_marker, calibration.second_marker, calibration.pixels_per_unit
    );

    Ok(calibration)
}
