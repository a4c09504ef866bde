// src/session.rs - Interactive threshold tuning loop

use std::io::Write;
use std::ops::Range;

use image::{GrayImage, ImageBuffer, Pixel, RgbImage};
use log::{info, warn};

use crate::binarize::Threshold;
use crate::config::Config;
use crate::errors::Result;
use crate::image_utils::crop_clipped;
use crate::input::{Action, Frontend, View};
use crate::measure::{RootMeasurer, ScaleFactor};
use crate::pipeline::{process_frame, Frame};

/// What the loop has to do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Binarize and measure again, then show the result
    Remeasure,
    /// Show the current frame with a different view
    Redisplay,
    Exit,
    Nothing,
}

/// Square window into the full-resolution image used while zoomed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub x: Range<u32>,
    pub y: Range<u32>,
}

impl Viewport {
    pub fn new(size: u32) -> Self {
        Self { x: 0..size, y: 0..size }
    }

    // A pan only happens while a full step fits before the image edge.

    pub fn pan_up(&mut self, step: u32) -> bool {
        Self::shift_back(&mut self.y, step)
    }

    pub fn pan_left(&mut self, step: u32) -> bool {
        Self::shift_back(&mut self.x, step)
    }

    pub fn pan_down(&mut self, step: u32, image_height: u32) -> bool {
        Self::shift_forward(&mut self.y, step, image_height)
    }

    pub fn pan_right(&mut self, step: u32, image_width: u32) -> bool {
        Self::shift_forward(&mut self.x, step, image_width)
    }

    fn shift_back(range: &mut Range<u32>, step: u32) -> bool {
        if range.start > step {
            range.start -= step;
            range.end -= step;
            return true;
        }
        false
    }

    fn shift_forward(range: &mut Range<u32>, step: u32, max: u32) -> bool {
        if (range.end as u64) + (step as u64) < max as u64 {
            range.start += step;
            range.end += step;
            return true;
        }
        false
    }

    /// The part of `image` under the viewport
    pub fn crop<P: Pixel + 'static>(
        &self,
        image: &ImageBuffer<P, Vec<P::Subpixel>>,
    ) -> Option<ImageBuffer<P, Vec<P::Subpixel>>> {
        crop_clipped(image, self.x.clone(), self.y.clone())
    }
}

/// Operator-controlled state of the tuning loop
#[derive(Debug, Clone)]
pub struct Session {
    threshold: Threshold,
    zoomed: bool,
    multi_color: bool,
    viewport: Viewport,
    zoom_step: u32,
    image_width: u32,
    image_height: u32,
}

impl Session {
    pub fn new(config: &Config, image_width: u32, image_height: u32) -> Self {
        Self {
            threshold: Threshold::new(config.initial_threshold),
            zoomed: false,
            multi_color: false,
            viewport: Viewport::new(config.zoom_size),
            zoom_step: config.zoom_step,
            image_width,
            image_height,
        }
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn multi_color(&self) -> bool {
        self.multi_color
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn apply(&mut self, action: Action) -> Transition {
        let step = self.zoom_step;
        let redisplay_if = |changed: bool| if changed { Transition::Redisplay } else { Transition::Nothing };

        match action {
            Action::Up | Action::Down | Action::Left | Action::Right => self.step_threshold(action),
            Action::ZoomIn => {
                self.zoomed = true;
                Transition::Redisplay
            }
            Action::ZoomOut => {
                self.zoomed = false;
                Transition::Redisplay
            }
            Action::PanUp => redisplay_if(self.viewport.pan_up(step)),
            Action::PanLeft => redisplay_if(self.viewport.pan_left(step)),
            Action::PanDown => redisplay_if(self.viewport.pan_down(step, self.image_height)),
            Action::PanRight => redisplay_if(self.viewport.pan_right(step, self.image_width)),
            Action::ToggleColor => {
                self.multi_color = !self.multi_color;
                Transition::Remeasure
            }
            Action::Confirm | Action::Quit => Transition::Exit,
        }
    }

    fn step_threshold(&mut self, action: Action) -> Transition {
        let changed = match action {
            Action::Up => self.threshold.coarse_down(),
            Action::Down => self.threshold.coarse_up(),
            Action::Left => self.threshold.fine_down(),
            Action::Right => self.threshold.fine_up(),
            _ => false,
        };

        if changed {
            Transition::Remeasure
        } else {
            warn!("Threshold {} is at its limit, ignoring {:?}", self.threshold.value(), action);
            Transition::Nothing
        }
    }
}

/// Final state when the operator leaves the loop
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub threshold: Threshold,
    pub multi_color: bool,
    pub frame: Frame,
}

fn print_threshold(threshold: Threshold) -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "\r\x1b[KThreshold: {:3}", threshold.value())?;
    stdout.flush()?;
    Ok(())
}

fn present<F: Frontend>(frontend: &mut F, session: &Session, frame: &Frame) -> Result<()> {
    if session.is_zoomed() {
        let viewport = session.viewport();
        if let (Some(binary), Some(color)) = (viewport.crop(&frame.binary), viewport.crop(&frame.color)) {
            frontend.show_gray(View::Binary, &binary)?;
            frontend.show_rgb(View::Color, &color)?;
            return Ok(());
        }
        warn!("Viewport {:?} lies outside the image, showing full view", viewport);
    }

    frontend.show_gray(View::Binary, &frame.binary)?;
    frontend.show_rgb(View::Color, &frame.color)
}

/// Let the operator tune the threshold until they confirm or quit.
///
/// Every remeasure works on a fresh copy of `source`, so annotations from
/// earlier passes never accumulate.
pub fn run_session<F: Frontend>(
    frontend: &mut F,
    gray: &GrayImage,
    source: &RgbImage,
    scale: ScaleFactor,
    config: &Config,
) -> Result<SessionOutcome> {
    let measurer = RootMeasurer::from_config(config);
    let mut session = Session::new(config, source.width(), source.height());
    info!(
        "Starting session at threshold {} with {:.3} px/unit",
        session.threshold().value(),
        scale.pixels_per_unit()
    );

    let measure = |session: &Session| {
        process_frame(gray, source, session.threshold(), scale, &measurer, session.multi_color())
    };

    let mut frame = measure(&session);
    print_threshold(session.threshold())?;
    let mut dirty = true;

    loop {
        if dirty {
            present(frontend, &session, &frame)?;
            dirty = false;
        }

        let action = match frontend.next_action()? {
            Some(action) => action,
            None => continue,
        };

        match session.apply(action) {
            Transition::Remeasure => {
                frame = measure(&session);
                print_threshold(session.threshold())?;
                dirty = true;
            }
            Transition::Redisplay => dirty = true,
            Transition::Nothing => {}
            Transition::Exit => break,
        }
    }
    println!();

    info!(
        "Session finished at threshold {}: {} roots",
        session.threshold().value(),
        frame.measurements.len()
    );

    Ok(SessionOutcome {
        threshold: session.threshold(),
        multi_color: session.multi_color(),
        frame,
    })
}
