// src/gui/mod.rs - minifb windows for the "color" and "bin" views

mod events;
mod render;

use std::collections::VecDeque;
use std::time::Duration;

use image::{GrayImage, RgbImage};
use log::{debug, info};
use minifb::{KeyRepeat, ScaleMode, Window, WindowOptions};

use crate::config::Config;
use crate::errors::{Result, RootLengthError};
use crate::input::{Action, Frontend, View};

pub use self::events::map_key;
pub use self::render::Framebuffer;

struct ViewWindow {
    window: Window,
    framebuffer: Framebuffer,
}

/// Desktop frontend: one window per view, created when first shown.
pub struct MinifbFrontend {
    window_width: usize,
    window_height: usize,
    color: Option<ViewWindow>,
    binary: Option<ViewWindow>,
    pending: VecDeque<minifb::Key>,
}

impl MinifbFrontend {
    pub fn new(config: &Config) -> Self {
        Self {
            window_width: config.window_width,
            window_height: config.window_height,
            color: None,
            binary: None,
            pending: VecDeque::new(),
        }
    }

    fn slot(&mut self, view: View) -> &mut Option<ViewWindow> {
        match view {
            View::Color => &mut self.color,
            View::Binary => &mut self.binary,
        }
    }

    fn show(&mut self, view: View, framebuffer: Framebuffer) -> Result<()> {
        if framebuffer.is_empty() {
            debug!("Skipping empty {} frame", view.title());
            return Ok(());
        }

        let (width, height) = (self.window_width, self.window_height);
        let slot = self.slot(view);
        if slot.is_none() {
            let mut window = Window::new(
                view.title(),
                width,
                height,
                WindowOptions {
                    resize: true,
                    scale_mode: ScaleMode::AspectRatioStretch,
                    ..WindowOptions::default()
                },
            )
            .map_err(|e| RootLengthError::Display(format!("Failed to create window {}: {}", view.title(), e)))?;

            // ~60 FPS while waiting for keys
            window.limit_update_rate(Some(Duration::from_millis(16)));
            info!("Opened {} window", view.title());
            *slot = Some(ViewWindow { window, framebuffer });
        } else if let Some(view_window) = slot.as_mut() {
            view_window.framebuffer = framebuffer;
        }

        if let Some(view_window) = slot.as_mut() {
            present(view_window)?;
        }
        Ok(())
    }

    fn open_windows(&mut self) -> impl Iterator<Item = &mut ViewWindow> + '_ {
        self.color.iter_mut().chain(self.binary.iter_mut())
    }
}

fn present(view_window: &mut ViewWindow) -> Result<()> {
    let fb = &view_window.framebuffer;
    view_window
        .window
        .update_with_buffer(&fb.pixels, fb.width, fb.height)
        .map_err(|e| RootLengthError::Display(format!("Failed to update window: {}", e)))
}

impl Frontend for MinifbFrontend {
    fn show_rgb(&mut self, view: View, image: &RgbImage) -> Result<()> {
        self.show(view, Framebuffer::from_rgb(image))
    }

    fn show_gray(&mut self, view: View, image: &GrayImage) -> Result<()> {
        self.show(view, Framebuffer::from_gray(image))
    }

    /// Pump both windows until a key arrives. Closing either window quits.
    fn next_action(&mut self) -> Result<Option<Action>> {
        if self.color.is_none() && self.binary.is_none() {
            return Err(RootLengthError::Display("No window open to read input from".to_string()));
        }

        loop {
            if let Some(key) = self.pending.pop_front() {
                return Ok(map_key(key));
            }

            let mut pressed = Vec::new();
            for view_window in self.open_windows() {
                if !view_window.window.is_open() {
                    return Ok(Some(Action::Quit));
                }
                present(view_window)?;
                pressed.extend(view_window.window.get_keys_pressed(KeyRepeat::Yes));
            }
            self.pending.extend(pressed);
        }
    }
}
