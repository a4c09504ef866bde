// src/input.rs - Operator actions and the display+input seam

use image::{GrayImage, RgbImage};

use crate::errors::Result;

/// Closed set of operator inputs understood by the calibrator and the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    ZoomIn,
    ZoomOut,
    PanUp,
    PanLeft,
    PanDown,
    PanRight,
    ToggleColor,
    Confirm,
    Quit,
}

/// The two labelled output views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Color,
    Binary,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Color => "color",
            View::Binary => "bin",
        }
    }
}

/// Presents buffers to the operator and blocks for their next input.
pub trait Frontend {
    fn show_rgb(&mut self, view: View, image: &RgbImage) -> Result<()>;

    fn show_gray(&mut self, view: View, image: &GrayImage) -> Result<()>;

    /// Block until the next input event. `None` means the event was not one
    /// of the recognized actions.
    fn next_action(&mut self) -> Result<Option<Action>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_titles() {
        assert_eq!(View::Color.title(), "color");
        assert_eq!(View::Binary.title(), "bin");
    }
}
