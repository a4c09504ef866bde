// src/testing.rs - Scripted frontend for driving the interactive parts without a window

use std::collections::VecDeque;

use image::{GrayImage, RgbImage};

use crate::errors::Result;
use crate::input::{Action, Frontend, View};

/// Replays a fixed list of actions and records what was shown.
///
/// Once the script runs out it answers [`Action::Quit`] so loops always end.
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    script: VecDeque<Option<Action>>,
    pub shown_rgb: Vec<(View, RgbImage)>,
    pub shown_gray: Vec<(View, GrayImage)>,
}

impl ScriptedFrontend {
    pub fn new<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        Self::with_events(actions.into_iter().map(Some))
    }

    /// Like [`new`](Self::new) but allows unrecognized (`None`) events
    pub fn with_events<I: IntoIterator<Item = Option<Action>>>(events: I) -> Self {
        Self {
            script: events.into_iter().collect(),
            shown_rgb: Vec::new(),
            shown_gray: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn last_rgb(&self, view: View) -> Option<&RgbImage> {
        self.shown_rgb.iter().rev().find(|(v, _)| *v == view).map(|(_, img)| img)
    }

    pub fn last_gray(&self, view: View) -> Option<&GrayImage> {
        self.shown_gray.iter().rev().find(|(v, _)| *v == view).map(|(_, img)| img)
    }
}

impl Frontend for ScriptedFrontend {
    fn show_rgb(&mut self, view: View, image: &RgbImage) -> Result<()> {
        self.shown_rgb.push((view, image.clone()));
        Ok(())
    }

    fn show_gray(&mut self, view: View, image: &GrayImage) -> Result<()> {
        self.shown_gray.push((view, image.clone()));
        Ok(())
    }

    fn next_action(&mut self) -> Result<Option<Action>> {
        Ok(self.script.pop_front().unwrap_or(Some(Action::Quit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_plays_in_order_then_quits() {
        let mut frontend = ScriptedFrontend::with_events(vec![Some(Action::Up), None]);
        assert_eq!(frontend.next_action().unwrap(), Some(Action::Up));
        assert_eq!(frontend.next_action().unwrap(), None);
        assert_eq!(frontend.remaining(), 0);
        assert_eq!(frontend.next_action().unwrap(), Some(Action::Quit));
    }

    #[test]
    fn records_latest_frame_per_view() {
        let mut frontend = ScriptedFrontend::new(Vec::new());
        frontend.show_gray(View::Binary, &GrayImage::new(1, 1)).unwrap();
        frontend.show_gray(View::Binary, &GrayImage::new(2, 2)).unwrap();
        frontend.show_rgb(View::Color, &RgbImage::new(3, 3)).unwrap();

        assert_eq!(frontend.last_gray(View::Binary).unwrap().dimensions(), (2, 2));
        assert_eq!(frontend.last_rgb(View::Color).unwrap().dimensions(), (3, 3));
        assert!(frontend.last_rgb(View::Binary).is_none());
    }
}
