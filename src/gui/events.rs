// src/gui/events.rs - Keyboard to action mapping

use minifb::Key;

use crate::input::Action;

/// Map a pressed key to an action. Anything else is not part of the
/// vocabulary and yields `None`.
pub fn map_key(key: Key) -> Option<Action> {
    let action = match key {
        Key::Up => Action::Up,
        Key::Down => Action::Down,
        Key::Left => Action::Left,
        Key::Right => Action::Right,
        // '+' shares its key with '=' on most layouts
        Key::Equal | Key::NumPadPlus => Action::ZoomIn,
        Key::Minus | Key::NumPadMinus => Action::ZoomOut,
        Key::W => Action::PanUp,
        Key::A => Action::PanLeft,
        Key::S => Action::PanDown,
        Key::D => Action::PanRight,
        Key::C => Action::ToggleColor,
        Key::Enter | Key::NumPadEnter => Action::Confirm,
        Key::Escape => Action::Quit,
        _ => return None,
    };
    Some(action)
}
