//! Static key-code dispatch table.
//!
//! Physical key codes are used so the layout of the keyboard does not
//! matter. Every press fires, OS key repeat included; releases never do.

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::action::Action;

/// Minimal description of a key event for processing.
///
/// OS auto-repeat is not recorded: a held key arrives as further presses
/// and each one fires its action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
}

impl From<&KeyEvent> for RawKeyEvent {
    fn from(event: &KeyEvent) -> Self {
        Self {
            key: event.physical_key,
            state: event.state,
        }
    }
}

/// Look up the action bound to a key.
pub fn action_for_key(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::ArrowUp => Action::MoveUp,
        KeyCode::ArrowDown => Action::MoveDown,
        KeyCode::ArrowLeft => Action::MoveLeft,
        KeyCode::ArrowRight => Action::MoveRight,
        KeyCode::KeyO => Action::MoveForward,
        KeyCode::KeyP => Action::MoveBackward,
        KeyCode::KeyU => Action::RotateLeft,
        KeyCode::KeyI => Action::RotateRight,
        KeyCode::Equal => Action::ScaleModeIncrease,
        KeyCode::Minus => Action::ScaleModeDecrease,
        KeyCode::Digit1 => Action::ScaleBody(0),
        KeyCode::Digit2 => Action::ScaleBody(1),
        KeyCode::Digit3 => Action::ScaleBody(2),
        KeyCode::Digit4 => Action::ScaleBody(3),
        KeyCode::Digit5 => Action::ScaleBody(4),
        KeyCode::Digit6 => Action::ScaleBody(5),
        KeyCode::Digit7 => Action::ScaleBody(6),
        KeyCode::Digit8 => Action::ScaleBody(7),
        KeyCode::Digit9 => Action::ScaleBody(8),
        KeyCode::KeyZ => Action::ZoomIn,
        KeyCode::KeyX => Action::ZoomOut,
        KeyCode::Period => Action::Faster,
        KeyCode::Comma => Action::Slower,
        KeyCode::Space => Action::TogglePause,
        KeyCode::KeyR => Action::Reset,
        KeyCode::Escape => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Action for a key event: presses (including repeats) of bound keys only.
pub fn action_for_event(event: RawKeyEvent) -> Option<Action> {
    if event.state != ElementState::Pressed {
        return None;
    }
    match event.key {
        PhysicalKey::Code(code) => action_for_key(code),
        PhysicalKey::Unidentified(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
        }
    }

    #[test]
    fn test_digits_address_bodies_from_zero() {
        assert_eq!(action_for_key(KeyCode::Digit1), Some(Action::ScaleBody(0)));
        assert_eq!(action_for_key(KeyCode::Digit9), Some(Action::ScaleBody(8)));
        assert_eq!(action_for_key(KeyCode::Digit0), None);
    }

    #[test]
    fn test_unbound_key_has_no_action() {
        assert_eq!(action_for_key(KeyCode::KeyQ), None);
        assert_eq!(action_for_key(KeyCode::F1), None);
    }

    #[test]
    fn test_held_key_fires_every_press() {
        let held = [press(KeyCode::KeyZ); 3];
        let actions: Vec<_> = held.into_iter().filter_map(action_for_event).collect();
        assert_eq!(actions, vec![Action::ZoomIn; 3]);
    }

    #[test]
    fn test_release_is_ignored() {
        let release = RawKeyEvent {
            key: PhysicalKey::Code(KeyCode::Space),
            state: ElementState::Released,
        };
        assert_eq!(action_for_event(release), None);
    }

    #[test]
    fn test_table_bindings() {
        let expected = [
            (KeyCode::ArrowUp, Action::MoveUp),
            (KeyCode::ArrowLeft, Action::MoveLeft),
            (KeyCode::KeyO, Action::MoveForward),
            (KeyCode::KeyP, Action::MoveBackward),
            (KeyCode::KeyU, Action::RotateLeft),
            (KeyCode::KeyI, Action::RotateRight),
            (KeyCode::Equal, Action::ScaleModeIncrease),
            (KeyCode::Minus, Action::ScaleModeDecrease),
            (KeyCode::KeyX, Action::ZoomOut),
            (KeyCode::Period, Action::Faster),
            (KeyCode::Comma, Action::Slower),
            (KeyCode::KeyR, Action::Reset),
            (KeyCode::Escape, Action::Quit),
        ];
        for (key, action) in expected {
            assert_eq!(action_for_event(press(key)), Some(action), "{key:?}");
        }
    }
}
