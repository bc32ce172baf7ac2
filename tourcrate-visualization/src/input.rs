//! Mapping from window input to viewer intents

use tourcrate_core::Direction;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{Key, NamedKey};

/// What the user asked the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Navigate(Direction),
    Close,
}

pub fn intent_for_key(key: &Key) -> Option<Intent> {
    match key {
        Key::Named(NamedKey::ArrowLeft) => Some(Intent::Navigate(Direction::Previous)),
        Key::Named(NamedKey::ArrowRight) => Some(Intent::Navigate(Direction::Next)),
        Key::Named(NamedKey::Escape) => Some(Intent::Close),
        _ => None,
    }
}

/// Key presses, including auto-repeats of a held key, map to intents.
///
/// A held arrow keeps stepping: repeats arriving mid-transition are dropped
/// by the controller; the first one after completion starts a new step.
pub fn intent_for_key_press(key: &Key, state: ElementState) -> Option<Intent> {
    match state {
        ElementState::Pressed => intent_for_key(key),
        ElementState::Released => None,
    }
}

/// A left click anywhere on the surface moves forward
pub fn intent_for_click(button: MouseButton, state: ElementState) -> Option<Intent> {
    match (button, state) {
        (MouseButton::Left, ElementState::Pressed) => Some(Intent::Navigate(Direction::Next)),
        _ => None,
    }
}
