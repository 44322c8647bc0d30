//! Keyboard control: a static key-code table mapped to scene actions.

pub mod action;
pub mod dispatch;
pub mod keymap;

pub use action::Action;
pub use dispatch::{Control, apply};
pub use keymap::{RawKeyEvent, action_for_event, action_for_key};
