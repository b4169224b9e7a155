//! # Input Module
//!
//! Pointer and keyboard polling for the frame loop.

use macroquad::prelude::*;

/// Player input types the frame loop can act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerInput {
    /// Left click at device coordinates
    Click {
        /// Pixel x
        x: f32,
        /// Pixel y
        y: f32,
    },
    /// Quit the game
    Quit,
}

/// Input handler polling macroquad once per frame.
///
/// At most one input is reported per frame; quitting takes precedence over
/// clicking so state mutations stay one-per-event.
pub struct InputHandler;

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Polls for input this frame, if any.
    pub fn poll(&self) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
            return Some(PlayerInput::Quit);
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            return Some(PlayerInput::Click { x, y });
        }

        None
    }
}
