// Input manager - turns keyboard events into per-tick intents

use super::action::Action;
use super::config::InputConfig;
use super::player::PlayerInput;
use crate::core::math::Vec2;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// What the player asked for during one tick
///
/// Movement components are each one of -1, 0 or 1. North is negative y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputIntent {
    pub movement: Vec2,
    pub toggle_debug: bool,
    pub increase_speed: bool,
    pub decrease_speed: bool,
}

/// Main input manager
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // Key repeats are not new presses
            if event.repeat {
                return;
            }
            self.process_key(key_code, event.state);
        }
    }

    /// Apply a key state change
    pub fn process_key(&mut self, key: KeyCode, state: ElementState) {
        let Some(action) = self.config.get_action(key) else {
            return;
        };

        match state {
            ElementState::Pressed => self.player.press(action, key),
            ElementState::Released => self.player.release(action, key),
        }
    }

    /// Snapshot the intent for the tick about to run
    pub fn intent(&self) -> InputIntent {
        InputIntent {
            movement: Vec2::new(
                self.player.axis(Action::MoveWest, Action::MoveEast),
                self.player.axis(Action::MoveNorth, Action::MoveSouth),
            ),
            toggle_debug: self.player.just_pressed(Action::ToggleDebug),
            increase_speed: self.player.just_pressed(Action::SpeedUp),
            decrease_speed: self.player.just_pressed(Action::SpeedDown),
        }
    }

    /// Mark edge events as consumed
    /// Call once after each tick that used `intent()`
    pub fn end_tick(&mut self) {
        self.player.end_tick();
    }

    /// Release all keys
    pub fn reset(&mut self) {
        self.player.reset();
    }
}
