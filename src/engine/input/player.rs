// Player action state across ticks

use super::action::Action;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Which actions the player is holding, and which were newly pressed since the last tick
///
/// An action can be bound to several keys. It stays held while any of those
/// keys is down.
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Keys currently down, grouped by the action they drive
    held: HashMap<Action, HashSet<KeyCode>>,

    /// Actions that went from released to held since the last tick
    just_pressed: HashSet<Action>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any key bound to an action is down
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held.get(&action).is_some_and(|keys| !keys.is_empty())
    }

    /// Check if an action was pressed since the last tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Register `key` going down for `action`
    pub(crate) fn press(&mut self, action: Action, key: KeyCode) {
        let was_held = self.is_pressed(action);
        self.held.entry(action).or_default().insert(key);
        if !was_held {
            self.just_pressed.insert(action);
        }
    }

    /// Register `key` going up for `action`
    pub(crate) fn release(&mut self, action: Action, key: KeyCode) {
        if let Some(keys) = self.held.get_mut(&action) {
            keys.remove(&key);
            if keys.is_empty() {
                self.held.remove(&action);
            }
        }
    }

    /// Forget edge events once a tick has consumed them
    pub(crate) fn end_tick(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }

    /// Movement axis from a pair of opposing actions
    /// The first action wins when both are held
    pub fn axis(&self, negative: Action, positive: Action) -> f64 {
        if self.is_pressed(negative) {
            -1.0
        } else if self.is_pressed(positive) {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveNorth, KeyCode::KeyW);
        assert!(input.is_pressed(Action::MoveNorth));
        assert!(input.just_pressed(Action::MoveNorth));
    }

    #[test]
    fn test_repeat_press_is_not_a_new_edge() {
        let mut input = PlayerInput::new();
        input.press(Action::ToggleDebug, KeyCode::F1);
        input.end_tick();
        input.press(Action::ToggleDebug, KeyCode::F1);

        assert!(input.is_pressed(Action::ToggleDebug));
        assert!(!input.just_pressed(Action::ToggleDebug));
    }

    #[test]
    fn test_second_key_is_not_a_new_edge() {
        let mut input = PlayerInput::new();
        input.press(Action::SpeedUp, KeyCode::NumpadAdd);
        input.end_tick();
        input.press(Action::SpeedUp, KeyCode::Equal);

        assert!(!input.just_pressed(Action::SpeedUp));
    }

    #[test]
    fn test_action_held_until_last_key_released() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveEast, KeyCode::KeyD);
        input.press(Action::MoveEast, KeyCode::ArrowRight);

        input.release(Action::MoveEast, KeyCode::ArrowRight);
        assert!(input.is_pressed(Action::MoveEast));

        input.release(Action::MoveEast, KeyCode::KeyD);
        assert!(!input.is_pressed(Action::MoveEast));
    }

    #[test]
    fn test_release_of_unheld_key_is_ignored() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveWest, KeyCode::KeyA);
        input.release(Action::MoveWest, KeyCode::ArrowLeft);

        assert!(input.is_pressed(Action::MoveWest));
    }

    #[test]
    fn test_end_tick_clears_edges() {
        let mut input = PlayerInput::new();
        input.press(Action::SpeedUp, KeyCode::NumpadAdd);
        input.end_tick();

        assert!(input.is_pressed(Action::SpeedUp));
        assert!(!input.just_pressed(Action::SpeedUp));
    }

    #[test]
    fn test_axis_precedence() {
        let mut input = PlayerInput::new();
        assert_eq!(input.axis(Action::MoveNorth, Action::MoveSouth), 0.0);

        input.press(Action::MoveSouth, KeyCode::KeyS);
        assert_eq!(input.axis(Action::MoveNorth, Action::MoveSouth), 1.0);

        input.press(Action::MoveNorth, KeyCode::KeyW);
        assert_eq!(input.axis(Action::MoveNorth, Action::MoveSouth), -1.0);
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveWest, KeyCode::KeyA);
        input.reset();
        assert!(!input.is_pressed(Action::MoveWest));
        assert!(!input.just_pressed(Action::MoveWest));
    }
}
