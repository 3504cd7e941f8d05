// Key binding configuration and remapping

use super::action::{self, Action};
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Maps keys to game actions
///
/// Several keys may drive the same action, but a key drives at most one.
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<KeyCode, Action>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    /// Later entries win when a key is listed twice
    pub fn from_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        let mut config = Self::new();
        for (key, action) in bindings {
            config.bind(key, action);
        }
        config
    }

    /// Bind a key to an action, replacing whatever it drove before
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.bindings.insert(key, action);
    }

    /// Get the action bound to a key
    pub fn get_action(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(action::default_bindings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_action() {
        let mut config = InputConfig::new();
        config.bind(KeyCode::KeyA, Action::MoveWest);

        assert_eq!(config.get_action(KeyCode::KeyA), Some(Action::MoveWest));
        assert_eq!(config.get_action(KeyCode::KeyD), None);
    }

    #[test]
    fn test_rebind_key_moves_it() {
        let config = InputConfig::from_bindings(vec![
            (KeyCode::KeyQ, Action::MoveWest),
            (KeyCode::KeyQ, Action::ToggleDebug),
        ]);

        assert_eq!(config.get_action(KeyCode::KeyQ), Some(Action::ToggleDebug));
    }

    #[test]
    fn test_two_keys_for_one_action() {
        let config = InputConfig::default();
        assert_eq!(config.get_action(KeyCode::KeyW), Some(Action::MoveNorth));
        assert_eq!(config.get_action(KeyCode::ArrowUp), Some(Action::MoveNorth));
    }

    #[test]
    fn test_default_has_speed_keys() {
        let config = InputConfig::default();
        assert_eq!(config.get_action(KeyCode::NumpadAdd), Some(Action::SpeedUp));
        assert_eq!(
            config.get_action(KeyCode::NumpadSubtract),
            Some(Action::SpeedDown)
        );
        assert_eq!(config.get_action(KeyCode::F1), Some(Action::ToggleDebug));
    }
}
