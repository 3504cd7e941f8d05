// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveNorth,
    MoveSouth,
    MoveWest,
    MoveEast,

    // Meta actions
    ToggleDebug,
    SpeedUp,
    SpeedDown,
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        // Movement (WASD, with arrow keys as an alternative)
        (KeyCode::KeyW, Action::MoveNorth),
        (KeyCode::KeyS, Action::MoveSouth),
        (KeyCode::KeyA, Action::MoveWest),
        (KeyCode::KeyD, Action::MoveEast),
        (KeyCode::ArrowUp, Action::MoveNorth),
        (KeyCode::ArrowDown, Action::MoveSouth),
        (KeyCode::ArrowLeft, Action::MoveWest),
        (KeyCode::ArrowRight, Action::MoveEast),
        // Debug overlay
        (KeyCode::F1, Action::ToggleDebug),
        // Speed (keypad, plus the main-row keys for keyboards without one)
        (KeyCode::NumpadAdd, Action::SpeedUp),
        (KeyCode::NumpadSubtract, Action::SpeedDown),
        (KeyCode::Equal, Action::SpeedUp),
        (KeyCode::Minus, Action::SpeedDown),
    ]
}
