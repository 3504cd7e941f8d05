// Input handling system
//
// Keyboard events from winit are mapped through a remappable binding table to
// game actions. Once per tick the manager produces an immutable `InputIntent`
// that the game consumes; the game never looks at key state itself.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Key binding configuration and remapping
// - `player`: Held keys per action and just-pressed edges
// - `manager`: Event processing and intent snapshots
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::new(InputConfig::default());
//
// // In your event loop, process keyboard events
// input.process_keyboard_event(&key_event);
//
// // For every fixed tick
// let intent = input.intent();
// game.update(&intent, &clock);
// input.end_tick();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use config::InputConfig;
pub use manager::{InputIntent, InputManager};
