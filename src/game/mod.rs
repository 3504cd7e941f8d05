// Game layer
//
// Entities, their animation and rendering, and the world that ties them to
// input and the camera.

pub mod entities;
pub mod render;
pub mod world;

pub use world::Game;
