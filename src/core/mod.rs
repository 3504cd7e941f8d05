// Core types with no engine or game dependencies

pub mod math;

pub use math::{Color, Rect, Vec2};
