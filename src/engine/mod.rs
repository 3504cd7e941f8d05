// Engine modules: assets, timing, input, renderer

pub mod assets;
pub mod clock;
pub mod game_loop;
pub mod input;
pub mod renderer;
