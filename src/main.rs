use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use config::GameConfig;
use engine::assets::AssetLoader;
use engine::clock::SystemClock;
use engine::game_loop::GameLoop;
use engine::input::{InputConfig, InputManager};
use engine::renderer::Renderer;
use game::entities::ResourceCatalog;
use game::Game;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Kyanite...");

    let config = GameConfig::load()?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    let assets = AssetLoader::new(&config.assets_dir);
    let catalog = ResourceCatalog::load(&mut renderer, &assets)
        .with_context(|| format!("Failed to load assets from {}", assets.base_path().display()))?;

    let clock = SystemClock;
    let mut game = Game::new(&catalog, &config, &clock);
    let mut input = InputManager::new(InputConfig::default());
    let mut game_loop = GameLoop::new(config.tick_rate);

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!(
                    "Close requested after {} frames and {} ticks, shutting down...",
                    game_loop.frame_count(),
                    game_loop.tick_count()
                );
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                renderer.resize(physical_size);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                input.reset();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                for _ in 0..game_loop.begin_frame() {
                    game.update(&input.intent(), &clock);
                    input.end_tick();
                }

                game.draw(&mut renderer, game_loop.fps());
                if let Err(e) = renderer.end_frame() {
                    error!("Skipped frame: {:#}", e);
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
