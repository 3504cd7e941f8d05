// Game world: entity state, camera and per-tick update

use super::entities::{Entity, ResourceCatalog, SPEED_STEP};
use super::render::render_entity;
use crate::config::{GameConfig, SpawnConfig, WorldConfig};
use crate::core::math::{Color, Rect, Vec2};
use crate::engine::clock::Clock;
use crate::engine::input::InputIntent;
use crate::engine::renderer::{Camera, RenderSurface};
use log::{debug, info};
use std::time::Duration;

/// Side length of the debug centre marker in pixels
const CENTER_MARKER_SIZE: f64 = 4.0;

/// Every entity in the world
///
/// The player is always drawn and updated first.
#[derive(Debug, Clone)]
pub struct GameState {
    pub player: Entity,
    pub entities: Vec<Entity>,
}

impl GameState {
    /// Spawn the player and then the other configured entities in order
    pub fn new(
        catalog: &ResourceCatalog,
        world: &WorldConfig,
        frame_duration: Duration,
        clock: &dyn Clock,
    ) -> Self {
        let spawn = |config: &SpawnConfig| {
            Entity::new(
                catalog.get(config.kind),
                config.position(),
                config.scale(),
                frame_duration,
                clock.now(),
            )
        };

        let player = spawn(&world.player);
        let entities: Vec<Entity> = world.entities.iter().map(spawn).collect();
        info!("Spawned player and {} other entities", entities.len());

        Self { player, entities }
    }

    /// Player first, then the rest in stored order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.player).chain(self.entities.iter())
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        std::iter::once(&mut self.player).chain(self.entities.iter_mut())
    }

    /// One fixed tick: steer the player, then move and animate everyone
    pub fn update(&mut self, intent: &InputIntent, clock: &dyn Clock) {
        self.player.velocity = intent.movement;

        for entity in self.iter_mut() {
            entity.integrate();
            entity.update_animation(clock);
        }
    }
}

/// Top-level game: world state plus view settings
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub camera: Camera,
    pub debug: bool,
    pub background: Color,
}

impl Game {
    pub fn new(catalog: &ResourceCatalog, config: &GameConfig, clock: &dyn Clock) -> Self {
        let state = GameState::new(catalog, &config.world, config.frame_duration(), clock);
        let camera = Camera::new(state.player.position, config.camera_scale());

        Self {
            state,
            camera,
            debug: false,
            background: config.background_color(),
        }
    }

    /// Apply one tick of input and advance the world
    pub fn update(&mut self, intent: &InputIntent, clock: &dyn Clock) {
        if intent.toggle_debug {
            self.debug = !self.debug;
            debug!("Debug overlay {}", if self.debug { "on" } else { "off" });
        }

        if intent.increase_speed {
            self.state.player.adjust_speed(SPEED_STEP);
        } else if intent.decrease_speed {
            self.state.player.adjust_speed(-SPEED_STEP);
        }

        self.state.update(intent, clock);
        self.camera.follow(self.state.player.position);
    }

    /// Draw a full frame
    pub fn draw(&self, surface: &mut dyn RenderSurface, fps: f64) {
        surface.fill_background(self.background);

        if self.debug {
            surface.draw_debug_text(&format!(
                "FPS: {:.1}\nSpeed: {:.1}",
                fps, self.state.player.speed_multiplier
            ));
            let center = surface.screen_size() / 2.0;
            surface.fill_rect(
                Rect::from_center(center, Vec2::splat(CENTER_MARKER_SIZE)),
                Color::WHITE,
            );
        }

        for entity in self.state.iter() {
            render_entity(surface, entity, &self.camera);
        }
    }
}
