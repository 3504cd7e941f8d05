// Entity: a positioned, animated sprite in the world

use super::animation::{AnimationState, DirectionalAnimator};
use super::direction::FacingDirection;
use super::resource::Resource;
use crate::core::math::Vec2;
use crate::engine::clock::Clock;
use glam::UVec2;
use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Step used by `Entity::adjust_speed` callers
pub const SPEED_STEP: f64 = 0.1;

/// A moving sprite
///
/// Owns its animation states. The resource is shared with every other entity
/// of the same kind.
#[derive(Debug, Clone)]
pub struct Entity {
    /// World position of the sprite's visual centre
    pub position: Vec2,
    /// Per-axis size multiplier applied to the atlas cell
    pub scale: Vec2,
    /// World units moved per tick, before `speed_multiplier`
    pub velocity: Vec2,
    pub speed_multiplier: f64,
    animation: DirectionalAnimator,
    resource: Arc<Resource>,
}

impl Entity {
    /// Spawn a stationary entity facing South
    pub fn new(
        resource: Arc<Resource>,
        position: Vec2,
        scale: Vec2,
        frame_duration: Duration,
        now: Instant,
    ) -> Self {
        let animation = DirectionalAnimator::new(&resource, frame_duration, now);
        Self {
            position,
            scale,
            velocity: Vec2::ZERO,
            speed_multiplier: 1.0,
            animation,
            resource,
        }
    }

    /// Move by one tick of velocity
    pub fn integrate(&mut self) {
        self.position += self.velocity * self.speed_multiplier;
    }

    /// Run the animation state machine against the current velocity
    pub fn update_animation(&mut self, clock: &dyn Clock) {
        self.animation.update(self.velocity, clock);
    }

    pub fn facing(&self) -> FacingDirection {
        self.animation.facing()
    }

    /// Animation state of the current facing
    pub fn animation(&self) -> &AnimationState {
        self.animation.current()
    }

    pub fn resource(&self) -> &Arc<Resource> {
        &self.resource
    }

    /// Atlas cell showing right now
    pub fn current_cell(&self) -> UVec2 {
        self.resource
            .frames(self.facing())
            .cell(self.animation().index())
    }

    /// Change the speed multiplier, never going below zero
    pub fn adjust_speed(&mut self, delta: f64) {
        self.speed_multiplier = (self.speed_multiplier + delta).max(0.0);
        debug!("Speed multiplier now {:.1}", self.speed_multiplier);
    }
}
