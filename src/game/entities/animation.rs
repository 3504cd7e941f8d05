// Directional frame animation
//
// Every entity keeps one animation state per facing direction. Only the state
// for the current facing advances; the others hold whatever frame they were on
// until they become current again, at which point they restart from frame 0.

use super::direction::FacingDirection;
use super::resource::Resource;
use crate::core::math::Vec2;
use crate::engine::clock::Clock;
use log::debug;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

/// How long each frame is shown while walking
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(200);

/// Frame index and timer for one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationState {
    frame_count: NonZeroUsize,
    index: usize,
    frame_start: Instant,
    frame_duration: Duration,
}

impl AnimationState {
    /// Create a state at frame 0
    pub fn new(frame_count: NonZeroUsize, frame_duration: Duration, now: Instant) -> Self {
        Self {
            frame_count,
            index: 0,
            frame_start: now,
            frame_duration,
        }
    }

    /// Current frame, always below `frame_count`
    pub fn index(&self) -> usize {
        self.index
    }

    /// Go back to frame 0 and start its timer at `now`
    pub fn restart(&mut self, now: Instant) {
        self.index = 0;
        self.frame_start = now;
    }

    /// Show the idle pose without touching the timer
    pub fn rest(&mut self) {
        self.index = 0;
    }

    /// Step to the next frame if the current one has been shown long enough
    ///
    /// Advances at most once per call, no matter how much time has passed.
    /// Returns whether a step happened.
    pub fn advance_if_due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.frame_start) < self.frame_duration {
            return false;
        }

        self.index = (self.index + 1) % self.frame_count.get();
        self.frame_start = now;
        true
    }
}

/// Per-direction animation states plus the current facing
#[derive(Debug, Clone)]
pub struct DirectionalAnimator {
    states: [AnimationState; 4],
    facing: FacingDirection,
}

impl DirectionalAnimator {
    /// Build one state per direction from the resource's frame sequences
    ///
    /// Starts facing South.
    pub fn new(resource: &Resource, frame_duration: Duration, now: Instant) -> Self {
        let states = FacingDirection::ALL.map(|direction| {
            AnimationState::new(resource.frame_count(direction), frame_duration, now)
        });

        Self {
            states,
            facing: FacingDirection::default(),
        }
    }

    pub fn facing(&self) -> FacingDirection {
        self.facing
    }

    /// State for a given direction
    pub fn state(&self, direction: FacingDirection) -> &AnimationState {
        &self.states[direction.index()]
    }

    /// State for the current facing
    pub fn current(&self) -> &AnimationState {
        self.state(self.facing)
    }

    /// Run one tick of the state machine for the given velocity
    pub fn update(&mut self, velocity: Vec2, clock: &dyn Clock) {
        let desired = FacingDirection::from_velocity(velocity, self.facing);
        if desired != self.facing {
            debug!("Facing changed from {:?} to {:?}", self.facing, desired);
            self.states[desired.index()].restart(clock.now());
            self.facing = desired;
        }

        let state = &mut self.states[self.facing.index()];
        if velocity.length() > 0.0 {
            state.advance_if_due(clock.now());
        } else {
            state.rest();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::SpriteGrid;
    use crate::engine::clock::ManualClock;
    use crate::engine::renderer::TextureHandle;
    use crate::game::entities::resource::FrameSequence;
    use glam::UVec2;

    const TICK: Duration = Duration::from_millis(250);

    fn two_frames(column: u32) -> FrameSequence {
        FrameSequence::new(vec![UVec2::new(column, 0), UVec2::new(column, 1)])
            .expect("non-empty sequence")
    }

    fn knight_like() -> Resource {
        Resource::new(
            TextureHandle(0),
            SpriteGrid::new(16, 16),
            [two_frames(1), two_frames(0), two_frames(3), two_frames(2)],
        )
        .expect("valid resource")
    }

    fn animator(clock: &ManualClock) -> DirectionalAnimator {
        DirectionalAnimator::new(&knight_like(), DEFAULT_FRAME_DURATION, clock.now())
    }

    const NORTH: Vec2 = Vec2::new(0.0, -1.0);

    #[test]
    fn test_starts_facing_south_at_frame_zero() {
        let clock = ManualClock::new();
        let animator = animator(&clock);

        assert_eq!(animator.facing(), FacingDirection::South);
        for direction in FacingDirection::ALL {
            assert_eq!(animator.state(direction).index(), 0);
            assert_eq!(animator.state(direction).frame_start, clock.now());
        }
    }

    #[test]
    fn test_walking_north_over_three_ticks() {
        let clock = ManualClock::new();
        let mut animator = animator(&clock);
        let mut indices = Vec::new();

        for _ in 0..3 {
            clock.advance(TICK);
            animator.update(NORTH, &clock);
            indices.push(animator.current().index());
        }

        assert_eq!(animator.facing(), FacingDirection::North);
        assert_eq!(indices, vec![0, 1, 0]);
    }

    #[test]
    fn test_turn_resets_new_direction() {
        let clock = ManualClock::new();
        let mut animator = animator(&clock);

        clock.advance(TICK);
        animator.update(Vec2::new(1.0, 0.0), &clock);

        let east = animator.state(FacingDirection::East);
        assert_eq!(animator.facing(), FacingDirection::East);
        assert_eq!(east.index(), 0);
        assert_eq!(east.frame_start, clock.now());
    }

    #[test]
    fn test_previous_direction_is_preserved() {
        let clock = ManualClock::new();
        let mut animator = animator(&clock);

        // Walk south until frame 1 shows
        clock.advance(TICK);
        animator.update(Vec2::new(0.0, 1.0), &clock);
        assert_eq!(animator.current().index(), 1);
        let south_before = *animator.state(FacingDirection::South);

        clock.advance(TICK);
        animator.update(Vec2::new(-1.0, 0.0), &clock);

        assert_eq!(animator.facing(), FacingDirection::West);
        assert_eq!(*animator.state(FacingDirection::South), south_before);
    }

    #[test]
    fn test_no_advance_before_duration() {
        let clock = ManualClock::new();
        let mut animator = animator(&clock);

        animator.update(NORTH, &clock);
        for _ in 0..5 {
            clock.advance(Duration::from_millis(30));
            animator.update(NORTH, &clock);
            assert_eq!(animator.current().index(), 0);
        }
    }

    #[test]
    fn test_advance_at_exact_duration() {
        let clock = ManualClock::new();
        let mut animator = animator(&clock);

        animator.update(NORTH, &clock);
        clock.advance(DEFAULT_FRAME_DURATION);
        animator.update(NORTH, &clock);

        assert_eq!(animator.current().index(), 1);
        assert_eq!(animator.current().frame_start, clock.now());
    }

    #[test]
    fn test_single_advance_after_long_gap() {
        let clock = ManualClock::new();
        let mut animator = animator(&clock);

        animator.update(NORTH, &clock);
        clock.advance(DEFAULT_FRAME_DURATION * 7);
        animator.update(NORTH, &clock);
        assert_eq!(animator.current().index(), 1);

        // Timer restarted, so an immediate second update does nothing
        animator.update(NORTH, &clock);
        assert_eq!(animator.current().index(), 1);
    }

    #[test]
    fn test_index_wraps() {
        let clock = ManualClock::new();
        let mut animator = animator(&clock);
        animator.update(NORTH, &clock);

        for expected in [1, 0, 1, 0] {
            clock.advance(DEFAULT_FRAME_DURATION);
            animator.update(NORTH, &clock);
            assert_eq!(animator.current().index(), expected);
        }
    }

    #[test]
    fn test_idle_forces_frame_zero_but_keeps_timer() {
        let clock = ManualClock::new();
        let mut animator = animator(&clock);

        clock.advance(TICK);
        animator.update(Vec2::new(0.0, 1.0), &clock);
        assert_eq!(animator.current().index(), 1);
        let started = animator.current().frame_start;

        clock.advance(TICK);
        animator.update(Vec2::ZERO, &clock);

        assert_eq!(animator.facing(), FacingDirection::South);
        assert_eq!(animator.current().index(), 0);
        assert_eq!(animator.current().frame_start, started);
    }

    #[test]
    fn test_diagonal_prefers_vertical() {
        let clock = ManualClock::new();
        let mut animator = animator(&clock);

        animator.update(Vec2::new(1.0, -1.0), &clock);
        assert_eq!(animator.facing(), FacingDirection::North);
    }

    #[test]
    fn test_state_advance_if_due() {
        let start = Instant::now();
        let mut state = AnimationState::new(
            NonZeroUsize::new(3).expect("non-zero"),
            Duration::from_millis(100),
            start,
        );

        assert!(!state.advance_if_due(start + Duration::from_millis(99)));
        assert!(state.advance_if_due(start + Duration::from_millis(100)));
        assert_eq!(state.index(), 1);

        state.rest();
        assert_eq!(state.index(), 0);
        assert_eq!(state.frame_start, start + Duration::from_millis(100));
    }

    #[test]
    fn test_single_frame_sequence_stays_at_zero() {
        let start = Instant::now();
        let mut state = AnimationState::new(NonZeroUsize::MIN, Duration::from_millis(10), start);

        assert!(state.advance_if_due(start + Duration::from_millis(10)));
        assert_eq!(state.index(), 0);
    }
}
