/// Fixed-tick game loop timing
///
/// The game advances in whole ticks at a fixed rate (60 per second by default)
/// and movement is integrated per tick, not per second. Rendering happens once
/// per frame, however many ticks that frame produced.
use std::time::{Duration, Instant};

/// Default tick rate (updates per second)
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Maximum number of ticks run in a single frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Game loop timing state
#[derive(Debug)]
pub struct GameLoop {
    /// Duration of one fixed tick
    tick_duration: Duration,

    /// Real time not yet consumed by ticks
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Recent frame durations for FPS calculation
    frame_times: Vec<Duration>,

    /// Frames begun so far
    frame_count: u64,

    /// Ticks handed out so far
    tick_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f64,
}

impl GameLoop {
    /// Create a game loop running `tick_rate` ticks per second
    pub fn new(tick_rate: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            tick_duration: Duration::from_secs(1) / tick_rate,
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the number of fixed ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulate(frame_time)
    }

    /// Add `elapsed` to the accumulator and drain it into whole ticks
    fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.tick_duration && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= self.tick_duration;
            ticks += 1;
        }

        // Drop the backlog instead of replaying it over the next frames
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = self.accumulator.min(self.tick_duration);
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Get current FPS
    pub fn fps(&self) -> f64 {
        self.current_fps
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks handed out
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f64() > 0.0 {
            1.0 / avg_frame_time.as_secs_f64()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}
