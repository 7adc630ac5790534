//! Frame timing.
//!
//! [`Time`] measures wall-clock deltas between frames and caps them, so a
//! stall (window drag, breakpoint, tab switch) never feeds the update kernel
//! a huge step.
//!
//! # Example
//!
//! ```ignore
//! use pointstorm::time::Time;
//!
//! let mut time = Time::new();
//!
//! // Once per frame:
//! let dt = time.update();
//! assert!(dt <= 0.03);
//! ```

use std::time::{Duration, Instant};

/// Largest delta a single frame may report.
pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(30);

/// Time tracking for the frame loop.
#[derive(Debug)]
pub struct Time {
    /// When the timer was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame in seconds, after clamping.
    delta_secs: f32,
    /// Upper bound on `delta_secs`.
    max_delta: Duration,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a tracker whose first frame is measured from `now`.
    pub fn starting_at(now: Instant) -> Self {
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            max_delta: DEFAULT_MAX_DELTA,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_secs(1),
            paused: false,
        }
    }

    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns the clamped delta time in seconds.
    pub fn update(&mut self) -> f32 {
        self.update_at(Instant::now())
    }

    /// [`Time::update`] against an explicit clock reading.
    pub fn update_at(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        self.delta_secs = if self.paused {
            0.0
        } else {
            raw.min(self.max_delta).as_secs_f32()
        };

        let fps_elapsed = now.saturating_duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Time since last frame in seconds (delta time).
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    #[inline]
    pub fn max_delta(&self) -> Duration {
        self.max_delta
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the FPS estimate was refreshed by the last update.
    #[inline]
    pub fn fps_updated(&self) -> bool {
        self.fps_update_time == self.last_frame && self.frame_count > 0
    }

    /// Wall time since the tracker was created.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.last_frame.saturating_duration_since(self.start)
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Toggle pause state. While paused, `delta()` is 0.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
