//! Frame timing for the driver loop.
//!
//! The simulation advances in whole ticks and knows nothing about seconds.
//! [`Time`] lets a driver decide how many ticks each displayed frame gets:
//! by default exactly one (ticks follow the display refresh), or, with a
//! fixed tick rate, however many fit in the elapsed time so the field moves
//! at the same speed on a 60 Hz and a 144 Hz monitor.
//!
//! # Example
//!
//! ```ignore
//! use particle_field::time::Time;
//!
//! let mut time = Time::new().with_tick_rate(Some(60.0));
//!
//! // In your frame callback:
//! time.update();
//! for _ in 0..time.ticks_due() {
//!     field.advance();
//! }
//! ```

use std::time::{Duration, Instant};

/// Most ticks a single frame may catch up on after a stall.
const MAX_CATCH_UP_TICKS: u32 = 4;

/// Time tracking for the frame loop.
#[derive(Debug)]
pub struct Time {
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
    /// Whether time is paused.
    paused: bool,
    /// Fixed simulation rate in ticks per second; `None` ticks once per frame.
    tick_rate: Option<f32>,
    /// Unconsumed time toward the next fixed tick.
    accumulator: f32,
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            tick_rate: None,
            accumulator: 0.0,
        }
    }

    /// Run the simulation at a fixed number of ticks per second.
    ///
    /// Non-positive rates fall back to one tick per frame.
    pub fn with_tick_rate(mut self, rate: Option<f32>) -> Self {
        self.tick_rate = rate.filter(|r| r.is_finite() && *r > 0.0);
        self
    }

    /// Update timing values. Call once per frame.
    pub fn update(&mut self) {
        if self.paused {
            return;
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if self.tick_rate.is_some() {
            self.accumulator += delta;
        }
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }
    }

    /// How many simulation ticks the current frame should run.
    ///
    /// Consumes the accumulated time in fixed-rate mode.
    pub fn ticks_due(&mut self) -> u32 {
        if self.paused {
            return 0;
        }
        let Some(rate) = self.tick_rate else {
            return 1;
        };

        let step = 1.0 / rate;
        let due = (self.accumulator / step).floor() as u32;
        if due > MAX_CATCH_UP_TICKS {
            // Drop the backlog rather than spiral after a long stall.
            self.accumulator = 0.0;
            return MAX_CATCH_UP_TICKS;
        }
        self.accumulator -= due as f32 * step;
        due
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

    /// Whether time is currently paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tick_rate(&self) -> Option<f32> {
        self.tick_rate
    }

    /// Pause time progression.
    ///
    /// While paused the frame count stops and no ticks are due.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume time progression after pausing.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.accumulator = 0.0;
            self.paused = false;
        }
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
        assert_eq!(time.tick_rate(), None);
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        time.update();
        time.update();
        assert_eq!(time.frame(), 2);
    }

    #[test]
    fn test_time_pause() {
        let mut time = Time::new();
        time.update();

        time.pause();
        assert!(time.is_paused());

        thread::sleep(Duration::from_millis(10));
        time.update();

        assert_eq!(time.frame(), 1);
        assert_eq!(time.ticks_due(), 0);

        time.toggle_pause();
        assert!(!time.is_paused());
    }

    #[test]
    fn test_one_tick_per_frame_by_default() {
        let mut time = Time::new();
        time.update();
        assert_eq!(time.ticks_due(), 1);
        assert_eq!(time.ticks_due(), 1);
    }

    #[test]
    fn test_per_frame_mode_keeps_no_backlog() {
        let mut time = Time::new();
        for _ in 0..3 {
            thread::sleep(Duration::from_millis(5));
            time.update();
            assert_eq!(time.ticks_due(), 1);
        }
        assert_eq!(time.accumulator, 0.0);
    }

    #[test]
    fn test_fixed_rate_update_fills_backlog() {
        let mut time = Time::new().with_tick_rate(Some(1000.0));
        thread::sleep(Duration::from_millis(5));
        time.update();
        assert!(time.accumulator > 0.0);
    }

    #[test]
    fn test_fixed_rate_accumulates() {
        let mut time = Time::new().with_tick_rate(Some(100.0));
        time.accumulator = 0.035;
        assert_eq!(time.ticks_due(), 3);
        assert!((time.accumulator - 0.005).abs() < 1e-4);
        assert_eq!(time.ticks_due(), 0);
    }

    #[test]
    fn test_fixed_rate_caps_catch_up() {
        let mut time = Time::new().with_tick_rate(Some(60.0));
        time.accumulator = 2.0;
        assert_eq!(time.ticks_due(), MAX_CATCH_UP_TICKS);
        assert_eq!(time.accumulator, 0.0);
    }

    #[test]
    fn test_invalid_tick_rate_ignored() {
        assert_eq!(Time::new().with_tick_rate(Some(0.0)).tick_rate(), None);
        assert_eq!(Time::new().with_tick_rate(Some(f32::NAN)).tick_rate(), None);
    }
}
