//! Time facilities for the overlay.
//!
//! Two clocks with different jobs:
//!
//! - [`SimulationClock`] is the simulation's notion of time. It advances by a
//!   fixed step per tick and never looks at the wall clock, so a run is fully
//!   reproducible given a seed.
//! - [`FrameTimer`] measures how fast frames are actually presented. It only
//!   feeds logging.

use std::time::{Duration, Instant};

/// Deterministic fixed-step clock.
///
/// Drives the wave phase and the fill level. Resetting it restarts the fill
/// cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    elapsed: f32,
    step: f32,
    ticks: u64,
}

impl SimulationClock {
    /// Create a clock at zero that advances by `step` per tick.
    pub fn new(step: f32) -> Self {
        Self {
            elapsed: 0.0,
            step,
            ticks: 0,
        }
    }

    /// Advance by one step and return the new elapsed value.
    pub fn advance(&mut self) -> f32 {
        self.elapsed += self.step;
        self.ticks += 1;
        self.elapsed
    }

    /// Total elapsed simulation time since the last reset.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Ticks since the last reset.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Fixed increment applied per tick.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Return to zero.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.ticks = 0;
    }
}

/// Wall-clock frame rate measurement.
///
/// Call [`FrameTimer::update`] once per presented frame; the measured rate is
/// refreshed every `update_interval`.
#[derive(Debug)]
pub struct FrameTimer {
    last_frame: Instant,
    delta: Duration,
    frame_count: u64,
    fps: f32,
    // Window the current rate is averaged over.
    window_start_frame: u64,
    window_start: Instant,
    update_interval: Duration,
}

impl FrameTimer {
    /// Create a timer starting from now that refreshes its rate every second.
    pub fn new() -> Self {
        Self::starting_at(Instant::now(), Duration::from_secs(1))
    }

    /// Create a timer with an explicit start instant and refresh interval.
    pub fn starting_at(now: Instant, update_interval: Duration) -> Self {
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            frame_count: 0,
            fps: 0.0,
            window_start_frame: 0,
            window_start: now,
            update_interval,
        }
    }

    /// Record a frame presented at `now`.
    ///
    /// Returns the freshly measured rate when the refresh interval elapsed.
    pub fn update(&mut self, now: Instant) -> Option<f32> {
        self.delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_count += 1;

        let window = now.saturating_duration_since(self.window_start);
        if window < self.update_interval {
            return None;
        }
        let frames = self.frame_count - self.window_start_frame;
        self.fps = frames as f32 / window.as_secs_f32();
        self.window_start_frame = self.frame_count;
        self.window_start = now;
        Some(self.fps)
    }

    /// Time between the two most recent frames.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Total frames recorded.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Last measured frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_new() {
        let clock = SimulationClock::new(0.1);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.ticks(), 0);
        assert_eq!(clock.step(), 0.1);
    }

    #[test]
    fn test_clock_advance_is_fixed_step() {
        let mut clock = SimulationClock::new(0.25);
        assert_eq!(clock.advance(), 0.25);
        assert_eq!(clock.advance(), 0.5);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_clock_reset() {
        let mut clock = SimulationClock::new(0.1);
        for _ in 0..10 {
            clock.advance();
        }
        clock.reset();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.ticks(), 0);
        assert!((clock.advance() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_frame_timer_counts_frames() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(start, Duration::from_secs(1));

        assert_eq!(timer.update(start + Duration::from_millis(33)), None);
        assert_eq!(timer.frame(), 1);
        assert_eq!(timer.delta(), Duration::from_millis(33));
    }

    #[test]
    fn test_frame_timer_reports_rate() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(start, Duration::from_secs(1));

        let mut reported = None;
        for i in 1..=30u64 {
            if let Some(fps) = timer.update(start + Duration::from_millis(i * 1000 / 30 + 1)) {
                reported = Some(fps);
            }
        }
        let fps = reported.expect("rate should refresh after one second");
        assert!((fps - 30.0).abs() < 1.0);
        assert_eq!(timer.fps(), fps);
    }
}
