//! Overlay configuration.
//!
//! Every knob has a sensible default, so `RainConfig::default()` reproduces
//! the classic look: 500 drops, a rising waterline, 30 frames per second.
//!
//! ```ignore
//! let config = RainConfig::new()
//!     .with_drop_count(1_000)
//!     .with_mode(TerminationMode::Simple)
//!     .with_seed(7);
//! rainfall::run(config)?;
//! ```

use std::ops::Range;
use std::time::Duration;

use crate::error::ConfigError;
use crate::render::Rgba;
use crate::simulation::TerminationMode;

/// Default number of drops.
pub const DROP_COUNT: usize = 500;
/// Scale factor from a drop's speed to its visible length.
pub const DROP_LENGTH: f32 = 8.0;
/// Scale factor for the drop's rounded cap.
pub const DROP_WIDTH: f32 = 1.25;
/// Default frames per second.
pub const FRAME_RATE: u32 = 30;
/// Clock advance per tick.
pub const CLOCK_STEP: f32 = 0.1;
/// Fill rate contributed by each drop, in pixels per clock unit.
pub const FILL_RATE_PER_DROP: f32 = 0.001;
/// Horizontal spacing of waterline samples, in pixels.
pub const WATERLINE_STEP: f32 = 10.0;

/// Configuration for the overlay, built with `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct RainConfig {
    pub drop_count: usize,
    pub drop_length: f32,
    pub drop_width: f32,
    pub frame_rate: u32,
    pub mode: TerminationMode,
    pub clock_step: f32,
    pub fill_rate_per_drop: f32,
    /// Range `vy` is drawn from when a drop is created.
    pub vertical_speed: Range<f32>,
    /// Constant `vx` shared by every drop.
    pub horizontal_speed: f32,
    pub wave_amplitude: f32,
    pub wave_frequency: f32,
    pub waterline_step: f32,
    pub drop_color: Rgba,
    pub water_color: Rgba,
    /// Fixed RNG seed. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl RainConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self {
            drop_count: DROP_COUNT,
            drop_length: DROP_LENGTH,
            drop_width: DROP_WIDTH,
            frame_rate: FRAME_RATE,
            mode: TerminationMode::Fill,
            clock_step: CLOCK_STEP,
            fill_rate_per_drop: FILL_RATE_PER_DROP,
            vertical_speed: 1.0..8.0,
            horizontal_speed: 1.0,
            wave_amplitude: 5.0,
            wave_frequency: 0.05,
            waterline_step: WATERLINE_STEP,
            drop_color: Rgba::RAIN,
            water_color: Rgba::RAIN,
            seed: None,
        }
    }

    /// Set the number of drops.
    pub fn with_drop_count(mut self, count: usize) -> Self {
        self.drop_count = count;
        self
    }

    /// Set how drops terminate: against the waterline or the screen bottom.
    pub fn with_mode(mut self, mode: TerminationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the target frame rate.
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_rate = fps;
        self
    }

    /// Set the drop length and width scale factors.
    pub fn with_drop_scale(mut self, length: f32, width: f32) -> Self {
        self.drop_length = length;
        self.drop_width = width;
        self
    }

    /// Set the range vertical speeds are drawn from.
    pub fn with_vertical_speed(mut self, range: Range<f32>) -> Self {
        self.vertical_speed = range;
        self
    }

    /// Set the horizontal drift shared by every drop.
    pub fn with_horizontal_speed(mut self, vx: f32) -> Self {
        self.horizontal_speed = vx;
        self
    }

    /// Set the waterline ripple amplitude and base frequency.
    pub fn with_wave(mut self, amplitude: f32, frequency: f32) -> Self {
        self.wave_amplitude = amplitude;
        self.wave_frequency = frequency;
        self
    }

    /// Set drop and water colors.
    pub fn with_colors(mut self, drop: Rgba, water: Rgba) -> Self {
        self.drop_color = drop;
        self.water_color = water;
        self
    }

    /// Use a fixed RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// How fast the water rises, in pixels per clock unit.
    ///
    /// Proportional to the drop count so denser rain fills faster.
    pub fn fill_rate(&self) -> f32 {
        self.drop_count as f32 * self.fill_rate_per_drop
    }

    /// Wall-clock time budget for one frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Reject values that would make the per-tick math ill-defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (start, end) = (self.vertical_speed.start, self.vertical_speed.end);
        if !(start.is_finite() && end.is_finite() && start < end) {
            return Err(ConfigError::EmptySpeedRange { min: start, max: end });
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        for (field, value) in [
            ("clock_step", self.clock_step),
            ("waterline_step", self.waterline_step),
            ("drop_length", self.drop_length),
            ("drop_width", self.drop_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("horizontal_speed", self.horizontal_speed),
            ("fill_rate_per_drop", self.fill_rate_per_drop),
            ("wave_amplitude", self.wave_amplitude),
            ("wave_frequency", self.wave_frequency),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        Ok(())
    }
}

impl Default for RainConfig {
    fn default() -> Self {
        Self::new()
    }
}
