//! The rain simulation: drops, clock and water level.
//!
//! [`RainSimulator`] is the single owner of simulation state. It is built
//! once at startup and advanced with [`RainSimulator::tick`]; renderers only
//! ever see it through a borrowed [`RainSnapshot`].

use glam::Vec2;
use rand::Rng;

use crate::config::RainConfig;
use crate::error::ConfigError;
use crate::drop::Raindrop;
use crate::time::SimulationClock;
use crate::wave::WaveSurface;

/// How a falling drop ends its fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminationMode {
    /// Drops fall into a rising body of water and recycle at its surface.
    #[default]
    Fill,
    /// Drops fall past the bottom edge of the screen.
    Simple,
}

/// Owns every drop plus the clock that drives the waterline.
#[derive(Debug, Clone)]
pub struct RainSimulator {
    drops: Vec<Raindrop>,
    clock: SimulationClock,
    mode: TerminationMode,
    wave: WaveSurface,
    drop_length: f32,
    fill_rate: f32,
}

impl RainSimulator {
    /// Create `config.drop_count` drops scattered over `screen`.
    ///
    /// The random source is only used here; ticking is deterministic.
    /// Fails if `config` does not pass [`RainConfig::validate`].
    pub fn new<R: Rng + ?Sized>(
        config: &RainConfig,
        screen: Vec2,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let drops = (0..config.drop_count)
            .map(|_| {
                Raindrop::spawn(
                    rng,
                    screen,
                    config.vertical_speed.clone(),
                    config.horizontal_speed,
                )
            })
            .collect();
        Self::from_drops(config, drops)
    }

    /// Create a simulator around an explicit set of drops.
    ///
    /// The fill rate still follows `config`, not `drops.len()`.
    pub fn from_drops(config: &RainConfig, drops: Vec<Raindrop>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            drops,
            clock: SimulationClock::new(config.clock_step),
            mode: config.mode,
            wave: WaveSurface::new(config.wave_amplitude, config.wave_frequency),
            drop_length: config.drop_length,
            fill_rate: config.fill_rate(),
        })
    }

    /// Advance one frame on a `width` x `height` screen.
    pub fn tick(&mut self, width: f32, height: f32) {
        let t = self.clock.advance();
        let fill_level = self.fill_level(height);

        for drop in &mut self.drops {
            drop.integrate();
            drop.wrap_horizontal(width, self.drop_length);

            let below = match fill_level {
                Some(base) => drop.position.y > self.wave.height(drop.position.x, t, base),
                None => drop.position.y - drop.half_extent(self.drop_length) > height,
            };
            if below {
                drop.recycle();
            }
        }
    }

    /// Baseline of the water surface, `None` when not filling.
    ///
    /// Starts at the bottom edge and rises by the fill rate per clock unit.
    pub fn fill_level(&self, height: f32) -> Option<f32> {
        match self.mode {
            TerminationMode::Fill => Some(height - self.clock.elapsed() * self.fill_rate),
            TerminationMode::Simple => None,
        }
    }

    /// Start a new fill cycle: the clock goes back to zero, draining the water.
    pub fn restart_fill_cycle(&mut self) {
        log::debug!(
            "Water reached the top after {} ticks, restarting fill cycle",
            self.clock.ticks()
        );
        self.clock.reset();
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self, height: f32) -> RainSnapshot<'_> {
        RainSnapshot {
            drops: &self.drops,
            time: self.clock.elapsed(),
            fill_level: self.fill_level(height),
            wave: self.wave,
        }
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn mode(&self) -> TerminationMode {
        self.mode
    }
}

/// Borrowed state handed to the renderer for one frame.
#[derive(Debug, Clone, Copy)]
pub struct RainSnapshot<'a> {
    pub drops: &'a [Raindrop],
    /// Clock value the drops were last updated with.
    pub time: f32,
    /// Water baseline, present in fill mode.
    pub fill_level: Option<f32>,
    pub wave: WaveSurface,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn simple() -> RainConfig {
        RainConfig::new().with_mode(TerminationMode::Simple)
    }

    fn single(config: &RainConfig, position: Vec2, velocity: Vec2) -> RainSimulator {
        RainSimulator::from_drops(config, vec![Raindrop::new(position, velocity)]).unwrap()
    }

    #[test]
    fn test_new_spawns_configured_count() {
        let mut rng = SmallRng::seed_from_u64(3);
        let config = RainConfig::new().with_drop_count(64);
        let sim = RainSimulator::new(&config, Vec2::new(800.0, 600.0), &mut rng).unwrap();
        assert_eq!(sim.drops().len(), 64);
        assert_eq!(sim.clock().elapsed(), 0.0);
    }

    #[test]
    fn test_same_seed_same_rain() {
        let config = RainConfig::new().with_drop_count(32);
        let screen = Vec2::new(800.0, 600.0);
        let a = RainSimulator::new(&config, screen, &mut SmallRng::seed_from_u64(9)).unwrap();
        let b = RainSimulator::new(&config, screen, &mut SmallRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.drops(), b.drops());
    }

    #[test]
    fn test_single_tick_moves_by_velocity() {
        let mut sim = single(&simple(), Vec2::ZERO, Vec2::new(1.0, 2.0));
        sim.tick(100.0, 100.0);
        assert_eq!(sim.drops()[0].position, Vec2::new(1.0, 2.0));
        assert!((sim.clock().elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_negative_drift_snaps_to_right_edge() {
        // half extent = (1 + 2) * 8 / 2 = 12
        let mut sim = single(&simple(), Vec2::new(-11.5, 0.0), Vec2::new(-1.0, 2.0));
        sim.tick(100.0, 100.0);
        assert_eq!(sim.drops()[0].position.x, 100.0);
    }

    #[test]
    fn test_simple_mode_recycles_below_screen() {
        // tail length 1 (vx = 0, vy = 1), half extent 4
        let mut sim = single(&simple(), Vec2::new(50.0, 199.0), Vec2::new(0.0, 1.0));
        sim.tick(100.0, 100.0);
        assert_eq!(sim.drops()[0].position.y, 0.0);
    }

    #[test]
    fn test_simple_mode_keeps_tail_on_screen() {
        let mut sim = single(&simple(), Vec2::new(50.0, 102.0), Vec2::new(0.0, 1.0));
        sim.tick(100.0, 100.0);
        // 103 - 4 = 99 is still on screen
        assert_eq!(sim.drops()[0].position.y, 103.0);
    }

    #[test]
    fn test_fill_level_rises_with_clock() {
        let config = RainConfig::new();
        let mut sim = RainSimulator::from_drops(&config, Vec::new()).unwrap();
        assert_eq!(sim.fill_level(600.0), Some(600.0));

        for _ in 0..100 {
            sim.tick(800.0, 600.0);
        }
        // 100 ticks * 0.1 * (500 * 0.001) = 5 px
        let level = sim.fill_level(600.0).unwrap();
        assert!((level - 595.0).abs() < 1e-3);
    }

    #[test]
    fn test_simple_mode_has_no_fill_level() {
        let sim = RainSimulator::from_drops(&simple(), Vec::new()).unwrap();
        assert_eq!(sim.fill_level(600.0), None);
    }

    #[test]
    fn test_fill_mode_recycles_under_surface() {
        let config = RainConfig::new();
        let mut sim = single(&config, Vec2::new(0.0, 590.0), Vec2::new(0.0, 20.0));
        sim.tick(800.0, 600.0);
        // lands at y = 610, surface is within 5 px of the 600 px baseline
        assert_eq!(sim.drops()[0].position.y, 0.0);
    }

    #[test]
    fn test_fill_mode_drop_above_surface_keeps_falling() {
        let config = RainConfig::new();
        let mut sim = single(&config, Vec2::new(0.0, 100.0), Vec2::new(0.0, 5.0));
        sim.tick(800.0, 600.0);
        assert_eq!(sim.drops()[0].position.y, 105.0);
    }

    #[test]
    fn test_restart_fill_cycle() {
        let config = RainConfig::new();
        let mut sim = RainSimulator::from_drops(&config, Vec::new()).unwrap();
        for _ in 0..10 {
            sim.tick(800.0, 600.0);
        }
        sim.restart_fill_cycle();
        assert_eq!(sim.clock().elapsed(), 0.0);
        assert_eq!(sim.fill_level(600.0), Some(600.0));
    }

    #[test]
    fn test_snapshot_matches_state() {
        let config = RainConfig::new();
        let mut sim = single(&config, Vec2::new(10.0, 10.0), Vec2::new(1.0, 1.0));
        sim.tick(800.0, 600.0);
        let snap = sim.snapshot(600.0);
        assert_eq!(snap.drops, sim.drops());
        assert_eq!(snap.time, sim.clock().elapsed());
        assert_eq!(snap.fill_level, sim.fill_level(600.0));
    }

    #[test]
    fn test_new_rejects_empty_speed_range() {
        let mut rng = SmallRng::seed_from_u64(1);
        let config = RainConfig::new().with_vertical_speed(4.0..4.0);
        let err = RainSimulator::new(&config, Vec2::new(800.0, 600.0), &mut rng).unwrap_err();
        assert_eq!(err, ConfigError::EmptySpeedRange { min: 4.0, max: 4.0 });
    }

    #[test]
    fn test_from_drops_rejects_zero_waterline_step() {
        let mut config = RainConfig::new();
        config.waterline_step = 0.0;
        let err = RainSimulator::from_drops(&config, Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive { field: "waterline_step", .. }));
    }
}
