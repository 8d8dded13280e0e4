//! The per-frame entry point.
//!
//! [`RainScene`] ties the simulator to the frame renderer and owns the one
//! piece of coupling between them: when the drawn waterline reaches the top of
//! the screen, the fill cycle restarts before the next tick.

use glam::Vec2;
use rand::Rng;

use crate::config::RainConfig;
use crate::error::ConfigError;
use crate::render::{Frame, FrameRenderer};
use crate::simulation::RainSimulator;

/// Simulation plus frame building, advanced once per frame.
#[derive(Debug, Clone)]
pub struct RainScene {
    simulator: RainSimulator,
    renderer: FrameRenderer,
}

impl RainScene {
    /// Scatter drops over a `screen`-sized area.
    ///
    /// Fails if `config` does not pass [`RainConfig::validate`].
    pub fn new<R: Rng + ?Sized>(
        config: &RainConfig,
        screen: Vec2,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let simulator = RainSimulator::new(config, screen, rng)?;
        Ok(Self::from_parts(simulator, FrameRenderer::new(config)))
    }

    pub fn from_parts(simulator: RainSimulator, renderer: FrameRenderer) -> Self {
        Self {
            simulator,
            renderer,
        }
    }

    /// Tick the simulation and build this frame's draw list.
    ///
    /// The step is fixed, so no elapsed time is taken. If the water reached
    /// the top while building the frame, the clock is reset here and the
    /// next call starts a fresh fill cycle.
    pub fn on_frame(&mut self, viewport: Vec2) -> Frame {
        self.simulator.tick(viewport.x, viewport.y);

        let frame = self
            .renderer
            .draw(&self.simulator.snapshot(viewport.y), viewport.x, viewport.y);

        if frame.water_reached_top() {
            self.simulator.restart_fill_cycle();
        }
        frame
    }

    pub fn simulator(&self) -> &RainSimulator {
        &self.simulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drop::Raindrop;
    use crate::render::DrawOp;
    use crate::simulation::TerminationMode;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_on_frame_ticks_once() {
        let config = RainConfig::new().with_drop_count(10);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut scene = RainScene::new(&config, Vec2::new(320.0, 240.0), &mut rng).unwrap();

        let frame = scene.on_frame(Vec2::new(320.0, 240.0));
        assert_eq!(scene.simulator().clock().ticks(), 1);
        assert_eq!(frame.drop_count(), 10);
        assert!(frame.water().is_some());
    }

    #[test]
    fn test_empty_simple_scene_only_clears() {
        let config = RainConfig::new()
            .with_drop_count(0)
            .with_mode(TerminationMode::Simple);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut scene = RainScene::new(&config, Vec2::new(320.0, 240.0), &mut rng).unwrap();

        let frame = scene.on_frame(Vec2::new(320.0, 240.0));
        assert_eq!(frame.ops().len(), 1);
        assert!(matches!(frame.ops()[0], DrawOp::Clear(_)));
    }

    #[test]
    fn test_fill_cycle_restarts_when_water_reaches_top() {
        // A short screen fills quickly: 40 px at 0.5 px per clock unit.
        let config = RainConfig::new();
        let simulator = RainSimulator::from_drops(&config, Vec::new()).unwrap();
        let mut scene = RainScene::from_parts(simulator, FrameRenderer::new(&config));
        let viewport = Vec2::new(200.0, 40.0);

        let mut restarted = false;
        for _ in 0..2_000 {
            let before = scene.simulator().clock().elapsed();
            let frame = scene.on_frame(viewport);
            if frame.water_reached_top() {
                let body = frame.water().unwrap();
                assert!(body.surface.min_height() <= 0.0);
                assert_eq!(scene.simulator().clock().elapsed(), 0.0);
                assert!(before > 0.0);
                restarted = true;
                break;
            }
        }
        assert!(restarted, "water never reached the top");

        // Next tick starts from zero.
        scene.on_frame(viewport);
        assert!((scene.simulator().clock().elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_recycle_agrees_with_drawn_waterline() {
        // No drop may be left below the surface drawn on the same frame.
        let config = RainConfig::new();
        let drops = vec![Raindrop::new(Vec2::new(50.0, 0.0), Vec2::new(0.0, 1.0))];
        let simulator = RainSimulator::from_drops(&config, drops).unwrap();
        let mut scene = RainScene::from_parts(simulator, FrameRenderer::new(&config));
        let viewport = Vec2::new(100.0, 100.0);

        for _ in 0..500 {
            let frame = scene.on_frame(viewport);
            let drop = scene.simulator().drops()[0];
            let body = frame.water().unwrap();
            let snap = scene.simulator().snapshot(viewport.y);
            if frame.water_reached_top() {
                break;
            }
            let surface = snap
                .wave
                .height(drop.position.x, snap.time, snap.fill_level.unwrap());
            assert!(
                drop.position.y <= surface,
                "drop at {} left under surface {}",
                drop.position.y,
                surface
            );
            assert!(!body.surface.points().is_empty());
        }
    }

    #[test]
    fn test_new_rejects_empty_speed_range() {
        let config = RainConfig::new().with_vertical_speed(4.0..4.0);
        let mut rng = SmallRng::seed_from_u64(5);
        let result = RainScene::new(&config, Vec2::new(320.0, 240.0), &mut rng);
        assert!(matches!(result, Err(ConfigError::EmptySpeedRange { .. })));
    }

    #[test]
    fn test_new_rejects_zero_waterline_step() {
        let mut config = RainConfig::new();
        config.waterline_step = 0.0;
        let mut rng = SmallRng::seed_from_u64(5);
        let result = RainScene::new(&config, Vec2::new(320.0, 240.0), &mut rng);
        assert!(matches!(
            result,
            Err(ConfigError::NotPositive { field: "waterline_step", .. })
        ));
    }
}
