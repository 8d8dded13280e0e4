//! Frame construction.
//!
//! [`FrameRenderer`] turns a [`RainSnapshot`] into a [`Frame`]: an ordered
//! list of draw operations that any backend can replay. The GPU backend in
//! `gpu` tessellates it; tests just inspect it.

use crate::config::RainConfig;
use crate::geometry::{DropSilhouette, WaterBody};
use crate::simulation::RainSnapshot;

/// Straight (not premultiplied) RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Translucent light blue used for drops and water.
    pub const RAIN: Self = Self::new(0.4, 0.8, 1.0, 0.5);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color with RGB scaled by alpha, as expected by premultiplied blending.
    pub fn premultiplied(self) -> [f32; 4] {
        [self.r * self.a, self.g * self.a, self.b * self.a, self.a]
    }
}

/// One drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Replace every pixel with this color (source operator, no blending).
    Clear(Rgba),
    /// Fill one teardrop, blended over what is already there.
    FillDrop { shape: DropSilhouette, color: Rgba },
    /// Fill the water body, blended over what is already there.
    FillWater { body: WaterBody, color: Rgba },
}

/// Everything to draw for one frame, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    ops: Vec<DrawOp>,
}

impl Frame {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// The water body, if this frame has one.
    pub fn water(&self) -> Option<&WaterBody> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::FillWater { body, .. } => Some(body),
            _ => None,
        })
    }

    /// Whether the water surface touched the top of the screen this frame.
    pub fn water_reached_top(&self) -> bool {
        self.water().is_some_and(WaterBody::reached_top)
    }

    pub fn drop_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillDrop { .. }))
            .count()
    }
}

/// Builds frames from simulation snapshots. Holds only styling.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRenderer {
    drop_length: f32,
    drop_width: f32,
    waterline_step: f32,
    drop_color: Rgba,
    water_color: Rgba,
}

impl FrameRenderer {
    pub fn new(config: &RainConfig) -> Self {
        Self {
            drop_length: config.drop_length,
            drop_width: config.drop_width,
            waterline_step: config.waterline_step,
            drop_color: config.drop_color,
            water_color: config.water_color,
        }
    }

    /// Clear, one teardrop per drop, then the water if the snapshot has a
    /// fill level.
    pub fn draw(&self, snapshot: &RainSnapshot<'_>, width: f32, height: f32) -> Frame {
        let water = usize::from(snapshot.fill_level.is_some());
        let mut ops = Vec::with_capacity(1 + snapshot.drops.len() + water);

        ops.push(DrawOp::Clear(Rgba::TRANSPARENT));
        ops.extend(snapshot.drops.iter().map(|drop| DrawOp::FillDrop {
            shape: DropSilhouette::new(drop, self.drop_length, self.drop_width),
            color: self.drop_color,
        }));

        if let Some(base) = snapshot.fill_level {
            let surface = snapshot
                .wave
                .sample(width, self.waterline_step, snapshot.time, base);
            ops.push(DrawOp::FillWater {
                body: WaterBody::new(surface, width, height),
                color: self.water_color,
            });
        }

        Frame { ops }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drop::Raindrop;
    use crate::simulation::TerminationMode;
    use crate::wave::WaveSurface;
    use glam::Vec2;

    fn snapshot(drops: &[Raindrop], fill_level: Option<f32>) -> RainSnapshot<'_> {
        RainSnapshot {
            drops,
            time: 1.5,
            fill_level,
            wave: WaveSurface::default(),
        }
    }

    #[test]
    fn test_no_drops_simple_is_just_clear() {
        let renderer = FrameRenderer::new(&RainConfig::new().with_mode(TerminationMode::Simple));
        let frame = renderer.draw(&snapshot(&[], None), 800.0, 600.0);
        assert_eq!(frame.ops(), &[DrawOp::Clear(Rgba::TRANSPARENT)]);
        assert!(frame.water().is_none());
        assert!(!frame.water_reached_top());
    }

    #[test]
    fn test_no_drops_fill_is_clear_and_water() {
        let renderer = FrameRenderer::new(&RainConfig::new());
        let frame = renderer.draw(&snapshot(&[], Some(500.0)), 800.0, 600.0);
        assert_eq!(frame.ops().len(), 2);
        assert_eq!(frame.ops()[0], DrawOp::Clear(Rgba::TRANSPARENT));
        assert!(matches!(frame.ops()[1], DrawOp::FillWater { .. }));
        assert_eq!(frame.drop_count(), 0);
    }

    #[test]
    fn test_one_op_per_drop_in_order() {
        let drops = [
            Raindrop::new(Vec2::new(1.0, 2.0), Vec2::new(1.0, 2.0)),
            Raindrop::new(Vec2::new(3.0, 4.0), Vec2::new(1.0, 7.0)),
        ];
        let renderer = FrameRenderer::new(&RainConfig::new());
        let frame = renderer.draw(&snapshot(&drops, Some(500.0)), 800.0, 600.0);

        assert_eq!(frame.drop_count(), 2);
        match &frame.ops()[2] {
            DrawOp::FillDrop { shape, color } => {
                assert_eq!(shape.origin, Vec2::new(3.0, 4.0));
                assert_eq!(*color, Rgba::RAIN);
            }
            other => panic!("expected a drop, got {:?}", other),
        }
        assert!(matches!(frame.ops().last(), Some(DrawOp::FillWater { .. })));
    }

    #[test]
    fn test_water_uses_snapshot_wave() {
        let renderer = FrameRenderer::new(&RainConfig::new());
        let snap = snapshot(&[], Some(420.0));
        let frame = renderer.draw(&snap, 200.0, 600.0);

        let body = frame.water().expect("fill mode draws water");
        assert_eq!(body.corner, Vec2::new(200.0, 600.0));
        for p in body.surface.points() {
            assert_eq!(p.y, snap.wave.height(p.x, snap.time, 420.0));
        }
    }

    #[test]
    fn test_water_reaching_top_is_reported() {
        let renderer = FrameRenderer::new(&RainConfig::new());
        let frame = renderer.draw(&snapshot(&[], Some(-1.0)), 200.0, 600.0);
        assert!(frame.water_reached_top());
    }

    #[test]
    fn test_premultiplied() {
        assert_eq!(Rgba::RAIN.premultiplied(), [0.2, 0.4, 0.5, 0.5]);
        assert_eq!(Rgba::TRANSPARENT.premultiplied(), [0.0; 4]);
    }
}
