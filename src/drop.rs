//! Per-drop kinematic state.

use std::ops::Range;

use glam::Vec2;
use rand::Rng;

/// One simulated raindrop.
///
/// Velocity is fixed when the drop is created; only the position changes
/// afterwards. Drops are never destroyed, they are recycled in place when
/// they leave the screen or hit the water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    /// Screen-space position in pixels.
    pub position: Vec2,
    /// Displacement per tick in pixels.
    pub velocity: Vec2,
}

impl Raindrop {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Create a drop at a uniformly random spot on the screen.
    ///
    /// `vy` is drawn from `vertical_speed`, `vx` is the shared drift.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        screen: Vec2,
        vertical_speed: Range<f32>,
        horizontal_speed: f32,
    ) -> Self {
        let x = if screen.x > 0.0 { rng.gen_range(0.0..screen.x) } else { 0.0 };
        let y = if screen.y > 0.0 { rng.gen_range(0.0..screen.y) } else { 0.0 };
        let vy = rng.gen_range(vertical_speed);
        Self::new(Vec2::new(x, y), Vec2::new(horizontal_speed, vy))
    }

    /// `|vx| + |vy|`, the speed measure that sizes the drop's tail.
    #[inline]
    pub fn tail_length(&self) -> f32 {
        self.velocity.x.abs() + self.velocity.y.abs()
    }

    /// Half of the drop's visible length for the given length scale.
    #[inline]
    pub fn half_extent(&self, drop_length: f32) -> f32 {
        self.tail_length() * drop_length / 2.0
    }

    /// Explicit Euler step of one frame.
    #[inline]
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    /// Wrap horizontally once the whole visible extent has left the screen.
    ///
    /// Returns `true` if the drop wrapped.
    pub fn wrap_horizontal(&mut self, width: f32, drop_length: f32) -> bool {
        let half = self.half_extent(drop_length);
        if self.position.x + half < 0.0 {
            self.position.x = width;
            true
        } else if self.position.x - half > width {
            self.position.x = 0.0;
            true
        } else {
            false
        }
    }

    /// Send the drop back to the top of the screen.
    #[inline]
    pub fn recycle(&mut self) {
        self.position.y = 0.0;
    }
}
