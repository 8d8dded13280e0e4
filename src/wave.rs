//! The animated water surface.
//!
//! The surface is a product of two traveling sinusoids, which gives a ripple
//! that drifts sideways and slowly changes shape:
//!
//! ```text
//! height(x, t, base) = base + A * sin(x * f + t) * cos(-x * f / 2 + t)
//! ```
//!
//! Screen y grows downwards, so a smaller height is higher on screen.

use glam::Vec2;

/// Parameters of the ripple function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSurface {
    pub amplitude: f32,
    pub frequency: f32,
}

impl WaveSurface {
    pub const fn new(amplitude: f32, frequency: f32) -> Self {
        Self {
            amplitude,
            frequency,
        }
    }

    /// Surface height at column `x` and time `t` around the fill level `base`.
    ///
    /// Drop recycling and the drawn waterline both go through this, so they
    /// always agree for the same `(x, t, base)`.
    #[inline]
    pub fn height(&self, x: f32, t: f32, base: f32) -> f32 {
        let f = self.frequency;
        base + self.amplitude * (x * f + t).sin() * (x * (-f / 2.0) + t).cos()
    }

    /// Sample the surface every `step` pixels for `0 <= x < width`.
    ///
    /// This is a pure read; whether the water reached the top is reported on
    /// the returned [`Waterline`] and acting on it is up to the caller.
    ///
    /// A `step` that is not positive and finite, or a `width` that is not
    /// finite, yields the single sample at `x = 0`.
    pub fn sample(&self, width: f32, step: f32, t: f32, base: f32) -> Waterline {
        let count = if step.is_finite() && step > 0.0 && width.is_finite() {
            (width / step).ceil().max(1.0) as usize
        } else {
            1
        };

        let mut points = Vec::with_capacity(count);
        let mut reached_top = false;
        for i in 0..count {
            let x = i as f32 * step.max(0.0);
            let y = self.height(x, t, base);
            reached_top |= y <= 0.0;
            points.push(Vec2::new(x, y));
        }

        Waterline {
            points,
            reached_top,
        }
    }
}

impl Default for WaveSurface {
    fn default() -> Self {
        Self::new(5.0, 0.05)
    }
}

/// Sampled surface points, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Waterline {
    points: Vec<Vec2>,
    reached_top: bool,
}

impl Waterline {
    /// Sampled points. The first is always at `x = 0`.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Whether any sample is at or above the top edge of the screen.
    pub fn reached_top(&self) -> bool {
        self.reached_top
    }

    /// Highest point of the surface (smallest y).
    #[cfg(test)]
    pub(crate) fn min_height(&self) -> f32 {
        self.points
            .iter()
            .map(|p| p.y)
            .fold(f32::INFINITY, f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_at_origin() {
        let wave = WaveSurface::default();
        // sin(0) = 0 at x = 0, t = 0
        assert_eq!(wave.height(0.0, 0.0, 300.0), 300.0);
    }

    #[test]
    fn test_height_formula() {
        let wave = WaveSurface::new(5.0, 0.05);
        let (x, t, base) = (37.0_f32, 2.3_f32, 120.0_f32);
        let expected = base + 5.0 * (x * 0.05 + t).sin() * (x * -0.025 + t).cos();
        assert!((wave.height(x, t, base) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_height_bounded_by_amplitude() {
        let wave = WaveSurface::default();
        let base = 200.0;
        for tick in 0..2_000 {
            let t = tick as f32 * 0.1;
            for x in (0..1920).step_by(7) {
                let h = wave.height(x as f32, t, base);
                assert!(h >= base - 5.0 - 1e-3 && h <= base + 5.0 + 1e-3, "h = {}", h);
            }
        }
    }

    #[test]
    fn test_sample_spacing() {
        let wave = WaveSurface::default();
        let line = wave.sample(100.0, 10.0, 0.0, 50.0);
        let xs: Vec<f32> = line.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]);
        assert!(!line.reached_top());
    }

    #[test]
    fn test_sample_matches_height() {
        let wave = WaveSurface::default();
        let line = wave.sample(300.0, 10.0, 4.2, 77.0);
        for p in line.points() {
            assert_eq!(p.y, wave.height(p.x, 4.2, 77.0));
        }
    }

    #[test]
    fn test_sample_zero_width_keeps_origin() {
        let wave = WaveSurface::default();
        let line = wave.sample(0.0, 10.0, 0.0, 10.0);
        assert_eq!(line.points().len(), 1);
        assert_eq!(line.points()[0].x, 0.0);
    }

    #[test]
    fn test_reached_top() {
        let wave = WaveSurface::default();
        // Base at 2 px: the ripple dips up to 5 px above it somewhere.
        let line = wave.sample(400.0, 10.0, 1.0, 2.0);
        assert!(line.min_height() <= 0.0);
        assert!(line.reached_top());

        let line = wave.sample(400.0, 10.0, 1.0, 6.0);
        assert!(line.min_height() > 0.0);
        assert!(!line.reached_top());
    }

    #[test]
    fn test_sample_degenerate_step() {
        let wave = WaveSurface::default();
        for step in [0.0, -10.0, f32::NAN, f32::INFINITY] {
            let line = wave.sample(400.0, step, 0.0, 50.0);
            assert_eq!(line.points(), &[Vec2::new(0.0, 50.0)]);
        }
    }

    #[test]
    fn test_sample_non_finite_width() {
        let wave = WaveSurface::default();
        let line = wave.sample(f32::INFINITY, 10.0, 0.0, 50.0);
        assert_eq!(line.points().len(), 1);
    }
}
