//! Backend-independent shapes for one frame.
//!
//! Everything here is plain math on [`glam`] vectors: the drop silhouette and
//! the water body are described as path segments in screen space, and can be
//! flattened to polygons without touching a graphics API.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Affine2, Vec2};

use crate::drop::Raindrop;
use crate::wave::Waterline;

/// One step of a single-contour path, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    /// Circular arc swept with increasing angle from `start_angle` to
    /// `end_angle` (radians, y pointing down).
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Close,
}

/// A teardrop oriented along a drop's velocity.
///
/// In the drop's local frame the rounded cap is the lower half of a circle of
/// `radius` around the origin and the tail is a triangle reaching `tail`
/// pixels up the negative y axis. The local frame is rotated by `theta` and
/// moved to `origin`, which leaves the cap leading and the tail trailing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropSilhouette {
    pub origin: Vec2,
    pub theta: f32,
    pub radius: f32,
    pub tail: f32,
}

impl DropSilhouette {
    pub fn new(drop: &Raindrop, drop_length: f32, drop_width: f32) -> Self {
        let v = drop.velocity;
        Self {
            origin: drop.position,
            theta: v.y.atan2(v.x) - FRAC_PI_2,
            radius: drop_width * 2.0,
            tail: drop.half_extent(drop_length),
        }
    }

    /// Local-to-screen transform.
    pub fn transform(&self) -> Affine2 {
        Affine2::from_angle_translation(self.theta, self.origin)
    }

    /// End of the tail in screen space.
    pub fn tip(&self) -> Vec2 {
        self.transform().transform_point2(Vec2::new(0.0, -self.tail))
    }

    /// Outline as path segments: cap first, then the tail triangle.
    pub fn segments(&self) -> Vec<PathSegment> {
        let to_screen = self.transform();
        let r = self.radius;
        vec![
            PathSegment::MoveTo(to_screen.transform_point2(Vec2::new(r, 0.0))),
            PathSegment::Arc {
                center: self.origin,
                radius: r,
                start_angle: self.theta,
                end_angle: self.theta + PI,
            },
            PathSegment::LineTo(to_screen.transform_point2(Vec2::new(-r, 0.0))),
            PathSegment::LineTo(to_screen.transform_point2(Vec2::new(0.0, -self.tail))),
            PathSegment::LineTo(to_screen.transform_point2(Vec2::new(r, 0.0))),
            PathSegment::Close,
        ]
    }
}

/// The filled body of water under the waterline.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterBody {
    pub surface: Waterline,
    /// Bottom-right corner of the screen.
    pub corner: Vec2,
}

impl WaterBody {
    pub fn new(surface: Waterline, width: f32, height: f32) -> Self {
        Self {
            surface,
            corner: Vec2::new(width, height),
        }
    }

    /// Whether the surface touched the top edge this frame.
    pub fn reached_top(&self) -> bool {
        self.surface.reached_top()
    }

    /// Surface left to right, then down the right edge and back along the
    /// bottom.
    pub fn segments(&self) -> Vec<PathSegment> {
        let points = self.surface.points();
        let mut segments = Vec::with_capacity(points.len() + 3);
        let mut points = points.iter();
        if let Some(first) = points.next() {
            segments.push(PathSegment::MoveTo(*first));
        }
        segments.extend(points.map(|p| PathSegment::LineTo(*p)));
        segments.push(PathSegment::LineTo(self.corner));
        segments.push(PathSegment::LineTo(Vec2::new(0.0, self.corner.y)));
        segments.push(PathSegment::Close);
        segments
    }
}

/// Flatten a single-contour path into polygon vertices.
///
/// Arcs are split into `arc_steps` straight pieces. A point equal to the
/// previous one is dropped, so an arc that starts at the current point does
/// not duplicate it.
pub fn flatten(segments: &[PathSegment], arc_steps: usize) -> Vec<Vec2> {
    let arc_steps = arc_steps.max(1);
    let mut out: Vec<Vec2> = Vec::with_capacity(segments.len() + arc_steps);
    let push = |out: &mut Vec<Vec2>, p: Vec2| {
        if out.last().map_or(true, |last| last.distance_squared(p) > 1e-8) {
            out.push(p);
        }
    };

    for segment in segments {
        match *segment {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => push(&mut out, p),
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let sweep = end_angle - start_angle;
                for i in 0..=arc_steps {
                    let a = start_angle + sweep * i as f32 / arc_steps as f32;
                    push(&mut out, center + radius * Vec2::from_angle(a));
                }
            }
            PathSegment::Close => {}
        }
    }

    // The closing vertex repeats the first one.
    if out.len() > 1 && out[0].distance_squared(out[out.len() - 1]) <= 1e-8 {
        out.pop();
    }
    out
}
