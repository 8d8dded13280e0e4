//! Triangle lists for a [`Frame`].
//!
//! Drops are convex, so each one is a triangle fan around the drop position.
//! The water body is cut into vertical strips between consecutive surface
//! samples and the bottom edge.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::geometry::{flatten, DropSilhouette, WaterBody};
use crate::render::{DrawOp, Frame, Rgba};

/// Straight pieces per drop cap.
pub const ARC_STEPS: usize = 8;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Screen position in pixels, y down.
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn new(position: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

/// How vertex colors are written, matched to the surface's alpha mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorEncoding {
    Premultiplied,
    Straight,
}

impl ColorEncoding {
    pub fn encode(self, color: Rgba) -> [f32; 4] {
        match self {
            ColorEncoding::Premultiplied => color.premultiplied(),
            ColorEncoding::Straight => [color.r, color.g, color.b, color.a],
        }
    }
}

/// Fill `out` with triangles for `frame`.
///
/// Returns the color of the last `Clear`, which the backend turns into the
/// render pass load op. A `Clear` discards everything emitted before it.
pub fn tessellate(frame: &Frame, encoding: ColorEncoding, out: &mut Vec<Vertex>) -> Option<Rgba> {
    out.clear();
    let mut clear = None;

    for op in frame.ops() {
        match op {
            DrawOp::Clear(color) => {
                out.clear();
                clear = Some(*color);
            }
            DrawOp::FillDrop { shape, color } => {
                fill_drop(shape, encoding.encode(*color), out);
            }
            DrawOp::FillWater { body, color } => {
                fill_water(body, encoding.encode(*color), out);
            }
        }
    }
    clear
}

fn fill_drop(shape: &DropSilhouette, color: [f32; 4], out: &mut Vec<Vertex>) {
    let outline = flatten(&shape.segments(), ARC_STEPS);
    let n = outline.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        out.push(Vertex::new(shape.origin, color));
        out.push(Vertex::new(outline[i], color));
        out.push(Vertex::new(outline[(i + 1) % n], color));
    }
}

fn fill_water(body: &WaterBody, color: [f32; 4], out: &mut Vec<Vertex>) {
    let bottom = body.corner.y;
    let points = body.surface.points();

    let column = |a: Vec2, b: Vec2, out: &mut Vec<Vertex>| {
        let a_floor = Vec2::new(a.x, bottom);
        let b_floor = Vec2::new(b.x, bottom);
        out.extend_from_slice(&[
            Vertex::new(a, color),
            Vertex::new(b, color),
            Vertex::new(b_floor, color),
            Vertex::new(a, color),
            Vertex::new(b_floor, color),
            Vertex::new(a_floor, color),
        ]);
    };

    for pair in points.windows(2) {
        column(pair[0], pair[1], out);
    }
    // The last sample joins the bottom-right corner directly.
    if let Some(&last) = points.last() {
        out.extend_from_slice(&[
            Vertex::new(last, color),
            Vertex::new(body.corner, color),
            Vertex::new(Vec2::new(last.x, bottom), color),
        ]);
    }
}
