//! Line-list geometry for orbit paths and highlight rings.
//!
//! Paths are rebuilt every frame into a flat vertex buffer that the host
//! draws as a line list (two vertices per segment).

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Per-vertex data for path rendering.
/// 7 floats = 28 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LineVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 7;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color for path drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LineColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
}

impl Default for LineColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Per-frame line buffer with a fixed vertex budget.
pub struct PathState {
    vertices: Vec<LineVertex>,
    max_vertices: usize,
}

impl PathState {
    pub fn new(max_vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(max_vertices),
            max_vertices,
        }
    }

    /// Stroke a circle of `radius` around `center` in the XZ plane.
    /// Returns false if it did not fit in the remaining budget.
    pub fn stroke_circle_xz(
        &mut self,
        center: Vec3,
        radius: f32,
        segments: usize,
        color: LineColor,
    ) -> bool {
        if segments < 3 || radius <= 0.0 {
            return false;
        }
        let points: Vec<Vec3> = (0..=segments)
            .map(|i| {
                let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
                center + Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
            })
            .collect();
        self.stroke_polyline(&points, color)
    }

    /// Stroke an open polyline. Nothing is written unless every segment fits.
    pub fn stroke_polyline(&mut self, points: &[Vec3], color: LineColor) -> bool {
        if points.len() < 2 {
            return false;
        }
        let needed = (points.len() - 1) * 2;
        if self.vertices.len() + needed > self.max_vertices {
            log::debug!(
                "path buffer full ({}/{}), dropping {} vertices",
                self.vertices.len(),
                self.max_vertices,
                needed
            );
            return false;
        }
        for pair in points.windows(2) {
            self.vertices.push(vertex(pair[0], color));
            self.vertices.push(vertex(pair[1], color));
        }
        true
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }
}

impl Default for PathState {
    fn default() -> Self {
        Self::new(16384)
    }
}

fn vertex(p: Vec3, c: LineColor) -> LineVertex {
    LineVertex {
        x: p.x,
        y: p.y,
        z: p.z,
        r: c.r,
        g: c.g,
        b: c.b,
        a: c.a,
    }
}
