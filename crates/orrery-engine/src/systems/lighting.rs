/// Point lights and ambient term for the 3D scene.
///
/// Lights are persistent: they stay until explicitly removed.
/// Each frame the host reads them straight from WASM memory.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A 3D point light.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Falloff distance in world units. Zero means no falloff.
    pub range: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    pub fn new(pos: Vec3, color: [f32; 3], intensity: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            range: 0.0,
        }
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range.max(0.0);
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
        self
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Manages active lights and the ambient term.
///
/// Ambient defaults to white (1, 1, 1), which leaves bodies unlit.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: [f32; 3],
    max_lights: usize,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: [1.0, 1.0, 1.0],
            max_lights,
        }
    }

    /// Add a point light. Returns false once the capacity is reached.
    pub fn add(&mut self, light: PointLight) -> bool {
        if self.lights.len() >= self.max_lights {
            log::warn!("light capacity {} reached, light dropped", self.max_lights);
            return false;
        }
        self.lights.push(light);
        true
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    /// Set a grey ambient level.
    pub fn set_ambient_level(&mut self, level: f32) {
        self.ambient = [level; 3];
    }

    pub fn set_ambient(&mut self, r: f32, g: f32, b: f32) {
        self.ambient = [r, g, b];
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ambient
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
