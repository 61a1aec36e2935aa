use bytemuck::{Pod, Zeroable};

/// Per-instance render data for one sphere or model.
/// Read by the host renderer straight out of WASM memory.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub radius: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub emissive: f32,
    pub rotation: f32,
    /// Model registry id, or -1 to draw the plain sphere.
    pub model: f32,
    pub _pad0: f32,
    pub _pad1: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const NO_MODEL: f32 = -1.0;
}

/// Bounded buffer of body instances, rebuilt every frame.
pub struct BodyBuffer {
    instances: Vec<BodyInstance>,
    max: usize,
}

impl BodyBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Append an instance. Returns false (and drops it) once the buffer is full.
    pub fn push(&mut self, instance: BodyInstance) -> bool {
        if self.instances.len() >= self.max {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for BodyBuffer {
    fn default() -> Self {
        Self::new()
    }
}
