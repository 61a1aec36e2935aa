/// Flat frame buffer layout shared with the host renderer.
/// Must stay in sync with the TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]
/// [Lights: max_lights × 8 floats]
/// [Bodies: max_bodies × 12 floats]
/// [Paths: max_path_vertices × 7 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::renderer::body_instance::BodyInstance;
use crate::renderer::camera::CameraUniform;
use crate::systems::lighting::PointLight;
use crate::systems::paths::LineVertex;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_MAX_PATH_VERTICES: usize = 4;
pub const HEADER_PATH_VERTEX_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_MAX_LIGHTS: usize = 8;
pub const HEADER_LIGHT_COUNT: usize = 9;
pub const HEADER_AMBIENT_R: usize = 10;
pub const HEADER_AMBIENT_G: usize = 11;
pub const HEADER_AMBIENT_B: usize = 12;
pub const HEADER_VIEWPORT_WIDTH: usize = 13;
pub const HEADER_VIEWPORT_HEIGHT: usize = 14;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section: view-projection matrix + eye.
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;
pub const LIGHT_FLOATS: usize = PointLight::FLOATS;
pub const BODY_FLOATS: usize = BodyInstance::FLOATS;
pub const PATH_VERTEX_FLOATS: usize = LineVertex::FLOATS;
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_lights: usize,
    pub max_bodies: usize,
    pub max_path_vertices: usize,
    pub max_events: usize,

    pub camera_offset: usize,
    pub light_data_offset: usize,
    pub body_data_offset: usize,
    pub path_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

/// Borrowed view of everything one frame publishes.
pub struct FrameView<'a> {
    pub frame_counter: u64,
    pub camera: CameraUniform,
    pub viewport: [f32; 2],
    pub ambient: [f32; 3],
    pub lights: &'a [PointLight],
    pub bodies: &'a [BodyInstance],
    pub paths: &'a [LineVertex],
    pub events: &'a [GameEvent],
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_lights: usize, max_bodies: usize, max_path_vertices: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let light_data_offset = camera_offset + CAMERA_FLOATS;
        let body_data_offset = light_data_offset + max_lights * LIGHT_FLOATS;
        let path_data_offset = body_data_offset + max_bodies * BODY_FLOATS;
        let event_data_offset = path_data_offset + max_path_vertices * PATH_VERTEX_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_lights,
            max_bodies,
            max_path_vertices,
            max_events,
            camera_offset,
            light_data_offset,
            body_data_offset,
            path_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_lights,
            config.max_bodies,
            config.max_path_vertices,
            config.max_events,
        )
    }

    /// Pack one frame into `out`, resizing it to the full buffer size.
    /// Sections longer than their capacity are truncated.
    pub fn write_frame(&self, out: &mut Vec<f32>, frame: &FrameView) {
        out.resize(self.buffer_total_floats, 0.0);

        let lights = copy_section(out, self.light_data_offset, frame.lights, self.max_lights);
        let bodies = copy_section(out, self.body_data_offset, frame.bodies, self.max_bodies);
        let paths = copy_section(out, self.path_data_offset, frame.paths, self.max_path_vertices);
        let events = copy_section(out, self.event_data_offset, frame.events, self.max_events);

        let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&frame.camera));
        out[self.camera_offset..self.camera_offset + CAMERA_FLOATS].copy_from_slice(camera);

        let header = &mut out[..HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = frame.frame_counter as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_MAX_BODIES] = self.max_bodies as f32;
        header[HEADER_BODY_COUNT] = bodies as f32;
        header[HEADER_MAX_PATH_VERTICES] = self.max_path_vertices as f32;
        header[HEADER_PATH_VERTEX_COUNT] = paths as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = events as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = lights as f32;
        header[HEADER_AMBIENT_R] = frame.ambient[0];
        header[HEADER_AMBIENT_G] = frame.ambient[1];
        header[HEADER_AMBIENT_B] = frame.ambient[2];
        header[HEADER_VIEWPORT_WIDTH] = frame.viewport[0];
        header[HEADER_VIEWPORT_HEIGHT] = frame.viewport[1];
    }
}

/// Copy up to `max` Pod records into `out` at `offset`. Returns the count written.
fn copy_section<T: bytemuck::Pod>(out: &mut [f32], offset: usize, items: &[T], max: usize) -> usize {
    let count = items.len().min(max);
    let floats: &[f32] = bytemuck::cast_slice(&items[..count]);
    out[offset..offset + floats.len()].copy_from_slice(floats);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::Camera3D;
    use glam::Vec3;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.camera_offset, 16);
        assert_eq!(layout.light_data_offset, 16 + 20);
        assert_eq!(layout.body_data_offset, 36 + 8 * 8);
        assert_eq!(layout.path_data_offset, 100 + 1024 * 12);
        assert_eq!(layout.event_data_offset, 100 + 1024 * 12 + 65536 * 7);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(2, 10, 20, 5);
        assert_eq!(layout.light_data_offset, layout.camera_offset + CAMERA_FLOATS);
        assert_eq!(layout.body_data_offset, layout.light_data_offset + 2 * LIGHT_FLOATS);
        assert_eq!(layout.path_data_offset, layout.body_data_offset + 10 * BODY_FLOATS);
        assert_eq!(layout.event_data_offset, layout.path_data_offset + 20 * PATH_VERTEX_FLOATS);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 5 * EVENT_FLOATS);
    }

    #[test]
    fn write_frame_packs_sections_and_header() {
        let layout = ProtocolLayout::new(2, 4, 8, 2);
        let lights = [PointLight::new(Vec3::new(10.0, 10.0, 10.0), [1.0; 3], 1.0)];
        let bodies = [BodyInstance { x: 40.0, radius: 1.0, model: -1.0, ..Default::default() }];
        let events = [
            GameEvent { kind: 1.0, a: 2.0, b: 3.0, c: 4.0 },
            GameEvent { kind: 5.0, ..Default::default() },
            GameEvent { kind: 6.0, ..Default::default() },
        ];
        let camera = Camera3D::default();

        let mut out = Vec::new();
        layout.write_frame(&mut out, &FrameView {
            frame_counter: 7,
            camera: camera.uniform(),
            viewport: [800.0, 600.0],
            ambient: [0.5, 0.5, 0.5],
            lights: &lights,
            bodies: &bodies,
            paths: &[],
            events: &events,
        });

        assert_eq!(out.len(), layout.buffer_total_floats);
        assert_eq!(out[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(out[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(out[HEADER_LIGHT_COUNT], 1.0);
        assert_eq!(out[HEADER_BODY_COUNT], 1.0);
        assert_eq!(out[HEADER_PATH_VERTEX_COUNT], 0.0);
        // Events are truncated to capacity.
        assert_eq!(out[HEADER_EVENT_COUNT], 2.0);
        assert_eq!(out[HEADER_AMBIENT_G], 0.5);
        assert_eq!(out[HEADER_VIEWPORT_WIDTH], 800.0);

        assert_eq!(out[layout.light_data_offset + 1], 10.0);
        assert_eq!(out[layout.body_data_offset], 40.0);
        assert_eq!(out[layout.body_data_offset + 9], -1.0);
        assert_eq!(&out[layout.event_data_offset..layout.event_data_offset + 5], &[1.0, 2.0, 3.0, 4.0, 5.0]);

        let eye = camera.eye();
        assert!((out[layout.camera_offset + 16] - eye.x).abs() < 1e-5);
        assert_eq!(out[layout.camera_offset + 19], camera.distance);
    }
}
