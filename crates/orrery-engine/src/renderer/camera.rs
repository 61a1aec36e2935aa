use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

const MIN_PITCH: f32 = 0.05;
const MAX_PITCH: f32 = 1.5;

/// A ray in world space. `dir` is normalised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// Perspective camera orbiting a target point.
///
/// `distance` is the zoom level: the host zoom controller writes the
/// smoothed value here once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    /// Point the camera looks at.
    pub target: Vec3,
    /// Distance from the target along the view direction.
    pub distance: f32,
    /// Rotation about the world Y axis, radians.
    pub yaw: f32,
    /// Elevation above the XZ plane, radians (clamped away from the poles).
    pub pitch: f32,
    /// Vertical field of view, radians.
    pub fov_y: f32,
    /// Viewport size in CSS pixels.
    pub viewport: Vec2,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Eye position (w = distance to target).
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl Camera3D {
    pub fn new(fov_y_degrees: f32, distance: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            distance,
            yaw: 0.0,
            pitch: std::f32::consts::FRAC_PI_4,
            fov_y: fov_y_degrees.to_radians(),
            viewport: Vec2::new(1280.0, 720.0),
            near: 0.1,
            far: 5000.0,
        }
    }

    /// Unit vector from the target toward the eye.
    fn back_dir(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        )
    }

    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        self.target + self.back_dir() * self.distance
    }

    pub fn aspect(&self) -> f32 {
        if self.viewport.y <= 0.0 {
            1.0
        } else {
            self.viewport.x / self.viewport.y
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        let eye = self.eye();
        CameraUniform {
            view_proj: self.view_proj().to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, self.distance],
        }
    }

    /// Resize the viewport (CSS pixels). Zero sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
    }

    /// Rotate around the target. Pitch is clamped short of the poles.
    pub fn orbit(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + d_pitch).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Ray through a viewport pixel (origin top-left, Y down).
    pub fn screen_ray(&self, px: f32, py: f32) -> Ray {
        let ndc_x = 2.0 * px / self.viewport.x.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * py / self.viewport.y.max(1.0);
        let inv = self.view_proj().inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray {
            origin: near,
            dir: (far - near).normalize_or_zero(),
        }
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(75.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_sits_at_distance_from_target() {
        let cam = Camera3D::new(75.0, 100.0);
        assert!((cam.eye().length() - 100.0).abs() < 1e-3);
        assert!(cam.eye().y > 0.0, "camera looks down on the ecliptic");
    }

    #[test]
    fn center_ray_points_at_target() {
        let mut cam = Camera3D::new(75.0, 80.0);
        cam.resize(800.0, 600.0);
        let ray = cam.screen_ray(400.0, 300.0);
        let expected = (cam.target - cam.eye()).normalize();
        assert!(ray.dir.dot(expected) > 0.9999, "dir = {:?}", ray.dir);
    }

    #[test]
    fn orbit_clamps_pitch() {
        let mut cam = Camera3D::default();
        cam.orbit(0.0, 10.0);
        assert_eq!(cam.pitch, MAX_PITCH);
        cam.orbit(0.0, -10.0);
        assert_eq!(cam.pitch, MIN_PITCH);
    }

    #[test]
    fn orbit_wraps_yaw() {
        let mut cam = Camera3D::default();
        cam.orbit(-0.5, 0.0);
        assert!(cam.yaw >= 0.0 && cam.yaw < std::f32::consts::TAU);
    }

    #[test]
    fn resize_ignores_degenerate_sizes() {
        let mut cam = Camera3D::default();
        cam.resize(0.0, 300.0);
        assert_eq!(cam.viewport, Vec2::new(1280.0, 720.0));
        cam.resize(1920.0, 1080.0);
        assert!((cam.aspect() - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn uniform_is_20_floats() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
