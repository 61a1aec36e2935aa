pub mod body_instance;
pub mod camera;

pub use body_instance::{BodyBuffer, BodyInstance};
pub use camera::{Camera3D, CameraUniform, Ray};
