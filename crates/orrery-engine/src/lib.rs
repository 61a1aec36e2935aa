pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent, RequestId, TextRequest};
pub use components::entity::Entity;
pub use components::mesh::{Color, MeshComponent};
pub use core::scene::Scene;
pub use core::time::{FrameClock, sanitize_dt};
pub use renderer::body_instance::{BodyInstance, BodyBuffer};
pub use renderer::camera::{Camera3D, CameraUniform, Ray};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::{ModelManifest, ModelDescriptor};
pub use assets::registry::{ModelId, ModelRegistry};
pub use bridge::protocol::{ProtocolLayout, FrameView};
pub use systems::body_render::build_body_buffer;
pub use systems::lighting::{PointLight, LightState};
pub use systems::paths::{PathState, LineVertex, LineColor};
pub use systems::picking::{pick, ray_sphere};

pub use extensions::{Easing, lerp, lerp_vec3, ease};
