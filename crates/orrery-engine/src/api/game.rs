use crate::api::types::{EntityId, GameEvent, RequestId, TextRequest};
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::systems::lighting::LightState;
use crate::systems::paths::PathState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Maximum number of body instances (default: 1024).
    pub max_bodies: usize,
    /// Maximum number of path vertices per frame (default: 65536).
    pub max_path_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Maximum number of point lights (default: 8).
    pub max_lights: usize,
    /// Longest frame delta passed to `Game::update`, in seconds (default: 0.1).
    pub max_frame_dt: f32,
    /// Vertical field of view in degrees (default: 75).
    pub fov_y_degrees: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_bodies: 1024,
            max_path_vertices: 65536,
            max_events: 32,
            max_lights: 8,
            max_frame_dt: 0.1,
            fov_y_degrees: 75.0,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The per-frame tick. `dt` is the sanitised frame delta in seconds.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub paths: PathState,
    pub lights: LightState,
    pub camera: Camera3D,
    pub events: Vec<GameEvent>,
    max_events: usize,
    requests: Vec<TextRequest>,
    next_id: u32,
    next_request: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Create an EngineContext sized by a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_bodies),
            paths: PathState::new(config.max_path_vertices),
            lights: LightState::with_capacity(config.max_lights),
            camera: Camera3D::new(config.fov_y_degrees, 100.0),
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
            requests: Vec::new(),
            next_id: 1,
            next_request: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host.
    /// Events past the per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event capacity {} reached, event {} dropped", self.max_events, event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Ask the host to GET `url` as text. The result comes back through
    /// the input queue as `TextLoaded`/`TextFailed` carrying the returned id.
    pub fn request_text(&mut self, url: impl Into<String>) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        let url = url.into();
        log::debug!("text request {} -> {}", id.0, url);
        self.requests.push(TextRequest { id, url });
        id
    }

    /// Take every request issued since the last drain.
    pub fn drain_requests(&mut self) -> Vec<TextRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn pending_requests(&self) -> &[TextRequest] {
        &self.requests
    }

    /// Clear per-frame transient data (events, path geometry).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.paths.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
