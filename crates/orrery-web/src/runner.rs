use orrery_engine::{
    build_body_buffer, BodyBuffer, CameraUniform, EngineContext, FrameClock, FrameView, Game,
    GameConfig, InputEvent, InputQueue, ModelManifest, ModelRegistry, ProtocolLayout, RequestId,
    TextRequest,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    bodies: BodyBuffer,
    models: ModelRegistry,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    camera: CameraUniform,
    /// Flat packed frame, laid out per `layout`.
    frame: Vec<f32>,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::from_config(&config);
        let camera = ctx.camera.uniform();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            bodies: BodyBuffer::with_capacity(config.max_bodies),
            models: ModelRegistry::new(),
            clock: FrameClock::new(config.max_frame_dt),
            camera,
            frame: vec![0.0; layout.buffer_total_floats],
            layout,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: update the game with the sanitised delta, then
    /// rebuild the body buffer and the packed frame.
    pub fn tick(&mut self, raw_dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let dt = self.clock.advance(raw_dt);
        self.game.update(&mut self.ctx, &self.input, dt);

        // Drain input after update
        self.input.drain();

        build_body_buffer(self.ctx.scene.iter(), &self.models, &mut self.bodies);
        self.camera = self.ctx.camera.uniform();

        let viewport = self.ctx.camera.viewport;
        self.layout.write_frame(&mut self.frame, &FrameView {
            frame_counter: self.clock.frames(),
            camera: self.camera,
            viewport: [viewport.x, viewport.y],
            ambient: self.ctx.lights.ambient(),
            lights: self.ctx.lights.lights(),
            bodies: self.bodies.instances(),
            paths: self.ctx.paths.vertices(),
            events: &self.ctx.events,
        });
    }

    /// Text requests the game issued since the last call.
    pub fn take_requests(&mut self) -> Vec<TextRequest> {
        self.ctx.drain_requests()
    }

    /// Deliver the outcome of a text request on the next tick.
    pub fn complete_request(&mut self, request: RequestId, result: Result<String, String>) {
        let event = match result {
            Ok(body) => InputEvent::TextLoaded { request, body },
            Err(reason) => InputEvent::TextFailed { request, reason },
        };
        self.input.push(event);
    }

    /// Replace the model registry from a JSON manifest.
    /// A malformed manifest is logged and leaves the current registry in place.
    pub fn load_manifest(&mut self, json: &str) {
        match ModelManifest::from_json(json) {
            Ok(manifest) => {
                self.models = ModelRegistry::from_manifest(&manifest);
                log::info!("model manifest loaded: {} models", self.models.len());
            }
            Err(e) => log::error!("model manifest rejected: {}", e),
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    // ---- Pointer accessors for host reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn bodies_ptr(&self) -> *const f32 {
        self.bodies.instances_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.bodies.instance_count() as u32
    }

    pub fn paths_ptr(&self) -> *const f32 {
        self.ctx.paths.buffer_ptr()
    }

    pub fn path_vertex_count(&self) -> u32 {
        self.ctx.paths.vertex_count() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count() as u32
    }

    pub fn ambient(&self) -> [f32; 3] {
        self.ctx.lights.ambient()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    // ---- Capacity accessors ----

    pub fn max_bodies(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    pub fn max_path_vertices(&self) -> u32 {
        self.layout.max_path_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_engine::{Entity, MeshComponent};

    /// Records what it sees so the runner can be checked on the host.
    #[derive(Default)]
    struct Probe {
        dts: Vec<f32>,
        texts: Vec<(RequestId, Result<String, String>)>,
    }

    impl Game for Probe {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_pos(Vec3::new(1.0, 2.0, 3.0))
                    .with_mesh(MeshComponent::default().with_model("Earth")),
            );
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
            self.dts.push(dt);
            for event in input.iter() {
                match event {
                    InputEvent::TextLoaded { request, body } => {
                        self.texts.push((*request, Ok(body.clone())))
                    }
                    InputEvent::TextFailed { request, reason } => {
                        self.texts.push((*request, Err(reason.clone())))
                    }
                    InputEvent::KeyDown { .. } => {
                        ctx.request_text("/api/v1/get_info/Earth");
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut runner = GameRunner::new(Probe::default());
        runner.tick(0.016);
        assert!(runner.game().dts.is_empty());
    }

    #[test]
    fn tick_sanitises_delta_and_builds_bodies() {
        let mut runner = GameRunner::new(Probe::default());
        runner.init();
        runner.tick(-1.0);
        runner.tick(5.0);
        assert_eq!(runner.game().dts, vec![0.0, runner.config().max_frame_dt]);
        assert_eq!(runner.body_count(), 1);
        assert_eq!(runner.frame.len(), runner.buffer_total_floats() as usize);
    }

    #[test]
    fn requests_round_trip_through_input() {
        let mut runner = GameRunner::new(Probe::default());
        runner.init();
        runner.push_input(InputEvent::KeyDown { key_code: 13 });
        runner.tick(0.016);

        let requests = runner.take_requests();
        assert_eq!(requests.len(), 1);
        let id = requests[0].id;

        runner.complete_request(id, Ok("Earth is the third planet.".into()));
        runner.complete_request(RequestId(99), Err("HTTP 500".into()));
        runner.tick(0.016);

        assert_eq!(runner.game().texts.len(), 2);
        assert_eq!(runner.game().texts[0], (id, Ok("Earth is the third planet.".to_string())));
        assert!(runner.game().texts[1].1.is_err());
    }

    #[test]
    fn manifest_resolves_models() {
        let mut runner = GameRunner::new(Probe::default());
        runner.init();
        runner.load_manifest("not json");
        assert!(runner.models().is_empty());

        runner.load_manifest(r#"{ "models": [ { "name": "Earth" } ] }"#);
        runner.tick(0.016);
        assert_eq!(runner.models().len(), 1);
        let model = unsafe { *runner.bodies_ptr().add(9) };
        assert_eq!(model, 0.0);
    }
}
