pub mod cadence;
pub mod camera_stream;
pub mod error;
pub mod fetch;
pub mod gesture;
pub mod runner;

pub use cadence::{CancellationToken, RepeatingTask};
pub use camera_stream::CameraStream;
pub use error::WebError;
pub use fetch::{dispatch_requests, fetch_text};
pub use gesture::{GestureSession, HandSample};
pub use runner::GameRunner;

#[doc(hidden)]
pub use orrery_engine as engine;
#[doc(hidden)]
pub use wasm_bindgen_futures::spawn_local;
#[doc(hidden)]
pub use {glam, js_sys, web_sys};

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner and the gesture session
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers,
///   gesture start/stop, manifest loading, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_game!(MyGame, "my-game");
/// ```
///
/// The game type needs a `new()` constructor. The calling crate must depend
/// on `wasm-bindgen`, `log`, `console_log` and `console_error_panic_hook`.
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::{Cell, RefCell};

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
            static GESTURE: RefCell<Option<$crate::GestureSession>> = RefCell::new(None);
            static GESTURE_GENERATION: Cell<u32> = Cell::new(0);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        fn push_hand_sample(sample: $crate::HandSample) {
            let event = match sample {
                $crate::HandSample::Pose { thumb, index } => {
                    $crate::engine::InputEvent::HandPose { thumb, index }
                }
                $crate::HandSample::NoHand => $crate::engine::InputEvent::HandLost,
            };
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        /// Advance one frame, then start any text requests the game issued.
        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            let requests = with_runner(|r| {
                r.tick(dt);
                r.take_requests()
            });
            if !requests.is_empty() {
                $crate::dispatch_requests(requests, |id, result| {
                    with_runner(|r| r.complete_request(id, result))
                });
            }
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input($crate::engine::InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Hand input ----

        /// Feed one hand pose directly (thumb tip, index tip).
        #[wasm_bindgen]
        pub fn game_hand_pose(tx: f32, ty: f32, tz: f32, ix: f32, iy: f32, iz: f32) {
            push_hand_sample($crate::HandSample::Pose {
                thumb: $crate::glam::Vec3::new(tx, ty, tz),
                index: $crate::glam::Vec3::new(ix, iy, iz),
            });
        }

        #[wasm_bindgen]
        pub fn game_hand_lost() {
            push_hand_sample($crate::HandSample::NoHand);
        }

        /// Start webcam sampling. `estimator(video)` returns (a promise of)
        /// the detected hands. Failure leaves the rest of the scene running.
        #[wasm_bindgen]
        pub fn game_start_gesture(
            video: $crate::web_sys::HtmlVideoElement,
            estimator: $crate::js_sys::Function,
            interval_ms: u32,
        ) {
            let generation = GESTURE_GENERATION.with(|g| {
                g.set(g.get().wrapping_add(1));
                g.get()
            });
            GESTURE.with(|cell| cell.borrow_mut().take());

            $crate::spawn_local(async move {
                let sink: std::rc::Rc<dyn Fn($crate::HandSample)> = std::rc::Rc::new(push_hand_sample);
                match $crate::GestureSession::start(video, estimator, interval_ms, sink).await {
                    Ok(session) => {
                        // A stop or restart while the camera was opening wins.
                        if GESTURE_GENERATION.with(|g| g.get()) == generation {
                            GESTURE.with(|cell| *cell.borrow_mut() = Some(session));
                        }
                    }
                    Err(e) => {
                        log::warn!("gesture zoom unavailable: {}", e);
                        with_runner(|r| {
                            r.push_input($crate::engine::InputEvent::GestureUnavailable {
                                reason: e.to_string(),
                            })
                        });
                    }
                }
            });
        }

        /// Stop sampling and release the camera.
        #[wasm_bindgen]
        pub fn game_stop_gesture() {
            GESTURE_GENERATION.with(|g| g.set(g.get().wrapping_add(1)));
            GESTURE.with(|cell| cell.borrow_mut().take());
        }

        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        #[wasm_bindgen]
        pub fn get_model_path(id: u32) -> Option<String> {
            with_runner(|r| {
                r.models()
                    .path_of($crate::engine::ModelId(id))
                    .map(str::to_string)
            })
        }

        #[wasm_bindgen]
        pub fn get_model_count() -> u32 {
            with_runner(|r| r.models().len() as u32)
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_bodies_ptr() -> *const f32 {
            with_runner(|r| r.bodies_ptr())
        }

        #[wasm_bindgen]
        pub fn get_body_count() -> u32 {
            with_runner(|r| r.body_count())
        }

        #[wasm_bindgen]
        pub fn get_paths_ptr() -> *const f32 {
            with_runner(|r| r.paths_ptr())
        }

        #[wasm_bindgen]
        pub fn get_path_vertex_count() -> u32 {
            with_runner(|r| r.path_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr())
        }

        // ---- Lighting accessors ----

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count())
        }

        #[wasm_bindgen]
        pub fn get_ambient_r() -> f32 {
            with_runner(|r| r.ambient()[0])
        }

        #[wasm_bindgen]
        pub fn get_ambient_g() -> f32 {
            with_runner(|r| r.ambient()[1])
        }

        #[wasm_bindgen]
        pub fn get_ambient_b() -> f32 {
            with_runner(|r| r.ambient()[2])
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_bodies() -> u32 {
            with_runner(|r| r.max_bodies())
        }

        #[wasm_bindgen]
        pub fn get_max_path_vertices() -> u32 {
            with_runner(|r| r.max_path_vertices())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
