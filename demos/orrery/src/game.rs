/// Orrery: planets on circular orbits, NEOs from a live feed, clickable
/// bodies with fetched descriptions, smoothed zoom and pinch-gesture zoom.
///
/// All scene, selection and zoom state lives here and is handed to the
/// engine each frame; the host only draws and relays input.

use glam::{Vec2, Vec3};
use orrery_engine::*;

use crate::bodies::{self, PLANETS, PLANET_COUNT};
use crate::config::OrreryConfig;
use crate::gesture::{GestureZoomEstimator, PinchZone};
use crate::neo::{self, NeoRecord};
use crate::orbit::Orbit;
use crate::selection::{SelectedBody, Selection};
use crate::zoom::{ZoomController, ZoomLimits, ZoomState};

// ── Custom event kinds from the host ─────────────────────────────────

/// a = direction (+1 zoom in, -1 zoom out).
const CUSTOM_ZOOM: u32 = 1;
const CUSTOM_RESET_VIEW: u32 = 2;
/// a = planet index.
const CUSTOM_SELECT_PLANET: u32 = 3;
/// a = NEO index in feed order.
const CUSTOM_SELECT_NEO: u32 = 4;
const CUSTOM_INFO_NEXT: u32 = 5;
const CUSTOM_INFO_PREV: u32 = 6;
const CUSTOM_CLEAR_SELECTION: u32 = 7;
/// a = target camera distance.
const CUSTOM_SET_ZOOM: u32 = 8;
/// Viewport resize (sent by the host as kind=99).
const CUSTOM_RESIZE: u32 = 99;

const KEY_ESCAPE: u32 = 27;
const KEY_ARROW_LEFT: u32 = 37;
const KEY_ARROW_RIGHT: u32 = 39;

// ── Game event kinds to the host ─────────────────────────────────────

/// a = body kind (0 none), b = index (-1 none), c = info state.
const EVENT_SELECTION: f32 = 1.0;
/// a = current distance, b = target distance.
const EVENT_ZOOM: f32 = 2.0;
/// a = page, b = total pages, c = lines on page.
const EVENT_INFO_PAGE: f32 = 3.0;
/// a = feed status, b = NEO count.
const EVENT_FEED: f32 = 4.0;
/// a = gesture status, b = last pinch zone (-1 near, 0 dead zone, 1 far).
const EVENT_GESTURE: f32 = 5.0;

// ── Paths ────────────────────────────────────────────────────────────

const ORBIT_SEGMENTS: usize = 64;
const PLANET_PATH_COLOR: LineColor = LineColor::WHITE.with_alpha(0.3);
const NEO_PATH_COLOR: LineColor = LineColor::rgb(1.0, 0.4, 0.4).with_alpha(0.12);
const RING_SEGMENTS: usize = 32;
const RING_SCALE: f32 = 2.5;
const RING_PULSE_HZ: f32 = 0.8;

// ── Input ────────────────────────────────────────────────────────────

/// Pointer travel in pixels before a press becomes a drag.
const DRAG_THRESHOLD: f32 = 5.0;
/// Radians of camera orbit per dragged pixel.
const DRAG_SENSITIVITY: f32 = 0.005;
const HIT_RADIUS_EXTRA: f32 = 2.0;

/// Bodies are capped so stars, planets and NEOs always fit one buffer.
const MAX_NEOS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Idle,
    Pending(RequestId),
    Loaded,
    Failed,
    Disabled,
}

impl FeedStatus {
    fn code(self) -> f32 {
        match self {
            FeedStatus::Idle => 0.0,
            FeedStatus::Pending(_) => 1.0,
            FeedStatus::Loaded => 2.0,
            FeedStatus::Failed => 3.0,
            FeedStatus::Disabled => 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStatus {
    /// No samples yet.
    Off,
    Tracking,
    NoHand,
    /// Camera or estimator unavailable; gesture zoom does nothing.
    Unavailable,
}

impl GestureStatus {
    fn code(self) -> f32 {
        match self {
            GestureStatus::Off => 0.0,
            GestureStatus::Tracking => 1.0,
            GestureStatus::NoHand => 2.0,
            GestureStatus::Unavailable => 3.0,
        }
    }
}

/// A body that moves along an orbit.
struct Orbiter {
    id: EntityId,
    orbit: Orbit,
}

pub struct Orrery {
    config: OrreryConfig,
    zoom: ZoomState,
    smoother: ZoomController,
    estimator: GestureZoomEstimator,
    gesture: GestureStatus,
    last_zone: Option<PinchZone>,

    planets: Vec<Orbiter>,
    neos: Vec<Orbiter>,
    neo_records: Vec<NeoRecord>,
    feed: FeedStatus,

    selection: Option<Selection>,
    /// Seconds since mount, drives the selection ring pulse.
    elapsed: f32,
    started: bool,

    // Camera home for reset
    home_yaw: f32,
    home_pitch: f32,

    // Drag state
    dragging: bool,
    drag_moved: bool,
    drag_start: Vec2,
    drag_last: Vec2,
}

impl Orrery {
    pub fn new() -> Self {
        Self::with_config(OrreryConfig::default())
    }

    pub fn with_config(config: OrreryConfig) -> Self {
        let z = &config.zoom;
        let g = &config.gesture;
        Self {
            zoom: ZoomState::new(z.initial, ZoomLimits::new(z.min, z.max)),
            smoother: ZoomController::new(z.smoothing),
            estimator: GestureZoomEstimator::new(g.near_threshold, g.far_threshold, g.step),
            gesture: GestureStatus::Off,
            last_zone: None,
            planets: Vec::with_capacity(PLANET_COUNT),
            neos: Vec::new(),
            neo_records: Vec::new(),
            feed: if config.feed.enabled { FeedStatus::Idle } else { FeedStatus::Disabled },
            selection: None,
            elapsed: 0.0,
            started: false,
            home_yaw: 0.0,
            home_pitch: std::f32::consts::FRAC_PI_4,
            dragging: false,
            drag_moved: false,
            drag_start: Vec2::ZERO,
            drag_last: Vec2::ZERO,
            config,
        }
    }

    /// Replace the configuration. Before the first frame this also resets
    /// the zoom to the configured initial distance; afterwards only the
    /// limits change.
    pub fn configure(&mut self, config: OrreryConfig) {
        let z = &config.zoom;
        let limits = ZoomLimits::new(z.min, z.max);
        if self.started {
            self.zoom.set_limits(limits);
        } else {
            self.zoom = ZoomState::new(z.initial, limits);
            self.feed = if config.feed.enabled { FeedStatus::Idle } else { FeedStatus::Disabled };
        }
        self.smoother = ZoomController::new(z.smoothing);
        let g = &config.gesture;
        self.estimator = GestureZoomEstimator::new(g.near_threshold, g.far_threshold, g.step);
        self.config = config;
        log::info!("orrery configured");
    }

    pub fn settings(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.selection.as_ref().map(Selection::name)
    }

    /// Text of the current info page, empty with nothing selected.
    pub fn info_text(&self) -> String {
        self.selection
            .as_ref()
            .map(|s| s.panel().page_text())
            .unwrap_or_default()
    }

    pub fn neo_records(&self) -> &[NeoRecord] {
        &self.neo_records
    }

    pub fn feed_status(&self) -> FeedStatus {
        self.feed
    }

    pub fn gesture_status(&self) -> GestureStatus {
        self.gesture
    }

    pub fn planet_angle(&self, index: usize) -> Option<f32> {
        self.planets.get(index).map(|p| p.orbit.angle())
    }

    /// Select a NEO by its feed name. An unknown name still replaces the
    /// selection, showing the loading text until the feed provides it.
    pub fn select_neo_by_name(&mut self, name: &str) -> bool {
        match neo::find_by_name(&self.neo_records, name) {
            Some((index, record)) => {
                self.selection = Some(Selection::neo(index, record, self.config.page_size));
                true
            }
            None => {
                log::debug!("NEO {} not in feed", name);
                self.selection = Some(Selection::unresolved(name, self.config.page_size));
                false
            }
        }
    }

    fn select_planet(&mut self, ctx: &mut EngineContext, index: usize) {
        let Some(desc) = PLANETS.get(index) else {
            log::warn!("no planet at index {}", index);
            return;
        };
        let request = ctx.request_text(self.config.info_url(desc.name));
        self.selection = Some(Selection::planet(index, desc.name, request, self.config.page_size));
        log::info!("selected {}", desc.name);
    }

    fn select_neo(&mut self, index: usize) {
        match self.neo_records.get(index) {
            Some(record) => {
                self.selection = Some(Selection::neo(index, record, self.config.page_size));
                log::info!("selected {}", record.name);
            }
            None => log::warn!("no NEO at index {}", index),
        }
    }

    fn select_entity(&mut self, ctx: &mut EngineContext, id: EntityId) {
        if let Some(index) = self.planets.iter().position(|p| p.id == id) {
            self.select_planet(ctx, index);
        } else if let Some(index) = self.neos.iter().position(|n| n.id == id) {
            self.select_neo(index);
        }
    }

    fn turn_page(&mut self, forward: bool) {
        if let Some(selection) = self.selection.as_mut() {
            let panel = selection.panel_mut();
            if forward {
                panel.next();
            } else {
                panel.previous();
            }
        }
    }

    fn reset_view(&mut self, camera: &mut Camera3D) {
        camera.yaw = self.home_yaw;
        camera.pitch = self.home_pitch;
        self.zoom.set_target(self.config.zoom.initial);
    }

    // ── Text responses ─────────────────────────────────────────────

    fn on_text(&mut self, ctx: &mut EngineContext, request: RequestId, body: &str) {
        if self.feed == FeedStatus::Pending(request) {
            match neo::parse_feed(body, &self.config.feed.start_date) {
                Ok(records) => self.load_neos(ctx, records),
                Err(e) => {
                    log::warn!("NEO feed rejected: {}", e);
                    self.feed = FeedStatus::Failed;
                }
            }
            return;
        }
        let applied = self.selection.as_mut().map_or(false, |s| s.apply_text(request, body));
        if !applied {
            log::debug!("stale text response {} dropped", request.0);
        }
    }

    fn on_text_failed(&mut self, request: RequestId, reason: &str) {
        if self.feed == FeedStatus::Pending(request) {
            log::warn!("NEO feed fetch failed: {}", reason);
            self.feed = FeedStatus::Failed;
            return;
        }
        match self.selection.as_mut() {
            Some(selection) if selection.is_awaiting(request) => {
                log::warn!("info for {} failed: {}", selection.name(), reason);
                selection.apply_failure(request);
            }
            _ => log::debug!("stale failure {} dropped", request.0),
        }
    }

    fn load_neos(&mut self, ctx: &mut EngineContext, mut records: Vec<NeoRecord>) {
        if records.len() > MAX_NEOS {
            log::warn!("feed has {} NEOs, keeping {}", records.len(), MAX_NEOS);
            records.truncate(MAX_NEOS);
        }
        for index in 0..records.len() {
            let orbit = bodies::neo_orbit(index);
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag("neo")
                    .with_pos(orbit.position())
                    .with_mesh(
                        MeshComponent::sphere(bodies::NEO_RADIUS, bodies::NEO_COLOR)
                            .with_model(bodies::NEO_MODEL),
                    )
                    .pickable(),
            );
            self.neos.push(Orbiter { id, orbit });
        }
        self.neo_records = records;
        self.feed = FeedStatus::Loaded;
        log::info!("NEO feed loaded: {} objects", self.neo_records.len());

        // A name asked for before the feed arrived resolves now.
        let pending = match self.selection.as_ref().map(Selection::body) {
            Some(SelectedBody::Unresolved(name)) => Some(name.clone()),
            _ => None,
        };
        if let Some(name) = pending {
            self.select_neo_by_name(&name);
        }
    }

    // ── Per-frame ──────────────────────────────────────────────────

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match event {
                InputEvent::Custom { kind, a, b, .. } => match *kind {
                    CUSTOM_ZOOM => {
                        if *a != 0.0 {
                            self.zoom.nudge_target(-a.signum() * self.config.zoom.wheel_step);
                        }
                    }
                    CUSTOM_SET_ZOOM => self.zoom.set_target(*a),
                    CUSTOM_RESET_VIEW => self.reset_view(&mut ctx.camera),
                    CUSTOM_SELECT_PLANET => {
                        if *a >= 0.0 {
                            self.select_planet(ctx, *a as usize);
                        }
                    }
                    CUSTOM_SELECT_NEO => {
                        if *a >= 0.0 {
                            self.select_neo(*a as usize);
                        }
                    }
                    CUSTOM_INFO_NEXT => self.turn_page(true),
                    CUSTOM_INFO_PREV => self.turn_page(false),
                    CUSTOM_CLEAR_SELECTION => self.selection = None,
                    CUSTOM_RESIZE => ctx.camera.resize(*a, *b),
                    _ => {}
                },
                InputEvent::KeyDown { key_code } => match *key_code {
                    KEY_ARROW_RIGHT => self.turn_page(true),
                    KEY_ARROW_LEFT => self.turn_page(false),
                    KEY_ESCAPE => self.selection = None,
                    _ => {}
                },
                InputEvent::PointerDown { x, y } => {
                    self.dragging = true;
                    self.drag_moved = false;
                    self.drag_start = Vec2::new(*x, *y);
                    self.drag_last = self.drag_start;
                }
                InputEvent::PointerMove { x, y } => {
                    if self.dragging {
                        let pos = Vec2::new(*x, *y);
                        if pos.distance(self.drag_start) > DRAG_THRESHOLD {
                            self.drag_moved = true;
                        }
                        if self.drag_moved {
                            let delta = pos - self.drag_last;
                            ctx.camera.orbit(-delta.x * DRAG_SENSITIVITY, delta.y * DRAG_SENSITIVITY);
                        }
                        self.drag_last = pos;
                    }
                }
                InputEvent::PointerUp { x, y } => {
                    if self.dragging && !self.drag_moved {
                        // Click (not a drag) → pick a body
                        let ray = ctx.camera.screen_ray(*x, *y);
                        if let Some(id) = pick(ctx.scene.iter(), &ray, HIT_RADIUS_EXTRA) {
                            self.select_entity(ctx, id);
                        }
                    }
                    self.dragging = false;
                    self.drag_moved = false;
                }
                InputEvent::HandPose { thumb, index } => {
                    self.gesture = GestureStatus::Tracking;
                    self.last_zone = Some(self.estimator.apply_pose(*thumb, *index, &mut self.zoom));
                }
                InputEvent::HandLost => {
                    if self.gesture != GestureStatus::Unavailable {
                        self.gesture = GestureStatus::NoHand;
                    }
                }
                InputEvent::GestureUnavailable { reason } => {
                    log::warn!("gesture zoom unavailable: {}", reason);
                    self.gesture = GestureStatus::Unavailable;
                    self.last_zone = None;
                }
                InputEvent::TextLoaded { request, body } => self.on_text(ctx, *request, body),
                InputEvent::TextFailed { request, reason } => self.on_text_failed(*request, reason),
                _ => {}
            }
        }
    }

    fn advance_bodies(&mut self, scene: &mut Scene, dt: f32) {
        let orbit_dt = dt * self.config.time_scale;
        for body in self.planets.iter_mut().chain(self.neos.iter_mut()) {
            body.orbit.advance(orbit_dt);
            if let Some(entity) = scene.get_mut(body.id) {
                entity.pos = body.orbit.position();
                entity.rotation = (entity.rotation + bodies::SPIN_RATE * dt).rem_euclid(std::f32::consts::TAU);
            }
        }
    }

    fn selected_body(&self) -> Option<&Orbiter> {
        match self.selection.as_ref()?.body() {
            SelectedBody::Planet(i) => self.planets.get(*i),
            SelectedBody::Neo(i) => self.neos.get(*i),
            SelectedBody::Unresolved(_) => None,
        }
    }

    fn draw_paths(&self, ctx: &mut EngineContext) {
        for planet in &self.planets {
            ctx.paths.stroke_circle_xz(Vec3::ZERO, planet.orbit.distance(), ORBIT_SEGMENTS, PLANET_PATH_COLOR);
        }
        for neo in &self.neos {
            ctx.paths.stroke_circle_xz(Vec3::ZERO, neo.orbit.distance(), ORBIT_SEGMENTS, NEO_PATH_COLOR);
        }

        if let Some(body) = self.selected_body() {
            let radius = ctx.scene.get(body.id).map_or(bodies::PLANET_RADIUS, Entity::radius);
            let phase = (self.elapsed * RING_PULSE_HZ).fract();
            let t = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
            let alpha = ease(0.35, 1.0, t, Easing::SineInOut);
            ctx.paths.stroke_circle_xz(
                body.orbit.position(),
                (radius * RING_SCALE).max(1.0),
                RING_SEGMENTS,
                LineColor::YELLOW.with_alpha(alpha),
            );
        }
    }

    fn emit_events(&self, ctx: &mut EngineContext) {
        let (kind, index, state) = match self.selection.as_ref() {
            Some(s) => (
                s.body().code(),
                s.body().index().map_or(-1.0, |i| i as f32),
                s.state().code(),
            ),
            None => (0.0, -1.0, 0.0),
        };
        ctx.emit_event(GameEvent { kind: EVENT_SELECTION, a: kind, b: index, c: state });

        ctx.emit_event(GameEvent {
            kind: EVENT_ZOOM,
            a: self.zoom.current(),
            b: self.zoom.target(),
            c: 0.0,
        });

        if let Some(selection) = self.selection.as_ref() {
            let panel = selection.panel();
            ctx.emit_event(GameEvent {
                kind: EVENT_INFO_PAGE,
                a: panel.page() as f32,
                b: panel.total_pages() as f32,
                c: panel.current_lines().len() as f32,
            });
        }

        ctx.emit_event(GameEvent {
            kind: EVENT_FEED,
            a: self.feed.code(),
            b: self.neo_records.len() as f32,
            c: 0.0,
        });

        let zone = match self.last_zone {
            Some(PinchZone::Near) => -1.0,
            Some(PinchZone::Far) => 1.0,
            _ => 0.0,
        };
        ctx.emit_event(GameEvent { kind: EVENT_GESTURE, a: self.gesture.code(), b: zone, c: 0.0 });
    }
}

impl Default for Orrery {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Orrery {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_bodies: 1 + bodies::STAR_COUNT + PLANET_COUNT + MAX_NEOS,
            max_events: 64,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        // ── Sun ──────────────────────────────────────────────────────
        let sun_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(sun_id)
                .with_tag("sun")
                .with_mesh(
                    MeshComponent::sphere(bodies::SUN_RADIUS, bodies::SUN_COLOR)
                        .with_emissive(bodies::SUN_EMISSIVE)
                        .with_model(bodies::SUN_MODEL),
                ),
        );

        // ── Stars ────────────────────────────────────────────────────
        for pos in bodies::star_positions() {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag("star")
                    .with_pos(pos)
                    .with_mesh(MeshComponent::sphere(bodies::STAR_RADIUS, Color::WHITE).with_emissive(1.0)),
            );
        }

        // ── Planets ──────────────────────────────────────────────────
        self.planets.clear();
        for desc in &PLANETS {
            let orbit = desc.orbit();
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(desc.name)
                    .with_pos(orbit.position())
                    .with_mesh(MeshComponent::sphere(bodies::PLANET_RADIUS, desc.color()).with_model(desc.name))
                    .pickable(),
            );
            self.planets.push(Orbiter { id, orbit });
        }

        // ── Lighting ─────────────────────────────────────────────────
        ctx.lights.set_ambient_level(0.5);
        ctx.lights.add(PointLight::new(Vec3::new(10.0, 10.0, 10.0), [1.0, 1.0, 1.0], 1.0));
        ctx.lights.add(PointLight::new(Vec3::ZERO, [1.0, 0.9, 0.6], 1.5).with_range(400.0));

        // ── Camera ───────────────────────────────────────────────────
        ctx.camera.target = Vec3::ZERO;
        ctx.camera.distance = self.zoom.current();
        self.home_yaw = ctx.camera.yaw;
        self.home_pitch = ctx.camera.pitch;

        log::info!("orrery: {} bodies spawned", ctx.scene.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        let dt = if dt > 0.0 { dt } else { 0.0 };
        if !self.started {
            self.started = true;
            if self.feed == FeedStatus::Idle {
                self.feed = FeedStatus::Pending(ctx.request_text(self.config.feed_url()));
            }
        }

        self.handle_input(ctx, input);

        self.elapsed += dt;
        self.advance_bodies(&mut ctx.scene, dt);

        ctx.camera.distance = self.smoother.step(&mut self.zoom);

        self.draw_paths(ctx);
        self.emit_events(ctx);
    }
}
