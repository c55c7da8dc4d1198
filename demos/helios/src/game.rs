/// Helios: interactive 3D solar system.
///
/// Sun, eight planets on kinematic ellipses, orbit paths, Saturn's rings.
/// The HUD talks to the game through custom input events and reads game
/// events back. The renderer reports picks (click / hover) per entity.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;
use helios_engine::api::game::GameConfig;
use helios_engine::components::mesh::{MeshComponent, SDFColor};
use helios_engine::input::queue::{InputEvent, InputQueue};
use helios_engine::*;

use crate::bodies::{self, PlanetSpec, PLANETS};
use crate::camera_rig::CameraController;
use crate::gesture::GestureSimulator;
use crate::orbit::OrbitSystem;
use crate::settings::HeliosSettings;
use crate::view_state::{ChangeSet, Gesture, ViewState};

// ── Custom event kinds from the HUD ──────────────────────────────────

/// a = planet index, negative for none.
pub const CUSTOM_SELECT_PLANET: u32 = 1;
/// a = planet index, negative for none.
pub const CUSTOM_HOVER_PLANET: u32 = 2;
/// a = simulation speed (clamped to the slider range).
pub const CUSTOM_SET_SPEED: u32 = 3;
/// a = gesture code.
pub const CUSTOM_SIMULATE_GESTURE: u32 = 4;
pub const CUSTOM_TOGGLE_GESTURES: u32 = 5;

// ── Game event kinds to the HUD ──────────────────────────────────────

/// a = active index (-1), b = camera mode (0 orbital, 1 locked), c = hovered index (-1).
pub const EVENT_SELECTION: f32 = 1.0;
/// a = simulation speed.
pub const EVENT_SPEED: f32 = 2.0;
/// a = gesture code, b = confidence, c = gestures enabled (0/1).
pub const EVENT_GESTURE: f32 = 3.0;
/// a = capture status code.
pub const EVENT_CAPTURE: f32 = 4.0;
/// a = active index, b = distance from the sun, c = orbital angle in [0, 2π).
pub const EVENT_TELEMETRY: f32 = 5.0;

// ── Orbit paths ──────────────────────────────────────────────────────

const ORBIT_COLOR: (f32, f32, f32) = (1.0, 1.0, 1.0);
/// Half-width of the circular path; elliptical paths are slightly wider.
const CIRCLE_PATH_HALF_WIDTH: f32 = 0.1;
const ELLIPSE_PATH_HALF_WIDTH: f32 = 0.15;
const ORBIT_ALPHA_ACTIVE: f32 = 0.3;
const ORBIT_ALPHA_IDLE: f32 = 0.08;

const HIGHLIGHT_EMISSIVE: f32 = 0.1;
const PLANET_SHININESS: f32 = 16.0;

fn color(rgb: (f32, f32, f32)) -> SDFColor {
    SDFColor::new(rgb.0, rgb.1, rgb.2)
}

fn index_or_none(index: Option<usize>) -> f32 {
    index.map(|i| i as f32).unwrap_or(-1.0)
}

/// Planet id for a HUD index. Negative means none; fractional or
/// out-of-range indices are unknown and also mean none.
fn planet_id_from_index(a: f32) -> Option<&'static str> {
    if !a.is_finite() || a < 0.0 {
        return None;
    }
    let planet = if a.fract() == 0.0 { PLANETS.get(a as usize) } else { None };
    if planet.is_none() {
        log::warn!("unknown planet index {a}, treating as none");
    }
    planet.map(|p| p.id)
}

pub struct Helios {
    settings: HeliosSettings,
    view: ViewState,
    orbits: OrbitSystem,
    gestures: GestureSimulator,
    camera: CameraController,
    /// Fields changed since the HUD was last told, filled by a view subscription.
    hud_dirty: Rc<Cell<ChangeSet>>,
    /// Capture status last reported to the HUD.
    reported_capture: Option<CaptureStatus>,

    // Entity IDs
    sun_ids: Vec<EntityId>,
    planet_ids: Vec<EntityId>,
    orbit_path_ids: Vec<EntityId>,
    saturn_ring_id: Option<EntityId>,
}

impl Helios {
    pub fn new() -> Self {
        let settings = HeliosSettings::default();
        let mut view = ViewState::new();
        let hud_dirty = Rc::new(Cell::new(ChangeSet::ALL));
        let sink = Rc::clone(&hud_dirty);
        view.subscribe(
            ChangeSet::ALL,
            Box::new(move |_, changed| sink.set(sink.get() | changed)),
        );

        Self {
            orbits: OrbitSystem::with_angles(&PLANETS, settings.simulation.spin_rate, &[]),
            settings,
            view,
            gestures: GestureSimulator::new(),
            camera: CameraController::new(),
            hud_dirty,
            reported_capture: None,
            sun_ids: Vec::new(),
            planet_ids: Vec::new(),
            orbit_path_ids: Vec::new(),
            saturn_ring_id: None,
        }
    }

    fn planet_index_of(&self, entity: EntityId) -> Option<usize> {
        self.planet_ids.iter().position(|&id| id == entity)
    }

    // ── Scene construction ─────────────────────────────────────────

    fn spawn_sun(&mut self, ctx: &mut EngineContext) {
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id).with_tag("sun").with_mesh(
                MeshComponent::sphere(bodies::SUN_RADIUS, color(bodies::SUN_COLOR))
                    .with_emissive(bodies::SUN_EMISSIVE)
                    .with_shininess(8.0),
            ),
        );
        self.sun_ids.push(id);

        for &(scale, rgb, alpha) in &bodies::CORONA_SHELLS {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id).with_tag("corona").with_mesh(
                    MeshComponent::sphere(bodies::SUN_RADIUS * scale, color(rgb))
                        .with_emissive(1.0)
                        .with_alpha(alpha),
                ),
            );
            self.sun_ids.push(id);
        }
    }

    fn spawn_planet(&mut self, ctx: &mut EngineContext, index: usize, spec: &PlanetSpec) {
        let Some(track) = self.orbits.track(index) else {
            return;
        };
        let shape = track.shape;
        let position = track.position;

        // Orbit path, drawn around the ellipse's geometric center
        let half_width = if shape.e == 0.0 {
            CIRCLE_PATH_HALF_WIDTH
        } else {
            ELLIPSE_PATH_HALF_WIDTH
        };
        let path_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(path_id)
                .with_tag(format!("orbit:{}", spec.id))
                .with_pos(shape.center())
                .with_mesh(
                    MeshComponent::ring(shape.a - half_width, shape.a + half_width, color(ORBIT_COLOR))
                        .with_squash(shape.squash())
                        .with_alpha(ORBIT_ALPHA_IDLE)
                        .with_shininess(0.0),
                ),
        );
        self.orbit_path_ids.push(path_id);

        let tint = SDFColor::from_hex(spec.color).unwrap_or_default();
        let id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(id)
                .with_tag(spec.id)
                .with_pos(position)
                .with_mesh(MeshComponent::sphere(spec.radius, tint).with_shininess(PLANET_SHININESS)),
        );
        self.planet_ids.push(id);

        if index == bodies::SATURN {
            let ring_id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(ring_id)
                    .with_tag("saturn-rings")
                    .with_pos(position)
                    .with_tilt(bodies::SATURN_RING_TILT)
                    .with_mesh(
                        MeshComponent::ring(
                            spec.radius * bodies::SATURN_RING_INNER,
                            spec.radius * bodies::SATURN_RING_OUTER,
                            color(bodies::SATURN_RING_COLOR),
                        )
                        .with_alpha(bodies::SATURN_RING_ALPHA),
                    ),
            );
            self.saturn_ring_id = Some(ring_id);
        }
    }

    // ── Input ──────────────────────────────────────────────────────

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Click { entity } => {
                    if self.sun_ids.contains(&entity) {
                        self.view.set_active_planet(None);
                    } else if let Some(index) = self.planet_index_of(entity) {
                        let id = PLANETS[index].id;
                        let toggled = if self.view.snapshot().active_id() == Some(id) {
                            None
                        } else {
                            Some(id)
                        };
                        self.view.set_active_planet(toggled);
                    }
                }
                InputEvent::PointerOver { entity } => {
                    if let Some(index) = self.planet_index_of(entity) {
                        self.view.set_hovered_planet(Some(PLANETS[index].id));
                    }
                }
                InputEvent::PointerOut { entity } => {
                    if self.planet_index_of(entity).is_some() {
                        self.view.set_hovered_planet(None);
                    }
                }
                InputEvent::OrbitDrag { dx, dy } => {
                    self.camera
                        .orbit_drag(&mut ctx.camera, &self.view, dx, dy, &self.settings.camera);
                }
                InputEvent::Zoom { delta } => {
                    self.camera
                        .zoom(&mut ctx.camera, &self.view, delta, &self.settings.camera);
                }
                InputEvent::Custom { kind, a, .. } => self.handle_custom(kind, a),
            }
        }
    }

    fn handle_custom(&mut self, kind: u32, a: f32) {
        match kind {
            CUSTOM_SELECT_PLANET => {
                self.view.set_active_planet(planet_id_from_index(a));
            }
            CUSTOM_HOVER_PLANET => {
                self.view.set_hovered_planet(planet_id_from_index(a));
            }
            CUSTOM_SET_SPEED => {
                let speed = self.settings.simulation.clamp_speed(a);
                self.view.set_simulation_speed(speed);
            }
            CUSTOM_SIMULATE_GESTURE if !self.view.gesture_enabled() => {
                log::debug!("gestures disabled, ignoring simulated gesture {a}");
            }
            CUSTOM_SIMULATE_GESTURE => match Gesture::from_code(a) {
                Some(gesture) => {
                    self.gestures
                        .trigger(gesture, &mut self.view, &self.settings.gesture);
                }
                None => log::warn!("unknown gesture code {a}"),
            },
            CUSTOM_TOGGLE_GESTURES => {
                self.view.toggle_gesture_enabled();
            }
            _ => {}
        }
    }

    // ── Per-frame scene sync ───────────────────────────────────────

    /// Copy motion results into the scene and refresh highlights.
    fn sync_scene(&self, ctx: &mut EngineContext) {
        let active = self.view.snapshot().active_id();
        let hovered = self.view.snapshot().hovered_id();

        for (track, &id) in self.orbits.tracks().iter().zip(&self.planet_ids) {
            let lit = active == Some(track.spec.id) || hovered == Some(track.spec.id);
            if let Some(entity) = ctx.scene.get_mut(id) {
                entity.pos = track.position;
                entity.rotation = track.state.spin;
                if let Some(mesh) = entity.mesh.as_mut() {
                    mesh.emissive = if lit { HIGHLIGHT_EMISSIVE } else { 0.0 };
                }
            }
        }

        for (track, &id) in self.orbits.tracks().iter().zip(&self.orbit_path_ids) {
            if let Some(mesh) = ctx.scene.get_mut(id).and_then(|e| e.mesh.as_mut()) {
                mesh.alpha = if active == Some(track.spec.id) {
                    ORBIT_ALPHA_ACTIVE
                } else {
                    ORBIT_ALPHA_IDLE
                };
            }
        }

        if let (Some(ring_id), Some(saturn)) = (self.saturn_ring_id, self.orbits.track(bodies::SATURN)) {
            if let Some(entity) = ctx.scene.get_mut(ring_id) {
                entity.pos = saturn.position;
                entity.rotation = saturn.state.spin;
            }
        }
    }

    // ── HUD events ─────────────────────────────────────────────────

    fn emit_hud_events(&mut self, ctx: &mut EngineContext) {
        let dirty = self.hud_dirty.replace(ChangeSet::NONE);
        let view = self.view.snapshot();

        if dirty.intersects(ChangeSet::ACTIVE | ChangeSet::CAMERA_MODE | ChangeSet::HOVERED) {
            let active = view.active_id().and_then(bodies::index_of);
            let hovered = view.hovered_id().and_then(bodies::index_of);
            ctx.emit_event(GameEvent::new(
                EVENT_SELECTION,
                index_or_none(active),
                view.camera_mode.code(),
                index_or_none(hovered),
            ));
        }
        if dirty.intersects(ChangeSet::SPEED) {
            ctx.emit_event(GameEvent::new(EVENT_SPEED, view.simulation_speed, 0.0, 0.0));
        }
        if dirty.intersects(ChangeSet::GESTURE | ChangeSet::GESTURE_ENABLED) {
            ctx.emit_event(GameEvent::new(
                EVENT_GESTURE,
                view.gesture.code(),
                view.confidence,
                if view.gesture_enabled { 1.0 } else { 0.0 },
            ));
        }

        if self.reported_capture != Some(ctx.capture_status) {
            self.reported_capture = Some(ctx.capture_status);
            ctx.emit_event(GameEvent::new(EVENT_CAPTURE, ctx.capture_status.code(), 0.0, 0.0));
        }

        if let Some(index) = view.active_id().and_then(bodies::index_of) {
            if let Some(track) = self.orbits.track(index) {
                ctx.emit_event(GameEvent::new(
                    EVENT_TELEMETRY,
                    index as f32,
                    track.position.length(),
                    track.state.angle.rem_euclid(std::f32::consts::TAU),
                ));
            }
        }
    }
}

impl Default for Helios {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Helios {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            max_sdf_instances: 64,
            max_events: 64,
            ..GameConfig::default()
        }
    }

    fn load_settings(&mut self, json: &str) {
        match HeliosSettings::from_json(json) {
            Ok(settings) => {
                self.orbits.set_spin_rate(settings.simulation.spin_rate);
                self.settings = settings;
                log::info!("settings loaded");
            }
            Err(err) => log::warn!("{err}; keeping current settings"),
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.orbits = OrbitSystem::new(&PLANETS, self.settings.simulation.spin_rate, &mut ctx.rng);

        ctx.camera = Camera3D::new(self.settings.camera.initial(), Vec3::ZERO);

        self.spawn_sun(ctx);
        for (index, spec) in PLANETS.iter().enumerate() {
            self.spawn_planet(ctx, index, spec);
        }

        ctx.capture_wanted = self.view.gesture_enabled();
        log::info!(
            "solar system ready: {} planets, {} entities",
            self.planet_ids.len(),
            ctx.scene.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        // ── Intents ──────────────────────────────────────────────────
        self.handle_input(ctx, input);
        self.gestures.tick(dt, &mut self.view);

        // ── Motion before camera: the camera reads this step's positions ──
        self.orbits.step(self.view.simulation_speed(), dt);
        self.sync_scene(ctx);

        self.camera
            .update(&mut ctx.camera, &mut self.view, &self.orbits, &self.settings.camera);

        // Highlights may have changed if the camera released the planet
        self.sync_scene(ctx);

        // ── Capture follows the gesture toggle ───────────────────────
        ctx.capture_wanted = self.view.gesture_enabled();

        self.emit_hud_events(ctx);
    }
}

#[cfg(test)]
impl Helios {
    fn view(&self) -> &ViewState {
        &self.view
    }

    fn orbits(&self) -> &OrbitSystem {
        &self.orbits
    }

    fn settings(&self) -> &HeliosSettings {
        &self.settings
    }

    fn planet_entity(&self, index: usize) -> Option<EntityId> {
        self.planet_ids.get(index).copied()
    }

    fn sun_entity(&self) -> Option<EntityId> {
        self.sun_ids.first().copied()
    }
}
