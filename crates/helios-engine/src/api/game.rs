use crate::api::types::{EntityId, GameEvent};
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::input::capture::CaptureStatus;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;

/// Default RNG seed for contexts created without an explicit seed.
const DEFAULT_SEED: u64 = 42;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Upper bound on fixed steps run for a single frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Maximum number of SDF instances (default: 64).
    pub max_sdf_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            max_sdf_instances: 64,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply a JSON settings document. Called before init when the host
    /// provides one. Games without tunables ignore it.
    fn load_settings(&mut self, _json: &str) {}

    /// Setup initial state, spawn entities, place the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed-timestep tick. `dt` is the fixed step in seconds.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera3D,
    pub rng: Rng,
    pub events: Vec<GameEvent>,
    /// Whether the game wants the capture device running.
    /// The runner reconciles the device against this after every update.
    pub capture_wanted: bool,
    /// Last capture status reported by the device, refreshed before every update.
    pub capture_status: CaptureStatus,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Create a context whose RNG starts from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera3D::default(),
            rng: Rng::new(seed),
            events: Vec::new(),
            capture_wanted: false,
            capture_status: CaptureStatus::Inactive,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the UI layer.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert_ne!(a, b);
        assert!(b.0 > a.0);
    }

    #[test]
    fn clear_frame_data_drops_events() {
        let mut ctx = EngineContext::new();
        ctx.emit_event(GameEvent::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(ctx.events.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn same_seed_gives_same_rng_stream() {
        let mut a = EngineContext::with_seed(7);
        let mut b = EngineContext::with_seed(7);
        assert_eq!(a.rng.next_f32(), b.rng.next_f32());
    }
}
