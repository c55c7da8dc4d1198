pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, SDFShape, SDFColor};
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::sdf_instance::{SDFInstance, SDFBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use input::capture::{CaptureDevice, CaptureSession, CaptureStatus, NullCapture};
pub use bridge::protocol::ProtocolLayout;
pub use systems::sdf_render::{build_sdf_buffer, build_sdf_buffer_or_placeholder, RenderError};

// Extensions: decoupled optional helpers
pub use extensions::{lerp, lerp_vec3, smoothing_factor};
