/// Shared buffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 24 floats]
/// [SDF instances: max_sdf_instances × 16 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::renderer::camera::CameraUniform;
use crate::renderer::sdf_instance::SDFInstance;
use crate::api::types::GameEvent;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_MAX_SDF_INSTANCES: usize = 3;
pub const HEADER_SDF_INSTANCE_COUNT: usize = 4;
pub const HEADER_MAX_EVENTS: usize = 5;
pub const HEADER_EVENT_COUNT: usize = 6;
pub const HEADER_CAPTURE_STATUS: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 2.0;

/// Floats in the camera section (wire format, fixed).
pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;

/// Floats per SDF instance (wire format, fixed).
pub const SDF_INSTANCE_FLOATS: usize = SDFInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format, fixed).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum SDF instances.
    pub max_sdf_instances: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of SDF data section in floats.
    pub sdf_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where camera data begins.
    pub camera_data_offset: usize,
    /// Offset (in floats) where SDF data begins.
    pub sdf_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_sdf_instances: usize, max_events: usize) -> Self {
        let sdf_data_floats = max_sdf_instances * SDF_INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let camera_data_offset = HEADER_FLOATS;
        let sdf_data_offset = camera_data_offset + CAMERA_FLOATS;
        let event_data_offset = sdf_data_offset + sdf_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_sdf_instances,
            max_events,
            sdf_data_floats,
            event_data_floats,
            camera_data_offset,
            sdf_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_sdf_instances, config.max_events)
    }
}
