// extensions/mod.rs
//
// Optional extension modules for the engine.
// These are decoupled from core Entity/Scene; pure helpers games opt into.

pub mod easing;

pub use easing::{lerp, lerp_vec3, smoothing_factor};
