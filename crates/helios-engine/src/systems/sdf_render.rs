use thiserror::Error;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::mesh::SDFShape;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance, SHAPE_RING, SHAPE_SPHERE};

/// Why a frame's SDF buffer could not be built.
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("SDF buffer full: {capacity} instances")]
    Overflow { capacity: usize },

    #[error("entity {0:?} produced a non-finite instance")]
    NonFinite(EntityId),
}

/// Convert one entity into an SDF instance, if it is visible.
fn instance_for(entity: &Entity) -> Option<SDFInstance> {
    if !entity.active {
        return None;
    }
    let mesh = entity.mesh.as_ref()?;
    let (shape, radius, inner, squash) = match mesh.shape {
        SDFShape::Sphere { radius } => (SHAPE_SPHERE, radius, 0.0, 1.0),
        SDFShape::Ring { inner, outer, squash } => (SHAPE_RING, outer, inner, squash),
    };
    Some(SDFInstance {
        x: entity.pos.x,
        y: entity.pos.y,
        z: entity.pos.z,
        radius,
        rotation: entity.rotation,
        tilt: entity.tilt,
        r: mesh.color.r,
        g: mesh.color.g,
        b: mesh.color.b,
        alpha: mesh.alpha,
        emissive: mesh.emissive,
        shininess: mesh.shininess,
        shape,
        inner,
        squash,
        _pad0: 0.0,
    })
}

/// Build the SDF instance buffer from entities with mesh components.
/// Stops at the first entity that cannot be encoded.
pub fn build_sdf_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut SDFBuffer,
) -> Result<(), RenderError> {
    buffer.clear();
    for entity in entities {
        let Some(instance) = instance_for(entity) else {
            continue;
        };
        if !instance.is_finite() {
            return Err(RenderError::NonFinite(entity.id));
        }
        if !buffer.push(instance) {
            return Err(RenderError::Overflow {
                capacity: buffer.capacity(),
            });
        }
    }
    Ok(())
}

/// The fixed visual shown in place of a frame that failed to build:
/// a single red marker at the origin.
pub fn placeholder_instance() -> SDFInstance {
    SDFInstance {
        radius: 1.0,
        r: 1.0,
        alpha: 1.0,
        emissive: 1.0,
        shape: SHAPE_SPHERE,
        squash: 1.0,
        ..Default::default()
    }
}

/// Build the buffer, substituting the placeholder on failure.
/// Render failures never propagate past this point.
pub fn build_sdf_buffer_or_placeholder<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut SDFBuffer,
) {
    if let Err(err) = build_sdf_buffer(entities, buffer) {
        log::error!("render: {err}; showing placeholder");
        buffer.clear();
        buffer.push(placeholder_instance());
    }
}
