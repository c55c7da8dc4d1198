use bytemuck::{Pod, Zeroable};

/// Shape codes for `SDFInstance::shape`.
pub const SHAPE_SPHERE: f32 = 0.0;
pub const SHAPE_RING: f32 = 1.0;

/// Per-instance SDF render data.
/// Written to the shared buffer for the TypeScript renderer.
/// 16 floats = 64 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SDFInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Sphere radius, or ring outer radius.
    pub radius: f32,
    /// Spin about local Y (radians).
    pub rotation: f32,
    /// Tilt about world X (radians).
    pub tilt: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
    pub emissive: f32,
    pub shininess: f32,
    /// `SHAPE_SPHERE` or `SHAPE_RING`.
    pub shape: f32,
    /// Ring inner radius (0 for spheres).
    pub inner: f32,
    /// Ring Z squash (1 for spheres).
    pub squash: f32,
    pub _pad0: f32,
}

impl SDFInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Whether every float is finite (NaN/inf would poison the GPU pass).
    pub fn is_finite(&self) -> bool {
        bytemuck::cast_ref::<SDFInstance, [f32; Self::FLOATS]>(self)
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Bounded buffer of SDF instances.
pub struct SDFBuffer {
    instances: Vec<SDFInstance>,
    max: usize,
}

impl SDFBuffer {
    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
            max,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Push an instance. Returns false (and drops it) when the buffer is full.
    pub fn push(&mut self, instance: SDFInstance) -> bool {
        if self.instances.len() >= self.max {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances(&self) -> &[SDFInstance] {
        &self.instances
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdf_instance_is_64_bytes() {
        assert_eq!(std::mem::size_of::<SDFInstance>(), 64);
        assert_eq!(SDFInstance::STRIDE_BYTES, 64);
    }

    #[test]
    fn push_respects_capacity() {
        let mut buf = SDFBuffer::with_capacity(2);
        assert!(buf.push(SDFInstance::default()));
        assert!(buf.push(SDFInstance::default()));
        assert!(!buf.push(SDFInstance::default()));
        assert_eq!(buf.instance_count(), 2);
    }

    #[test]
    fn finiteness_check() {
        let mut inst = SDFInstance::default();
        assert!(inst.is_finite());
        inst.z = f32::NAN;
        assert!(!inst.is_finite());
    }
}
