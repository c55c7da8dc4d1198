/// RGB color for SDF rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SDFColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl SDFColor {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string. Returns None for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Default for SDFColor {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// SDF shape primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SDFShape {
    Sphere { radius: f32 },
    /// Flat annulus in the entity's XZ plane. `squash` scales the Z extent
    /// (1.0 = circle, < 1.0 = ellipse with Z semi-axis `outer * squash`).
    Ring { inner: f32, outer: f32, squash: f32 },
}

/// Component for SDF-rendered meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: SDFShape,
    pub color: SDFColor,
    /// Phong specular exponent (default: 32.0).
    pub shininess: f32,
    /// HDR glow multiplier (default: 0.0, values > 0 push into bloom range).
    pub emissive: f32,
    /// Opacity in [0, 1] (default: 1.0).
    pub alpha: f32,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: SDFShape::Sphere { radius: 1.0 },
            color: SDFColor::default(),
            shininess: 32.0,
            emissive: 0.0,
            alpha: 1.0,
        }
    }
}

impl MeshComponent {
    pub fn new(shape: SDFShape, color: SDFColor) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    pub fn sphere(radius: f32, color: SDFColor) -> Self {
        Self::new(SDFShape::Sphere { radius }, color)
    }

    pub fn ring(inner: f32, outer: f32, color: SDFColor) -> Self {
        Self::new(SDFShape::Ring { inner, outer, squash: 1.0 }, color)
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Squash a ring into an ellipse. No effect on spheres.
    pub fn with_squash(mut self, factor: f32) -> Self {
        if let SDFShape::Ring { ref mut squash, .. } = self.shape {
            *squash = factor;
        }
        self
    }

    /// Bounding radius of the shape.
    pub fn radius(&self) -> f32 {
        match self.shape {
            SDFShape::Sphere { radius } => radius,
            SDFShape::Ring { outer, .. } => outer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_channels() {
        let c = SDFColor::from_hex("#FF8000").unwrap();
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn hex_rejects_malformed() {
        assert!(SDFColor::from_hex("FF8000").is_none());
        assert!(SDFColor::from_hex("#CUB895").is_none());
        assert!(SDFColor::from_hex("#FFF").is_none());
    }

    #[test]
    fn squash_only_applies_to_rings() {
        let ring = MeshComponent::ring(9.0, 10.0, SDFColor::default()).with_squash(0.5);
        assert_eq!(ring.shape, SDFShape::Ring { inner: 9.0, outer: 10.0, squash: 0.5 });
        let sphere = MeshComponent::sphere(2.0, SDFColor::default()).with_squash(0.5);
        assert_eq!(sphere.shape, SDFShape::Sphere { radius: 2.0 });
        assert_eq!(sphere.radius(), 2.0);
    }
}
