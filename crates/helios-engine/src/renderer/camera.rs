use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::extensions::easing::{lerp_vec3, smoothing_factor};

/// Keeps orbiting away from the poles, where look-at with a fixed up vector degenerates.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Perspective camera aimed at a look-at point.
/// The rendering collaborator reads `uniform()` each frame.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera is aimed at.
    pub target: Vec3,
    /// World up direction.
    pub up: Vec3,
    /// Vertical field of view (radians).
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
/// 24 floats: view-projection matrix, eye, target (w unused).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub target: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 24;
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 20.0, 40.0), Vec3::ZERO)
    }
}

impl Camera3D {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 2000.0,
        }
    }

    /// View matrix (world to camera).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Perspective projection, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            eye: self.position.extend(1.0).to_array(),
            target: self.target.extend(1.0).to_array(),
        }
    }

    /// Resize the viewport. Zero-height viewports keep the old aspect.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        if viewport_width > 0.0 && viewport_height > 0.0 {
            self.aspect = viewport_width / viewport_height;
        }
    }

    /// Move the eye a fraction `factor` of the way toward `goal`.
    pub fn approach_position(&mut self, goal: Vec3, factor: f32) {
        self.position = lerp_vec3(self.position, goal, smoothing_factor(factor));
    }

    /// Move the look-at point a fraction `factor` of the way toward `goal`.
    pub fn approach_target(&mut self, goal: Vec3, factor: f32) {
        self.target = lerp_vec3(self.target, goal, smoothing_factor(factor));
    }

    /// Distance from eye to look-at point.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Rotate the eye around the look-at point by `yaw` (about world Y) and
    /// `pitch` (toward/away from the pole), keeping the distance.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let current_yaw = offset.x.atan2(offset.z);
        let current_pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        let new_yaw = current_yaw + yaw;
        let new_pitch = (current_pitch + pitch).clamp(-MAX_PITCH, MAX_PITCH);
        let dir = Vec3::new(
            new_pitch.cos() * new_yaw.sin(),
            new_pitch.sin(),
            new_pitch.cos() * new_yaw.cos(),
        );
        self.position = self.target + dir * radius;
    }

    /// Scale the eye's distance to the look-at point, clamped to `[min, max]`.
    pub fn dolly(&mut self, scale: f32, min: f32, max: f32) {
        let offset = self.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON || !scale.is_finite() || scale <= 0.0 {
            return;
        }
        let new_radius = (radius * scale).clamp(min, max);
        self.position = self.target + offset * (new_radius / radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-4
    }

    #[test]
    fn default_pose_matches_overview() {
        let cam = Camera3D::default();
        assert_eq!(cam.position, Vec3::new(0.0, 20.0, 40.0));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn uniform_carries_eye_and_target() {
        let cam = Camera3D::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        let u = cam.uniform();
        assert_eq!(u.eye, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(u.target, [4.0, 5.0, 6.0, 1.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }

    #[test]
    fn approach_moves_fraction_of_gap() {
        let mut cam = Camera3D::new(Vec3::ZERO, Vec3::ZERO);
        cam.approach_position(Vec3::new(100.0, 0.0, 0.0), 0.05);
        assert!(close(cam.position, Vec3::new(5.0, 0.0, 0.0)));
        cam.approach_target(Vec3::new(0.0, 10.0, 0.0), 0.1);
        assert!(close(cam.target, Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn orbit_keeps_distance() {
        let mut cam = Camera3D::default();
        let before = cam.distance();
        cam.orbit(0.7, 0.3);
        assert!((cam.distance() - before).abs() < 1e-3);
        assert!(cam.position != Vec3::new(0.0, 20.0, 40.0));
    }

    #[test]
    fn orbit_pitch_is_clamped_below_pole() {
        let mut cam = Camera3D::default();
        cam.orbit(0.0, 10.0);
        let offset = (cam.position - cam.target).normalize();
        assert!(offset.y < 1.0);
        assert!(offset.y > 0.99);
    }

    #[test]
    fn dolly_clamps_distance() {
        let mut cam = Camera3D::new(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO);
        cam.dolly(0.01, 10.0, 200.0);
        assert!((cam.distance() - 10.0).abs() < 1e-4);
        cam.dolly(1000.0, 10.0, 200.0);
        assert!((cam.distance() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = Camera3D::default();
        cam.resize(1920.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        cam.resize(100.0, 0.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }
}
