/// Camera targeting: free orbit around the sun, or locked onto a planet.
///
/// Each frame the controller picks a goal pose from the view state and moves
/// the camera a fixed fraction of the remaining distance toward it. Planet
/// positions come from a `TargetLocator`, so the controller must run after
/// the motion step.

use glam::Vec3;
use helios_engine::Camera3D;

use crate::orbit::TargetLocator;
use crate::settings::CameraSettings;
use crate::view_state::{Gesture, ViewState};

/// What the controller did this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraStep {
    /// Relaxed toward the origin (and the overview pose while pointing).
    #[default]
    Free,
    /// Followed the active planet.
    Locked,
    /// A planet is active but could not be located; the camera was left alone.
    Missed,
}

#[derive(Debug, Clone, Default)]
pub struct CameraController {
    last: CameraStep,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn last_step(&self) -> CameraStep {
        self.last
    }

    /// Run one frame of targeting.
    ///
    /// A victory gesture releases the active planet. The pose computed for
    /// the planet is still applied this frame; free mode starts next frame.
    pub fn update(
        &mut self,
        camera: &mut Camera3D,
        view: &mut ViewState,
        locator: &impl TargetLocator,
        settings: &CameraSettings,
    ) -> CameraStep {
        let active = view.active_planet();
        let gesture = view.gesture();

        if gesture == Gesture::Victory && active.is_some() {
            view.set_active_planet(None);
        }

        let step = match active {
            Some(planet) => match locator.locate(planet.id) {
                Some(target) => {
                    camera.approach_target(target.position, settings.locked_look_factor);
                    let goal = target.position + settings.shoulder_for(target.radius);
                    camera.approach_position(goal, settings.locked_position_factor);
                    CameraStep::Locked
                }
                None => {
                    log::debug!("camera target {} not found this frame", planet.id);
                    CameraStep::Missed
                }
            },
            None => {
                camera.approach_target(Vec3::ZERO, settings.free_look_factor);
                if gesture == Gesture::Pointing {
                    camera.approach_position(settings.overview(), settings.overview_factor);
                }
                CameraStep::Free
            }
        };

        if step != self.last {
            log::debug!("camera step {:?} -> {:?}", self.last, step);
            self.last = step;
        }
        step
    }

    /// Drag rotates the free camera around its look-at point. Ignored while locked.
    pub fn orbit_drag(
        &self,
        camera: &mut Camera3D,
        view: &ViewState,
        dx: f32,
        dy: f32,
        settings: &CameraSettings,
    ) {
        if view.active_planet().is_some() || !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        camera.orbit(-dx * settings.orbit_sensitivity, dy * settings.orbit_sensitivity);
    }

    /// Positive `delta` moves the free camera closer. Ignored while locked.
    pub fn zoom(&self, camera: &mut Camera3D, view: &ViewState, delta: f32, settings: &CameraSettings) {
        if view.active_planet().is_some() || !delta.is_finite() {
            return;
        }
        let scale = (-delta * settings.zoom_sensitivity).exp();
        camera.dolly(scale, settings.min_distance, settings.max_distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::Target;

    /// Locator with one fixed planet, or none.
    struct Fixed(Option<(&'static str, Target)>);

    impl TargetLocator for Fixed {
        fn locate(&self, id: &str) -> Option<Target> {
            self.0.filter(|(known, _)| *known == id).map(|(_, t)| t)
        }
    }

    fn earth_at(position: Vec3) -> Fixed {
        Fixed(Some(("earth", Target { position, radius: 1.6 })))
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn free_mode_relaxes_look_at_to_origin() {
        let mut cam = Camera3D::new(Vec3::new(0.0, 20.0, 40.0), Vec3::new(10.0, 0.0, 0.0));
        let mut view = ViewState::new();
        let mut ctl = CameraController::new();
        let step = ctl.update(&mut cam, &mut view, &Fixed(None), &CameraSettings::default());
        assert_eq!(step, CameraStep::Free);
        assert!(close(cam.target, Vec3::new(9.5, 0.0, 0.0)));
        // No pull on position without a pointing gesture
        assert_eq!(cam.position, Vec3::new(0.0, 20.0, 40.0));
    }

    #[test]
    fn pointing_pulls_toward_overview() {
        let mut cam = Camera3D::new(Vec3::ZERO + Vec3::Z * 100.0, Vec3::ZERO);
        let mut view = ViewState::new();
        view.set_gesture(Gesture::Pointing, 0.95);
        let mut ctl = CameraController::new();
        ctl.update(&mut cam, &mut view, &Fixed(None), &CameraSettings::default());
        let expected = Vec3::new(0.0, 0.0, 100.0).lerp(Vec3::new(0.0, 40.0, 60.0), 0.02);
        assert!(close(cam.position, expected));
    }

    #[test]
    fn locked_mode_follows_planet() {
        let planet = Vec3::new(22.0, 0.0, 0.0);
        let mut cam = Camera3D::default();
        let mut view = ViewState::new();
        view.set_active_planet(Some("earth"));
        let mut ctl = CameraController::new();
        let step = ctl.update(&mut cam, &mut view, &earth_at(planet), &CameraSettings::default());
        assert_eq!(step, CameraStep::Locked);
        assert!(close(cam.target, Vec3::ZERO.lerp(planet, 0.1)));
        let goal = planet + Vec3::new(10.0, 5.0, 10.0) * (1.6 * 0.8);
        assert!(close(cam.position, Vec3::new(0.0, 20.0, 40.0).lerp(goal, 0.05)));
    }

    #[test]
    fn locked_mode_converges_on_shoulder_view() {
        let planet = Vec3::new(0.0, 0.0, -30.0);
        let mut cam = Camera3D::default();
        let mut view = ViewState::new();
        view.set_active_planet(Some("earth"));
        let mut ctl = CameraController::new();
        let locator = earth_at(planet);
        for _ in 0..600 {
            ctl.update(&mut cam, &mut view, &locator, &CameraSettings::default());
        }
        assert!(close(cam.target, planet));
        assert!(close(cam.position, planet + Vec3::new(12.8, 6.4, 12.8)));
    }

    #[test]
    fn lookup_miss_leaves_camera_untouched() {
        let mut cam = Camera3D::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        let mut view = ViewState::new();
        view.set_active_planet(Some("mars"));
        let mut ctl = CameraController::new();
        let step = ctl.update(&mut cam, &mut view, &earth_at(Vec3::ZERO), &CameraSettings::default());
        assert_eq!(step, CameraStep::Missed);
        assert_eq!(cam.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cam.target, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(view.snapshot().active_id(), Some("mars"));
    }

    #[test]
    fn victory_releases_planet_after_one_locked_frame() {
        let planet = Vec3::new(22.0, 0.0, 0.0);
        let locator = earth_at(planet);
        let settings = CameraSettings::default();
        let mut cam = Camera3D::default();
        let mut view = ViewState::new();
        let mut ctl = CameraController::new();

        view.set_active_planet(Some("earth"));
        view.set_gesture(Gesture::Victory, 0.95);

        assert_eq!(ctl.update(&mut cam, &mut view, &locator, &settings), CameraStep::Locked);
        assert!(view.active_planet().is_none());
        assert_eq!(view.camera_mode().label(), "ORBITAL");
        assert_eq!(ctl.update(&mut cam, &mut view, &locator, &settings), CameraStep::Free);
    }

    #[test]
    fn drag_and_zoom_only_in_free_mode() {
        let settings = CameraSettings::default();
        let ctl = CameraController::new();
        let mut view = ViewState::new();
        let mut cam = Camera3D::default();

        ctl.orbit_drag(&mut cam, &view, 100.0, 0.0, &settings);
        assert_ne!(cam.position, Vec3::new(0.0, 20.0, 40.0));
        let before = cam.distance();
        ctl.zoom(&mut cam, &view, 100.0, &settings);
        assert!(cam.distance() < before);

        view.set_active_planet(Some("earth"));
        let frozen = cam.position;
        ctl.orbit_drag(&mut cam, &view, 100.0, 50.0, &settings);
        ctl.zoom(&mut cam, &view, -500.0, &settings);
        assert_eq!(cam.position, frozen);
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let settings = CameraSettings::default();
        let ctl = CameraController::new();
        let view = ViewState::new();
        let mut cam = Camera3D::default();
        for _ in 0..100 {
            ctl.zoom(&mut cam, &view, 1000.0, &settings);
        }
        assert!((cam.distance() - settings.min_distance).abs() < 1e-3);
        for _ in 0..100 {
            ctl.zoom(&mut cam, &view, -1000.0, &settings);
        }
        assert!((cam.distance() - settings.max_distance).abs() < 1e-2);
    }
}
