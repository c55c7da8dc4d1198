use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a settings document was rejected.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("setting '{field}' out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Camera smoothing and framing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Look-at smoothing toward a locked planet, per frame.
    pub locked_look_factor: f32,
    /// Position smoothing toward the shoulder view, per frame.
    pub locked_position_factor: f32,
    /// Look-at smoothing back to the origin in free mode, per frame.
    pub free_look_factor: f32,
    /// Position smoothing toward the overview pose while pointing, per frame.
    pub overview_factor: f32,
    pub overview_position: [f32; 3],
    pub initial_position: [f32; 3],
    /// Shoulder-view direction, scaled by `planet radius × shoulder_radius_scale`.
    pub shoulder_offset: [f32; 3],
    pub shoulder_radius_scale: f32,
    /// Free-orbit distance limits.
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians of orbit per pixel of drag.
    pub orbit_sensitivity: f32,
    /// Distance scale per unit of zoom delta.
    pub zoom_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            locked_look_factor: 0.1,
            locked_position_factor: 0.05,
            free_look_factor: 0.05,
            overview_factor: 0.02,
            overview_position: [0.0, 40.0, 60.0],
            initial_position: [0.0, 20.0, 40.0],
            shoulder_offset: [10.0, 5.0, 10.0],
            shoulder_radius_scale: 0.8,
            min_distance: 10.0,
            max_distance: 200.0,
            orbit_sensitivity: 0.005,
            zoom_sensitivity: 0.001,
        }
    }
}

impl CameraSettings {
    pub fn overview(&self) -> Vec3 {
        Vec3::from_array(self.overview_position)
    }

    pub fn initial(&self) -> Vec3 {
        Vec3::from_array(self.initial_position)
    }

    /// Eye offset from a locked planet of the given radius.
    pub fn shoulder_for(&self, radius: f32) -> Vec3 {
        Vec3::from_array(self.shoulder_offset) * (radius * self.shoulder_radius_scale)
    }
}

/// Simulated gesture behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    pub confidence: f32,
    /// Seconds before a simulated gesture falls back to idle.
    pub reset_after: f32,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            confidence: 0.95,
            reset_after: 2.0,
        }
    }
}

/// Motion tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Axial spin in radians per second at speed 1.
    pub spin_rate: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            spin_rate: 0.6,
            min_speed: 0.0,
            max_speed: 5.0,
        }
    }
}

impl SimulationSettings {
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        if speed.is_nan() {
            return self.min_speed;
        }
        speed.clamp(self.min_speed, self.max_speed)
    }
}

/// Every tunable of the visualizer. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeliosSettings {
    pub camera: CameraSettings,
    pub gesture: GestureSettings,
    pub simulation: SimulationSettings,
}

fn check(field: &'static str, value: f32, ok: bool) -> Result<(), SettingsError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(SettingsError::OutOfRange { field, value })
    }
}

fn check_unit(field: &'static str, value: f32) -> Result<(), SettingsError> {
    check(field, value, (0.0..=1.0).contains(&value))
}

fn check_vec(field: &'static str, v: [f32; 3]) -> Result<(), SettingsError> {
    match v.iter().find(|c| !c.is_finite()) {
        Some(&value) => Err(SettingsError::OutOfRange { field, value }),
        None => Ok(()),
    }
}

impl HeliosSettings {
    /// Parse and validate a settings document.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let cam = &self.camera;
        check_unit("camera.locked_look_factor", cam.locked_look_factor)?;
        check_unit("camera.locked_position_factor", cam.locked_position_factor)?;
        check_unit("camera.free_look_factor", cam.free_look_factor)?;
        check_unit("camera.overview_factor", cam.overview_factor)?;
        check_vec("camera.overview_position", cam.overview_position)?;
        check_vec("camera.initial_position", cam.initial_position)?;
        check_vec("camera.shoulder_offset", cam.shoulder_offset)?;
        check("camera.shoulder_radius_scale", cam.shoulder_radius_scale, cam.shoulder_radius_scale > 0.0)?;
        check("camera.min_distance", cam.min_distance, cam.min_distance > 0.0)?;
        check("camera.max_distance", cam.max_distance, cam.max_distance >= cam.min_distance)?;
        check("camera.orbit_sensitivity", cam.orbit_sensitivity, cam.orbit_sensitivity >= 0.0)?;
        check("camera.zoom_sensitivity", cam.zoom_sensitivity, cam.zoom_sensitivity >= 0.0)?;

        check_unit("gesture.confidence", self.gesture.confidence)?;
        check("gesture.reset_after", self.gesture.reset_after, self.gesture.reset_after >= 0.0)?;

        let sim = &self.simulation;
        check("simulation.spin_rate", sim.spin_rate, true)?;
        check("simulation.min_speed", sim.min_speed, sim.min_speed >= 0.0)?;
        check("simulation.max_speed", sim.max_speed, sim.max_speed >= sim.min_speed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let s = HeliosSettings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.camera.overview(), Vec3::new(0.0, 40.0, 60.0));
        assert_eq!(s.gesture.reset_after, 2.0);
    }

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(HeliosSettings::from_json("{}").unwrap(), HeliosSettings::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let s = HeliosSettings::from_json(
            r#"{ "camera": { "locked_look_factor": 0.2 }, "simulation": { "max_speed": 10 } }"#,
        )
        .unwrap();
        assert_eq!(s.camera.locked_look_factor, 0.2);
        assert_eq!(s.camera.locked_position_factor, 0.05);
        assert_eq!(s.simulation.max_speed, 10.0);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = HeliosSettings::from_json("{ camera: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn out_of_range_factor_is_rejected() {
        let err = HeliosSettings::from_json(r#"{ "camera": { "free_look_factor": 1.5 } }"#)
            .unwrap_err();
        match err {
            SettingsError::OutOfRange { field, value } => {
                assert_eq!(field, "camera.free_look_factor");
                assert_eq!(value, 1.5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn inverted_zoom_limits_are_rejected() {
        let json = r#"{ "camera": { "min_distance": 50, "max_distance": 20 } }"#;
        assert!(HeliosSettings::from_json(json).is_err());
    }

    #[test]
    fn shoulder_offset_scales_with_radius() {
        let cam = CameraSettings::default();
        let v = cam.shoulder_for(1.6);
        assert!((v - Vec3::new(12.8, 6.4, 12.8)).length() < 1e-4);
    }

    #[test]
    fn speed_clamps_to_slider_range() {
        let sim = SimulationSettings::default();
        assert_eq!(sim.clamp_speed(7.0), 5.0);
        assert_eq!(sim.clamp_speed(-1.0), 0.0);
        assert_eq!(sim.clamp_speed(f32::NAN), 0.0);
        assert_eq!(sim.clamp_speed(2.5), 2.5);
    }
}
