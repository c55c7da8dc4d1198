/// Kinematic orbits: each planet runs its own ellipse with the sun at a focus.
/// Pure math plus the id → position table the camera reads.

use glam::Vec3;
use helios_engine::Rng;

use crate::bodies::PlanetSpec;

/// Ellipse in the XZ plane with one focus at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitShape {
    /// Semi-major axis.
    pub a: f32,
    /// Eccentricity in [0, 1).
    pub e: f32,
    /// Semi-minor axis, `a·√(1−e²)`.
    pub b: f32,
    /// Center-to-focus distance, `a·e`.
    pub c: f32,
}

impl OrbitShape {
    pub fn new(a: f32, e: f32) -> Self {
        Self {
            a,
            e,
            b: a * (1.0 - e * e).sqrt(),
            c: a * e,
        }
    }

    pub fn from_spec(spec: &PlanetSpec) -> Self {
        Self::new(spec.distance, spec.orbit.eccentricity)
    }

    /// World position at orbital angle `theta`.
    pub fn position(&self, theta: f32) -> Vec3 {
        let (sin, cos) = theta.sin_cos();
        if self.e == 0.0 {
            Vec3::new(self.a * cos, 0.0, self.a * sin)
        } else {
            Vec3::new(self.a * cos - self.c, 0.0, self.b * sin)
        }
    }

    /// Closest approach to the focus, `a(1−e)`.
    #[cfg(test)]
    pub fn perihelion_distance(&self) -> f32 {
        self.a * (1.0 - self.e)
    }

    /// Farthest distance from the focus, `a(1+e)`.
    #[cfg(test)]
    pub fn aphelion_distance(&self) -> f32 {
        self.a * (1.0 + self.e)
    }

    /// Geometric center of the ellipse (the orbit path is drawn around it).
    pub fn center(&self) -> Vec3 {
        if self.e == 0.0 {
            Vec3::ZERO
        } else {
            Vec3::new(-self.c, 0.0, 0.0)
        }
    }

    /// Z extent relative to X extent, `b/a`.
    pub fn squash(&self) -> f32 {
        if self.a > 0.0 {
            self.b / self.a
        } else {
            1.0
        }
    }
}

/// Mutable per-planet angles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitalState {
    /// Orbital angle (radians, unbounded).
    pub angle: f32,
    /// Axial spin (radians, unbounded).
    pub spin: f32,
}

impl OrbitalState {
    pub fn new(angle: f32) -> Self {
        Self { angle, spin: 0.0 }
    }

    /// `θ += speed · sim_speed · dt`, and the same scaling for axial spin.
    pub fn advance(&mut self, speed: f32, sim_speed: f32, spin_rate: f32, dt: f32) {
        let scale = sim_speed * dt;
        self.angle += speed * scale;
        self.spin += spin_rate * scale;
    }
}

/// Where a lockable body is right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Vec3,
    pub radius: f32,
}

/// Resolves a planet id to its current world position.
/// The camera controller depends on this rather than on the scene.
pub trait TargetLocator {
    fn locate(&self, id: &str) -> Option<Target>;
}

/// One planet as tracked by the motion model.
#[derive(Debug, Clone)]
pub struct Track {
    pub spec: &'static PlanetSpec,
    pub shape: OrbitShape,
    pub state: OrbitalState,
    /// Position after the most recent step.
    pub position: Vec3,
}

/// Advances every planet and keeps the id → position table current.
#[derive(Debug, Clone)]
pub struct OrbitSystem {
    tracks: Vec<Track>,
    spin_rate: f32,
}

impl OrbitSystem {
    /// Start each planet at a random angle.
    pub fn new(specs: &'static [PlanetSpec], spin_rate: f32, rng: &mut Rng) -> Self {
        let angles: Vec<f32> = specs.iter().map(|_| rng.next_angle()).collect();
        Self::with_angles(specs, spin_rate, &angles)
    }

    /// Start each planet at the given angle (missing entries start at 0).
    pub fn with_angles(specs: &'static [PlanetSpec], spin_rate: f32, angles: &[f32]) -> Self {
        let tracks = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let shape = OrbitShape::from_spec(spec);
                let state = OrbitalState::new(angles.get(i).copied().unwrap_or(0.0));
                Track {
                    spec,
                    shape,
                    state,
                    position: shape.position(state.angle),
                }
            })
            .collect();
        Self { tracks, spin_rate }
    }

    pub fn set_spin_rate(&mut self, spin_rate: f32) {
        self.spin_rate = spin_rate;
    }

    /// Advance all planets by `dt` seconds at `sim_speed`.
    pub fn step(&mut self, sim_speed: f32, dt: f32) {
        for track in &mut self.tracks {
            track.state.advance(track.spec.speed, sim_speed, self.spin_rate, dt);
            track.position = track.shape.position(track.state.angle);
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }
}

impl TargetLocator for OrbitSystem {
    fn locate(&self, id: &str) -> Option<Target> {
        self.tracks.iter().find(|t| t.spec.id == id).map(|t| Target {
            position: t.position,
            radius: t.spec.radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, MARS, MERCURY, PLANETS};
    use std::f32::consts::TAU;

    const SAMPLES: usize = 2000;

    fn distance_range(shape: &OrbitShape) -> (f32, f32) {
        (0..SAMPLES)
            .map(|i| shape.position(i as f32 / SAMPLES as f32 * TAU).length())
            .fold((f32::MAX, f32::MIN), |(lo, hi), d| (lo.min(d), hi.max(d)))
    }

    #[test]
    fn circular_orbit_keeps_radius() {
        let shape = OrbitShape::new(10.0, 0.0);
        for i in 0..64 {
            let theta = i as f32 * 0.37 - 5.0;
            let p = shape.position(theta);
            assert!((p.length() - 10.0).abs() < 1e-4);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn elliptical_orbit_distance_bounds() {
        for spec in PLANETS.iter().filter(|p| p.orbit.eccentricity > 0.0) {
            let shape = OrbitShape::from_spec(spec);
            let (lo, hi) = distance_range(&shape);
            let tol = spec.distance * 1e-4;
            assert!((lo - shape.perihelion_distance()).abs() < tol, "{} min {lo}", spec.id);
            assert!((hi - shape.aphelion_distance()).abs() < tol, "{} max {hi}", spec.id);
        }
    }

    #[test]
    fn focus_sits_at_origin() {
        let shape = OrbitShape::new(30.0, 0.5);
        // θ = 0 is the perihelion on the +X side
        assert!((shape.position(0.0).x - 15.0).abs() < 1e-4);
        assert_eq!(shape.center(), Vec3::new(-15.0, 0.0, 0.0));
        assert!((shape.squash() - (0.75f32).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn angle_is_monotonic_for_nonnegative_speed() {
        let mut state = OrbitalState::new(1.0);
        let mut last = state.angle;
        for i in 0..100 {
            state.advance(0.01, (i % 6) as f32, 0.6, 1.0 / 60.0);
            assert!(state.angle >= last);
            last = state.angle;
        }
    }

    #[test]
    fn zero_speed_freezes_angle_and_spin() {
        let mut system = OrbitSystem::with_angles(&PLANETS, 0.6, &[0.5; 8]);
        let before: Vec<OrbitalState> = system.tracks().iter().map(|t| t.state).collect();
        for _ in 0..120 {
            system.step(0.0, 1.0 / 60.0);
        }
        let after: Vec<OrbitalState> = system.tracks().iter().map(|t| t.state).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn mercury_advances_by_speed() {
        let theta0 = 0.3;
        let mut system = OrbitSystem::with_angles(&PLANETS, 0.6, &[theta0]);
        system.step(1.0, 1.0);
        let track = system.track(MERCURY).unwrap();
        assert!((track.state.angle - (theta0 + 0.04)).abs() < 1e-6);
        let expected = Vec3::new(
            10.0 * (theta0 + 0.04).cos(),
            0.0,
            10.0 * (theta0 + 0.04).sin(),
        );
        assert!(track.position.distance(expected) < 1e-4);
    }

    #[test]
    fn spin_scales_with_simulation_speed() {
        let mut state = OrbitalState::default();
        state.advance(0.0, 2.0, 0.6, 0.5);
        assert!((state.spin - 0.6).abs() < 1e-6);
    }

    #[test]
    fn locate_reports_current_position() {
        let mut system = OrbitSystem::with_angles(&PLANETS, 0.6, &[]);
        system.step(1.0, 10.0);
        let earth = system.locate("earth").unwrap();
        assert_eq!(earth.position, system.track(EARTH).unwrap().position);
        assert_eq!(earth.radius, 1.6);
        assert!(system.locate("mars").is_some());
        assert_eq!(system.locate("mars").map(|t| t.radius), Some(PLANETS[MARS].radius));
        assert!(system.locate("vulcan").is_none());
    }

    #[test]
    fn random_start_angles_differ() {
        let mut rng = Rng::new(9);
        let system = OrbitSystem::new(&PLANETS, 0.6, &mut rng);
        assert_eq!(system.tracks().len(), PLANETS.len());
        let a = system.tracks()[0].state.angle;
        assert!(system.tracks().iter().skip(1).any(|t| t.state.angle != a));
        assert!(system.tracks().iter().all(|t| (0.0..TAU).contains(&t.state.angle)));
    }
}
