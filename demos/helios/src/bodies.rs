/// Planet registry: orbital and display parameters for the eight planets.
///
/// Distances and radii are render units, not astronomical ones. Speeds are
/// angular rates in radians per second at simulation speed 1.

use serde::Serialize;

/// Registry index of the ringed planet.
pub const SATURN: usize = 5;
pub const PLANET_COUNT: usize = 8;

/// Registry indices (increasing distance from the sun).
#[cfg(test)]
mod indices {
    pub const MERCURY: usize = 0;
    pub const EARTH: usize = 2;
    pub const MARS: usize = 3;
    pub const JUPITER: usize = 4;
    pub const URANUS: usize = 6;
    pub const NEPTUNE: usize = 7;
}
#[cfg(test)]
pub use indices::*;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 7.0;
pub const SUN_COLOR: (f32, f32, f32) = (1.0, 0.9, 0.6);
pub const SUN_EMISSIVE: f32 = 1.5;

/// Additive glow shells around the sun: (scale, color, opacity).
pub const CORONA_SHELLS: [(f32, (f32, f32, f32), f32); 2] = [
    (1.2, (1.0, 1.0 / 3.0, 0.0), 0.2),
    (1.5, (1.0, 2.0 / 3.0, 0.0), 0.1),
];

// ── Saturn rings ─────────────────────────────────────────────────────

pub const SATURN_RING_INNER: f32 = 1.4;
pub const SATURN_RING_OUTER: f32 = 2.5;
/// Ring plane sits a little off the equator.
pub const SATURN_RING_TILT: f32 = std::f32::consts::PI / 2.0 - std::f32::consts::PI / 2.1;
pub const SATURN_RING_COLOR: (f32, f32, f32) = (0.80, 0.72, 0.58);
pub const SATURN_RING_ALPHA: f32 = 0.8;

/// Orbit shape of a planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitParams {
    /// Eccentricity in [0, 1).
    pub eccentricity: f32,
    /// Argument of perihelion (radians). Published, not applied to motion.
    pub perihelion: f32,
    /// Axial tilt in degrees.
    pub tilt: f32,
}

/// Display-only facts shown in the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetDetails {
    pub mass: &'static str,
    pub temp: &'static str,
    pub moons: u32,
    pub orbital_period: &'static str,
    pub eccentricity: &'static str,
    pub axial_tilt: &'static str,
}

/// Immutable per-planet parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetSpec {
    pub id: &'static str,
    pub name: &'static str,
    /// `#RRGGBB` tint.
    pub color: &'static str,
    pub radius: f32,
    /// Semi-major axis.
    pub distance: f32,
    /// Angular speed coefficient.
    pub speed: f32,
    pub orbit: OrbitParams,
    pub description: &'static str,
    pub details: PlanetDetails,
}

pub static PLANETS: [PlanetSpec; PLANET_COUNT] = [
    PlanetSpec {
        id: "mercury",
        name: "Mercury",
        color: "#A5A5A5",
        radius: 0.8,
        distance: 10.0,
        speed: 0.04,
        // Drawn as a true circle; the catalog still reports the real value.
        orbit: OrbitParams { eccentricity: 0.0, perihelion: 0.0, tilt: 0.03 },
        description: "The smallest planet in the Solar System and the closest to the Sun.",
        details: PlanetDetails {
            mass: "3.30 × 10^23 kg",
            temp: "167 °C",
            moons: 0,
            orbital_period: "88 days",
            eccentricity: "0.206",
            axial_tilt: "0.03°",
        },
    },
    PlanetSpec {
        id: "venus",
        name: "Venus",
        color: "#E3BB76",
        radius: 1.5,
        distance: 15.0,
        speed: 0.015,
        orbit: OrbitParams { eccentricity: 0.007, perihelion: 1.3, tilt: 177.4 },
        description: "Second planet from the Sun. It has the hottest planetary atmosphere.",
        details: PlanetDetails {
            mass: "4.87 × 10^24 kg",
            temp: "464 °C",
            moons: 0,
            orbital_period: "225 days",
            eccentricity: "0.007",
            axial_tilt: "177.4°",
        },
    },
    PlanetSpec {
        id: "earth",
        name: "Earth",
        color: "#4F4CB0",
        radius: 1.6,
        distance: 22.0,
        speed: 0.01,
        orbit: OrbitParams { eccentricity: 0.017, perihelion: 1.7, tilt: 23.4 },
        description: "Our home. The only known planet in the universe to harbor life.",
        details: PlanetDetails {
            mass: "5.97 × 10^24 kg",
            temp: "15 °C",
            moons: 1,
            orbital_period: "365 days",
            eccentricity: "0.017",
            axial_tilt: "23.4°",
        },
    },
    PlanetSpec {
        id: "mars",
        name: "Mars",
        color: "#E27B58",
        radius: 1.1,
        distance: 30.0,
        speed: 0.008,
        orbit: OrbitParams { eccentricity: 0.094, perihelion: 5.0, tilt: 25.2 },
        description: "The Red Planet. Home to Olympus Mons, the largest volcano in the solar system.",
        details: PlanetDetails {
            mass: "6.42 × 10^23 kg",
            temp: "-65 °C",
            moons: 2,
            orbital_period: "687 days",
            eccentricity: "0.094",
            axial_tilt: "25.2°",
        },
    },
    PlanetSpec {
        id: "jupiter",
        name: "Jupiter",
        color: "#C99039",
        radius: 4.5,
        distance: 45.0,
        speed: 0.004,
        orbit: OrbitParams { eccentricity: 0.049, perihelion: 0.2, tilt: 3.1 },
        description: "The largest planet. A gas giant with a mass one-thousandth that of the Sun.",
        details: PlanetDetails {
            mass: "1.90 × 10^27 kg",
            temp: "-110 °C",
            moons: 95,
            orbital_period: "12 years",
            eccentricity: "0.049",
            axial_tilt: "3.1°",
        },
    },
    PlanetSpec {
        id: "saturn",
        name: "Saturn",
        color: "#EAD6B8",
        radius: 3.8,
        distance: 65.0,
        speed: 0.003,
        orbit: OrbitParams { eccentricity: 0.057, perihelion: 1.6, tilt: 26.7 },
        description: "Adorned with a dazzling system of icy rings.",
        details: PlanetDetails {
            mass: "5.68 × 10^26 kg",
            temp: "-140 °C",
            moons: 146,
            orbital_period: "29 years",
            eccentricity: "0.057",
            axial_tilt: "26.7°",
        },
    },
    PlanetSpec {
        id: "uranus",
        name: "Uranus",
        color: "#D1F7F8",
        radius: 2.5,
        distance: 85.0,
        speed: 0.002,
        orbit: OrbitParams { eccentricity: 0.046, perihelion: 3.0, tilt: 97.8 },
        description: "An ice giant that rotates at a nearly 90-degree angle from the plane of its orbit.",
        details: PlanetDetails {
            mass: "8.68 × 10^25 kg",
            temp: "-195 °C",
            moons: 27,
            orbital_period: "84 years",
            eccentricity: "0.046",
            axial_tilt: "97.8°",
        },
    },
    PlanetSpec {
        id: "neptune",
        name: "Neptune",
        color: "#5B5DDF",
        radius: 2.4,
        distance: 100.0,
        speed: 0.001,
        orbit: OrbitParams { eccentricity: 0.011, perihelion: 0.8, tilt: 28.3 },
        description: "The most distant major planet. Dark, cold, and whipped by supersonic winds.",
        details: PlanetDetails {
            mass: "1.02 × 10^26 kg",
            temp: "-200 °C",
            moons: 14,
            orbital_period: "165 years",
            eccentricity: "0.011",
            axial_tilt: "28.3°",
        },
    },
];

/// Registry index for a planet id.
pub fn index_of(id: &str) -> Option<usize> {
    PLANETS.iter().position(|p| p.id == id)
}

pub fn find(id: &str) -> Option<&'static PlanetSpec> {
    PLANETS.iter().find(|p| p.id == id)
}

/// The whole registry as a JSON array, in registry order.
pub fn catalog_json() -> Result<String, serde_json::Error> {
    serde_json::to_string(&PLANETS)
}
