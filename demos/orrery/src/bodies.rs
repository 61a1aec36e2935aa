/// Body tables for the scene: planets, sun, star field and NEO orbits.
///
/// Distances and speeds are scene units and radians per second, not real
/// astronomical values.

use glam::Vec3;
use orrery_engine::Color;

use crate::orbit::Orbit;

/// One planet's fixed description.
#[derive(Debug, Clone, Copy)]
pub struct PlanetDesc {
    pub name: &'static str,
    pub color_hex: &'static str,
    pub distance: f32,
    /// Radians per second.
    pub speed: f32,
}

pub const PLANET_COUNT: usize = 8;

pub const PLANETS: [PlanetDesc; PLANET_COUNT] = [
    PlanetDesc { name: "Mercury", color_hex: "#808080", distance: 20.0,  speed: 0.03 },
    PlanetDesc { name: "Venus",   color_hex: "#ffff00", distance: 30.0,  speed: 0.02 },
    PlanetDesc { name: "Earth",   color_hex: "#0000ff", distance: 40.0,  speed: 0.01 },
    PlanetDesc { name: "Mars",    color_hex: "#ff0000", distance: 50.0,  speed: 0.008 },
    PlanetDesc { name: "Jupiter", color_hex: "#ffa500", distance: 70.0,  speed: 0.005 },
    PlanetDesc { name: "Saturn",  color_hex: "#daa520", distance: 90.0,  speed: 0.004 },
    PlanetDesc { name: "Uranus",  color_hex: "#add8e6", distance: 110.0, speed: 0.003 },
    PlanetDesc { name: "Neptune", color_hex: "#00008b", distance: 130.0, speed: 0.002 },
];

/// All planets share one display size.
pub const PLANET_RADIUS: f32 = 1.0;

impl PlanetDesc {
    pub fn color(&self) -> Color {
        Color::from_hex(self.color_hex).unwrap_or(Color::WHITE)
    }

    pub fn orbit(&self) -> Orbit {
        Orbit::new(self.distance, self.speed)
    }
}

pub fn planet_index(name: &str) -> Option<usize> {
    PLANETS.iter().position(|p| p.name.eq_ignore_ascii_case(name))
}

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 1.5;
pub const SUN_COLOR: Color = Color::new(1.0, 1.0, 0.0);
pub const SUN_EMISSIVE: f32 = 1.0;
pub const SUN_MODEL: &str = "Sun";

// ── Stars ────────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 1000;
/// Stars fill a cube of ±STAR_EXTENT around the sun.
pub const STAR_EXTENT: f32 = 1000.0;
pub const STAR_RADIUS: f32 = 0.5;

// ── Near-earth objects ───────────────────────────────────────────────

pub const NEO_RADIUS: f32 = 0.2;
pub const NEO_COLOR: Color = Color::new(1.0, 0.0, 0.0);
pub const NEO_MODEL: &str = "asteroid";
pub const NEO_DISTANCE_MIN: f32 = 60.0;
pub const NEO_DISTANCE_SPAN: f32 = 100.0;
pub const NEO_SPEED_MIN: f32 = 0.005;
pub const NEO_SPEED_SPAN: f32 = 0.01;

/// Self-rotation of every body, radians per second.
pub const SPIN_RATE: f32 = 0.6;

/// Deterministic integer hash (no external rand crate).
pub fn body_hash(seed: u32) -> u32 {
    let mut n = seed;
    n = n.wrapping_mul(2654435761);
    n ^= n >> 16;
    n = n.wrapping_mul(2246822519);
    n ^= n >> 13;
    n
}

/// Map a hash onto [0, 1). Uses the top 24 bits so the result is exact in f32.
pub fn unit(hash: u32) -> f32 {
    (hash >> 8) as f32 / (1u32 << 24) as f32
}

/// Star positions, identical on every call.
pub fn star_positions() -> Vec<Vec3> {
    (0..STAR_COUNT as u32)
        .map(|i| {
            let coord = |salt: u32| (unit(body_hash(i * 3 + salt)) * 2.0 - 1.0) * STAR_EXTENT;
            Vec3::new(coord(1), coord(2), coord(3))
        })
        .collect()
}

/// Orbit for the NEO at `index` in feed order.
/// Distance lies in [60, 160), speed in [0.005, 0.015), phase anywhere on the circle.
pub fn neo_orbit(index: usize) -> Orbit {
    let i = index as u32;
    let distance = NEO_DISTANCE_MIN + unit(body_hash(i * 7 + 31)) * NEO_DISTANCE_SPAN;
    let speed = NEO_SPEED_MIN + unit(body_hash(i * 13 + 97)) * NEO_SPEED_SPAN;
    let phase = unit(body_hash(i * 19 + 151)) * std::f32::consts::TAU;
    Orbit::new(distance, speed).with_phase(phase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planets_ordered_outward() {
        for pair in PLANETS.windows(2) {
            assert!(pair[0].distance < pair[1].distance);
            assert!(pair[0].speed > pair[1].speed, "{} should be faster", pair[0].name);
        }
    }

    #[test]
    fn planet_colors_parse() {
        for planet in &PLANETS {
            assert!(Color::from_hex(planet.color_hex).is_some(), "{}", planet.name);
        }
        assert_eq!(PLANETS[3].color(), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn planet_lookup_ignores_case() {
        assert_eq!(planet_index("earth"), Some(2));
        assert_eq!(planet_index("Neptune"), Some(7));
        assert_eq!(planet_index("Pluto"), None);
    }

    #[test]
    fn stars_fill_the_cube() {
        let stars = star_positions();
        assert_eq!(stars.len(), STAR_COUNT);
        for s in &stars {
            assert!(s.abs().max_element() <= STAR_EXTENT);
        }
        assert_eq!(stars, star_positions());
    }

    #[test]
    fn neo_orbits_in_range() {
        for i in 0..200 {
            let orbit = neo_orbit(i);
            assert!(orbit.distance() >= 60.0 && orbit.distance() < 160.0);
            assert!(orbit.speed() >= 0.005 && orbit.speed() < 0.015);
        }
        assert_eq!(neo_orbit(4), neo_orbit(4));
    }

    #[test]
    fn unit_stays_below_one() {
        assert_eq!(unit(0), 0.0);
        assert!(unit(u32::MAX) < 1.0);
    }

    #[test]
    fn hash_deterministic() {
        assert_eq!(body_hash(42), body_hash(42));
        assert_ne!(body_hash(0), body_hash(1));
    }
}
