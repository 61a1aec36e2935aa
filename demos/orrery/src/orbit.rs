/// Circular orbit in the XZ plane.
///
/// Distance and angular speed are fixed at creation; only the angle moves.
/// The angle stays wrapped into [0, 2π).

use std::f32::consts::TAU;
use glam::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    distance: f32,
    /// Radians per second.
    speed: f32,
    angle: f32,
}

impl Orbit {
    pub fn new(distance: f32, speed: f32) -> Self {
        Self {
            distance,
            speed,
            angle: 0.0,
        }
    }

    /// Start at a given phase instead of angle zero.
    pub fn with_phase(mut self, angle: f32) -> Self {
        self.angle = angle.rem_euclid(TAU);
        self
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance by `dt` seconds. Negative or NaN deltas count as zero.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt > 0.0 { dt } else { 0.0 };
        self.angle = (self.angle + self.speed * dt).rem_euclid(TAU);
    }

    /// Current position, `(d·cos θ, 0, d·sin θ)`.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.angle.cos(),
            0.0,
            self.distance * self.angle.sin(),
        )
    }
}

/// Advance every orbit by the same delta.
pub fn advance_all<'a>(orbits: impl IntoIterator<Item = &'a mut Orbit>, dt: f32) {
    for orbit in orbits {
        orbit.advance(dt);
    }
}
