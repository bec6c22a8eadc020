use serde::{Deserialize, Serialize};

use crate::Vec2;

/// Launch parameters of a projectile: one point in the search space.
///
/// - `angle` - Elevation in radians, measured from the ground (`0` is horizontal)
/// - `speed` - Launch speed in distance units per time unit
///
/// Candidates are immutable values. Bounds are not enforced here; the training operators
/// decide when to clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    angle: f64,
    speed: f64,
}

impl Candidate {
    /// Creates a candidate from a launch angle in radians and a launch speed.
    ///
    /// Values are stored as given; bounds are enforced by the search, not here.
    #[must_use]
    pub const fn new(angle: f64, speed: f64) -> Self {
        Self { angle, speed }
    }

    /// Launch angle in radians, measured from the positive x axis.
    #[must_use]
    pub const fn angle(&self) -> f64 {
        self.angle
    }

    /// Launch speed in distance units per time unit.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Initial velocity vector `(cos(angle)·speed, sin(angle)·speed)`.
    #[must_use]
    pub fn launch_velocity(&self) -> Vec2 {
        let (sin, cos) = self.angle.sin_cos();
        Vec2::new(cos * self.speed, sin * self.speed)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn test_launch_velocity_vertical() {
        let v = Candidate::new(FRAC_PI_2, 100.0).launch_velocity();
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_launch_velocity_horizontal() {
        let v = Candidate::new(0.0, 42.0).launch_velocity();
        assert_eq!(v, Vec2::new(42.0, 0.0));
    }
}
