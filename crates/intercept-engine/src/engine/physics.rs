use serde::{Deserialize, Serialize};

/// Physical constants of the simulation.
///
/// These are fixed for a whole run; there is no per-call override. Alternate values are
/// mostly useful in tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Downward acceleration per time unit squared.
    pub gravity: f64,
    /// Length of one simulation step.
    pub time_step: f64,
    /// Separation below which the projectile counts as hitting the target.
    pub collision_threshold: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            time_step: 1.0,
            collision_threshold: 5.0,
        }
    }
}

/// Reason a set of physics constants was rejected.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum PhysicsError {
    #[display("gravity must be positive and finite, got {value}")]
    Gravity { value: f64 },
    #[display("time step must be positive and finite, got {value}")]
    TimeStep { value: f64 },
    #[display("collision threshold must be non-negative and finite, got {value}")]
    CollisionThreshold { value: f64 },
    /// `gravity·time_step` rounds to zero or overflows, so the projectile never falls.
    #[display("gravity per step must be positive and finite, got {value}")]
    GravityStep { value: f64 },
}

impl PhysicsParams {
    /// Rejects constants under which a flight might never land.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.gravity) {
            return Err(PhysicsError::Gravity {
                value: self.gravity,
            });
        }
        if !positive(self.time_step) {
            return Err(PhysicsError::TimeStep {
                value: self.time_step,
            });
        }
        let gravity_step = self.gravity * self.time_step;
        if !positive(gravity_step) {
            return Err(PhysicsError::GravityStep {
                value: gravity_step,
            });
        }
        if !(self.collision_threshold.is_finite() && self.collision_threshold >= 0.0) {
            return Err(PhysicsError::CollisionThreshold {
                value: self.collision_threshold,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(PhysicsParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_constants() {
        let base = PhysicsParams::default();
        let zero_gravity = PhysicsParams {
            gravity: 0.0,
            ..base
        };
        assert_eq!(
            zero_gravity.validate(),
            Err(PhysicsError::Gravity { value: 0.0 })
        );
        let negative_step = PhysicsParams {
            time_step: -1.0,
            ..base
        };
        assert!(matches!(
            negative_step.validate(),
            Err(PhysicsError::TimeStep { .. })
        ));
        let nan_threshold = PhysicsParams {
            collision_threshold: f64::NAN,
            ..base
        };
        assert!(matches!(
            nan_threshold.validate(),
            Err(PhysicsError::CollisionThreshold { .. })
        ));
    }

    #[test]
    fn test_rejects_underflowing_gravity_step() {
        let underflow = PhysicsParams {
            gravity: 1e-200,
            time_step: 1e-200,
            ..PhysicsParams::default()
        };
        assert!(underflow.gravity.is_finite() && underflow.gravity > 0.0);
        assert_eq!(
            underflow.validate(),
            Err(PhysicsError::GravityStep { value: 0.0 })
        );

        let overflow = PhysicsParams {
            gravity: 1e200,
            time_step: 1e200,
            ..PhysicsParams::default()
        };
        assert_eq!(
            overflow.validate(),
            Err(PhysicsError::GravityStep {
                value: f64::INFINITY
            })
        );

        let tiny_but_falling = PhysicsParams {
            gravity: 1e-100,
            time_step: 1e-100,
            ..PhysicsParams::default()
        };
        assert!(tiny_but_falling.validate().is_ok());
    }
}
