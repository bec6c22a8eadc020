use serde::{Deserialize, Serialize};

/// How a simulated flight ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The projectile came within the collision threshold of the target.
    Hit {
        /// Elapsed time at the first step inside the threshold.
        time: f64,
        /// Separation at that step.
        distance: f64,
    },
    /// The projectile dropped below ground level first.
    Miss {
        /// Elapsed time when the projectile landed.
        time: f64,
        /// Separation after clamping the projectile to the ground.
        distance: f64,
    },
}

impl Outcome {
    /// Simulated time at which the flight ended.
    #[must_use]
    pub const fn time(&self) -> f64 {
        match self {
            Self::Hit { time, .. } | Self::Miss { time, .. } => *time,
        }
    }

    /// Projectile/target separation when the flight ended.
    #[must_use]
    pub const fn final_distance(&self) -> f64 {
        match self {
            Self::Hit { distance, .. } | Self::Miss { distance, .. } => *distance,
        }
    }
}
