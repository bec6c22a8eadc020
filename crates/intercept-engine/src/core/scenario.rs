use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Interval, RangeError, Vec2};

/// Where every projectile is fired from.
pub const LAUNCH_POSITION: Vec2 = Vec2::ZERO;

/// One problem instance: the target's starting point and its constant velocity.
///
/// A scenario is drawn once per optimization run and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    target_position: Vec2,
    target_velocity: Vec2,
}

impl Scenario {
    /// Creates a scenario with the target starting at `target_position`.
    ///
    /// # Arguments
    ///
    /// * `target_position` - target position at time zero
    /// * `target_velocity` - constant target velocity
    #[must_use]
    pub const fn new(target_position: Vec2, target_velocity: Vec2) -> Self {
        Self {
            target_position,
            target_velocity,
        }
    }

    /// Draws a scenario uniformly from `ranges`.
    pub fn random<R>(ranges: &ScenarioRanges, rng: &mut R) -> Result<Self, RangeError>
    where
        R: Rng + ?Sized,
    {
        let x = rng.sample(ranges.position_x.uniform("target x")?);
        let y = rng.sample(ranges.position_y.uniform("target y")?);
        let vx = rng.sample(ranges.velocity_x.uniform("target vx")?);
        let vy = rng.sample(ranges.velocity_y.uniform("target vy")?);
        Ok(Self::new(Vec2::new(x, y), Vec2::new(vx, vy)))
    }

    /// Target position at launch time.
    #[must_use]
    pub const fn target_position(&self) -> Vec2 {
        self.target_position
    }

    /// Constant velocity of the target.
    #[must_use]
    pub const fn target_velocity(&self) -> Vec2 {
        self.target_velocity
    }

    /// Distance between the launch site and the target at time zero.
    #[must_use]
    pub fn initial_distance(&self) -> f64 {
        LAUNCH_POSITION.distance(self.target_position)
    }
}

/// Sampling ranges for [`Scenario::random`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioRanges {
    pub position_x: Interval,
    pub position_y: Interval,
    pub velocity_x: Interval,
    pub velocity_y: Interval,
}

impl Default for ScenarioRanges {
    fn default() -> Self {
        Self {
            position_x: Interval::new(500.0, 2000.0),
            position_y: Interval::new(1000.0, 3000.0),
            velocity_x: Interval::symmetric(50.0),
            velocity_y: Interval::symmetric(50.0),
        }
    }
}

impl ScenarioRanges {
    /// Checks that every range is finite and non-empty.
    pub fn validate(&self) -> Result<(), RangeError> {
        self.position_x.validate("target x")?;
        self.position_y.validate("target y")?;
        self.velocity_x.validate("target vx")?;
        self.velocity_y.validate("target vy")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn test_random_scenario_within_ranges() {
        let ranges = ScenarioRanges::default();
        let mut rng = Pcg64::seed_from_u64(1);
        for _ in 0..200 {
            let scenario = Scenario::random(&ranges, &mut rng).unwrap();
            let p = scenario.target_position();
            let v = scenario.target_velocity();
            assert!(ranges.position_x.contains(p.x));
            assert!(ranges.position_y.contains(p.y));
            assert!(ranges.velocity_x.contains(v.x));
            assert!(ranges.velocity_y.contains(v.y));
        }
    }

    #[test]
    fn test_random_scenario_is_reproducible() {
        let ranges = ScenarioRanges::default();
        let a = Scenario::random(&ranges, &mut Pcg64::seed_from_u64(99)).unwrap();
        let b = Scenario::random(&ranges, &mut Pcg64::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_range_is_reported() {
        let ranges = ScenarioRanges {
            velocity_y: Interval::new(10.0, -10.0),
            ..ScenarioRanges::default()
        };
        let err = Scenario::random(&ranges, &mut Pcg64::seed_from_u64(0)).unwrap_err();
        assert_eq!(err.name, "target vy");
        assert_eq!(ranges.validate().unwrap_err().name, "target vy");
    }

    #[test]
    fn test_initial_distance() {
        let scenario = Scenario::new(Vec2::new(300.0, 400.0), Vec2::ZERO);
        assert_eq!(scenario.initial_distance(), 500.0);
    }

    #[test]
    fn test_partial_ranges_deserialize() {
        let ranges: ScenarioRanges =
            serde_json::from_str(r#"{"position_x": {"min": 0.0, "max": 1.0}}"#).unwrap();
        assert_eq!(ranges.position_x, Interval::new(0.0, 1.0));
        assert_eq!(ranges.position_y, ScenarioRanges::default().position_y);
    }
}
