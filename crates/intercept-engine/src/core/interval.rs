use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

/// A closed range `[min, max]` of reals.
///
/// Used both as a sampling domain (initial candidates, scenarios, mutation steps) and as
/// clamping bounds after mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

/// A range that is empty or has non-finite endpoints.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("invalid {name} range [{min}, {max}]")]
pub struct RangeError {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Creates the closed interval `[min, max]` without validating it.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Symmetric range `[-half_width, half_width]`.
    #[must_use]
    pub const fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Checks that both endpoints are finite and `min <= max`.
    ///
    /// `name` only labels the returned error.
    pub fn validate(&self, name: &'static str) -> Result<(), RangeError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(RangeError {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Builds a uniform sampler over `[min, max]`.
    pub fn uniform(&self, name: &'static str) -> Result<Uniform<f64>, RangeError> {
        self.validate(name)?;
        Uniform::new_inclusive(self.min, self.max).map_err(|_| RangeError {
            name,
            min: self.min,
            max: self.max,
        })
    }

    /// Returns `true` if `min <= value <= max`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamps `value` into the interval.
    ///
    /// Unlike [`f64::clamp`] this never panics; an inverted interval yields `min`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.min(self.max).max(self.min)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn test_validate_rejects_inverted_and_non_finite() {
        assert!(Interval::new(0.0, 1.0).validate("ok").is_ok());
        assert!(Interval::new(1.0, 1.0).validate("point").is_ok());

        let err = Interval::new(2.0, 1.0).validate("speed").unwrap_err();
        assert_eq!(err.name, "speed");
        assert_eq!(err.to_string(), "invalid speed range [2, 1]");

        assert!(Interval::new(f64::NAN, 1.0).validate("nan").is_err());
        assert!(Interval::new(0.0, f64::INFINITY).validate("inf").is_err());
    }

    #[test]
    fn test_uniform_samples_stay_inside() {
        let interval = Interval::new(100.0, 3000.0);
        let uniform = interval.uniform("speed").unwrap();
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(interval.contains(rng.sample(uniform)));
        }
    }

    #[test]
    fn test_clamp() {
        let interval = Interval::new(10.0, 300.0);
        assert_eq!(interval.clamp(5.0), 10.0);
        assert_eq!(interval.clamp(350.0), 300.0);
        assert_eq!(interval.clamp(42.0), 42.0);
    }
}
