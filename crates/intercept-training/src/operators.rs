//! Genetic operators over launch candidates.
//!
//! - **Initialization**: [`CandidateSampler`] draws candidates uniformly from the initial
//!   ranges
//! - **Crossover**: [`crossover`] / [`crossover_pair`] pick each gene from one parent
//! - **Mutation**: [`Mutator`] jointly perturbs both genes with a fixed probability
//!
//! Selection lives in [`selection`](crate::selection) because it needs fitness values.
//!
//! All operators take the random source as `&mut R where R: Rng + ?Sized`, so a run seeded
//! with a fixed generator is reproducible.
//!
//! # Discrete Crossover
//!
//! Each gene of the child is copied bit-for-bit from one of the parents; values are never
//! blended. With `rate = 0.5` every gene is a fair coin flip.
//!
//! # Joint Mutation
//!
//! With probability `rate` a candidate is perturbed on *both* genes,
//! `angle += U(angle_step)` and `speed += U(speed_step)`, and then clamped into the
//! mutation bounds. Otherwise it is returned unchanged. Whether unchanged candidates are
//! clamped as well is controlled by [`MutationClamp`].

use intercept_engine::{Candidate, Interval, RangeError};
use rand::{Rng, distr::Distribution};
use rand_distr::Uniform;

use crate::config::{CandidateBounds, ConfigError, GeneticParams, MutationClamp};

/// Uniform sampler over the initial candidate ranges.
///
/// ```
/// use intercept_training::{config::CandidateBounds, operators::CandidateSampler};
/// use rand::Rng as _;
///
/// let bounds = CandidateBounds::default();
/// let sampler = CandidateSampler::new(&bounds).unwrap();
/// let candidate = rand::rng().sample(&sampler);
/// assert!(bounds.initial_speed.contains(candidate.speed()));
/// ```
#[derive(Debug, Clone)]
pub struct CandidateSampler {
    angle: Uniform<f64>,
    speed: Uniform<f64>,
}

impl CandidateSampler {
    /// Builds the samplers for the initial angle and speed ranges.
    ///
    /// # Arguments
    ///
    /// * `bounds` - ranges the initial candidates are drawn from
    pub fn new(bounds: &CandidateBounds) -> Result<Self, RangeError> {
        Ok(Self {
            angle: bounds.initial_angle.uniform("initial angle")?,
            speed: bounds.initial_speed.uniform("initial speed")?,
        })
    }

    /// Draws `count` independent candidates.
    pub fn population<R>(&self, count: usize, rng: &mut R) -> Vec<Candidate>
    where
        R: Rng + ?Sized,
    {
        (0..count).map(|_| self.sample(rng)).collect()
    }
}

impl Distribution<Candidate> for CandidateSampler {
    fn sample<R>(&self, rng: &mut R) -> Candidate
    where
        R: Rng + ?Sized,
    {
        let angle = self.angle.sample(rng);
        let speed = self.speed.sample(rng);
        Candidate::new(angle, speed)
    }
}

/// Produces one child, taking each gene from `p1` with probability `rate` and from `p2`
/// otherwise.
///
/// # Panics
///
/// Panics if `rate` is not in `[0, 1]`.
pub fn crossover<R>(p1: &Candidate, p2: &Candidate, rate: f64, rng: &mut R) -> Candidate
where
    R: Rng + ?Sized,
{
    crossover_pair(p1, p2, rate, rng).0
}

/// Produces two complementary children: the second gets every gene the first did not.
///
/// # Panics
///
/// Panics if `rate` is not in `[0, 1]`.
pub fn crossover_pair<R>(
    p1: &Candidate,
    p2: &Candidate,
    rate: f64,
    rng: &mut R,
) -> (Candidate, Candidate)
where
    R: Rng + ?Sized,
{
    let (angle, other_angle) = if rng.random_bool(rate) {
        (p1.angle(), p2.angle())
    } else {
        (p2.angle(), p1.angle())
    };
    let (speed, other_speed) = if rng.random_bool(rate) {
        (p1.speed(), p2.speed())
    } else {
        (p2.speed(), p1.speed())
    };
    (
        Candidate::new(angle, speed),
        Candidate::new(other_angle, other_speed),
    )
}

/// Probabilistic joint mutation with clamping.
#[derive(Debug, Clone)]
pub struct Mutator {
    rate: f64,
    clamp: MutationClamp,
    angle_step: Uniform<f64>,
    speed_step: Uniform<f64>,
    angle_bounds: Interval,
    speed_bounds: Interval,
}

impl Mutator {
    /// Builds a mutator from the mutation rate, clamp mode and bounds.
    ///
    /// # Arguments
    ///
    /// * `params` - supplies `mutation_rate` and `clamp`
    /// * `bounds` - mutation step ranges and the clamp intervals
    pub fn new(params: &GeneticParams, bounds: &CandidateBounds) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&params.mutation_rate) {
            return Err(ConfigError::Probability {
                name: "mutation rate",
                value: params.mutation_rate,
            });
        }
        bounds.angle.validate("angle")?;
        bounds.speed.validate("speed")?;
        Ok(Self {
            rate: params.mutation_rate,
            clamp: params.clamp,
            angle_step: bounds.angle_step.uniform("angle step")?,
            speed_step: bounds.speed_step.uniform("speed step")?,
            angle_bounds: bounds.angle,
            speed_bounds: bounds.speed,
        })
    }

    /// Returns the (possibly) mutated copy of `candidate`.
    pub fn mutate<R>(&self, candidate: &Candidate, rng: &mut R) -> Candidate
    where
        R: Rng + ?Sized,
    {
        if rng.random_bool(self.rate) {
            let angle = candidate.angle() + self.angle_step.sample(rng);
            let speed = candidate.speed() + self.speed_step.sample(rng);
            return self.clamp_to_bounds(&Candidate::new(angle, speed));
        }
        match self.clamp {
            MutationClamp::OnMutation => *candidate,
            MutationClamp::Always => self.clamp_to_bounds(candidate),
        }
    }

    fn clamp_to_bounds(&self, candidate: &Candidate) -> Candidate {
        Candidate::new(
            self.angle_bounds.clamp(candidate.angle()),
            self.speed_bounds.clamp(candidate.speed()),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    fn mutator(rate: f64, clamp: MutationClamp) -> Mutator {
        let params = GeneticParams {
            mutation_rate: rate,
            clamp,
            ..GeneticParams::default()
        };
        Mutator::new(&params, &CandidateBounds::default()).unwrap()
    }

    #[test]
    fn test_initial_population_within_ranges() {
        let bounds = CandidateBounds::default();
        let sampler = CandidateSampler::new(&bounds).unwrap();
        let mut rng = Pcg64::seed_from_u64(3);
        let population = sampler.population(500, &mut rng);

        assert_eq!(population.len(), 500);
        for c in &population {
            assert!(bounds.initial_angle.contains(c.angle()));
            assert!(bounds.initial_speed.contains(c.speed()));
        }
    }

    #[test]
    fn test_sampler_rejects_empty_range() {
        let bounds = CandidateBounds {
            initial_speed: Interval::new(3000.0, 100.0),
            ..CandidateBounds::default()
        };
        let err = CandidateSampler::new(&bounds).unwrap_err();
        assert_eq!(err.name, "initial speed");
    }

    #[test]
    fn test_crossover_copies_parent_genes() {
        let p1 = Candidate::new(0.123_456_789, 111.111);
        let p2 = Candidate::new(1.234_567_891, 222.222);
        let mut rng = Pcg64::seed_from_u64(11);
        let mut seen = [[false; 2]; 2];

        for _ in 0..200 {
            let child = crossover(&p1, &p2, 0.5, &mut rng);
            let angle_from_p1 = child.angle().to_bits() == p1.angle().to_bits();
            let speed_from_p1 = child.speed().to_bits() == p1.speed().to_bits();
            assert!(angle_from_p1 || child.angle().to_bits() == p2.angle().to_bits());
            assert!(speed_from_p1 || child.speed().to_bits() == p2.speed().to_bits());
            seen[usize::from(angle_from_p1)][usize::from(speed_from_p1)] = true;
        }
        // all four gene combinations occur
        assert!(seen.iter().flatten().all(|&s| s));
    }

    #[test]
    fn test_crossover_rate_extremes() {
        let p1 = Candidate::new(0.1, 100.0);
        let p2 = Candidate::new(0.2, 200.0);
        let mut rng = Pcg64::seed_from_u64(5);
        assert_eq!(crossover(&p1, &p2, 1.0, &mut rng), p1);
        assert_eq!(crossover(&p1, &p2, 0.0, &mut rng), p2);
    }

    #[test]
    fn test_crossover_pair_is_complementary() {
        let p1 = Candidate::new(0.3, 120.0);
        let p2 = Candidate::new(0.9, 280.0);
        let mut rng = Pcg64::seed_from_u64(21);
        for _ in 0..50 {
            let (a, b) = crossover_pair(&p1, &p2, 0.5, &mut rng);
            let mut angles = [a.angle(), b.angle()];
            let mut speeds = [a.speed(), b.speed()];
            angles.sort_by(f64::total_cmp);
            speeds.sort_by(f64::total_cmp);
            assert_eq!(angles, [0.3, 0.9]);
            assert_eq!(speeds, [120.0, 280.0]);
        }
    }

    #[test]
    fn test_mutation_output_within_bounds() {
        let bounds = CandidateBounds::default();
        let mutator = mutator(1.0, MutationClamp::OnMutation);
        let mut rng = Pcg64::seed_from_u64(8);
        let inputs = [
            Candidate::new(0.0, 10.0),
            Candidate::new(FRAC_PI_2, 300.0),
            Candidate::new(1.4, 2900.0),
            Candidate::new(-0.5, 1.0),
        ];
        for _ in 0..250 {
            for input in &inputs {
                let mutated = mutator.mutate(input, &mut rng);
                assert!(bounds.angle.contains(mutated.angle()), "{mutated:?}");
                assert!(bounds.speed.contains(mutated.speed()), "{mutated:?}");
            }
        }
    }

    #[test]
    fn test_mutation_step_is_bounded() {
        let bounds = CandidateBounds::default();
        let mutator = mutator(1.0, MutationClamp::OnMutation);
        let mut rng = Pcg64::seed_from_u64(13);
        let input = Candidate::new(0.7, 150.0);
        for _ in 0..500 {
            let mutated = mutator.mutate(&input, &mut rng);
            assert!(bounds.angle_step.contains(mutated.angle() - input.angle()));
            assert!(bounds.speed_step.contains(mutated.speed() - input.speed()));
        }
    }

    #[test]
    fn test_unmutated_candidate_is_not_clamped() {
        let mutator = mutator(0.0, MutationClamp::OnMutation);
        let mut rng = Pcg64::seed_from_u64(1);
        let outside = Candidate::new(1.7, 2500.0);
        assert_eq!(mutator.mutate(&outside, &mut rng), outside);
    }

    #[test]
    fn test_always_clamp_variant() {
        let mutator = mutator(0.0, MutationClamp::Always);
        let mut rng = Pcg64::seed_from_u64(1);
        let clamped = mutator.mutate(&Candidate::new(1.7, 2500.0), &mut rng);
        assert_eq!(clamped, Candidate::new(FRAC_PI_2, 300.0));
    }

    #[test]
    fn test_mutation_rate_is_respected() {
        let mutator = mutator(0.3, MutationClamp::OnMutation);
        let mut rng = Pcg64::seed_from_u64(17);
        let input = Candidate::new(0.7, 150.0);
        let mutated = (0..10_000)
            .filter(|_| mutator.mutate(&input, &mut rng) != input)
            .count();
        assert!((2700..3300).contains(&mutated), "mutated {mutated} of 10000");
    }

    #[test]
    fn test_mutator_rejects_bad_rate() {
        let params = GeneticParams {
            mutation_rate: 2.0,
            ..GeneticParams::default()
        };
        assert!(Mutator::new(&params, &CandidateBounds::default()).is_err());
    }
}
