use std::{fmt, iter, num::NonZeroUsize, thread};

use intercept_engine::{Candidate, Outcome, PhysicsParams, Scenario, Simulator};

/// Numerator of the hit reward; the best possible fitness approaches this value.
pub const HIT_REWARD: f64 = 1000.0;

/// Below this many candidates a batch is scored on the calling thread.
const PARALLEL_BATCH_MIN: usize = 64;

/// Converts a flight outcome into a fitness score (higher is better).
#[must_use]
pub fn outcome_fitness(outcome: &Outcome) -> f64 {
    match *outcome {
        Outcome::Hit { time, .. } => HIT_REWARD / (time + 1.0),
        Outcome::Miss { time, distance } => 1.0 / (distance + 1.0 + time),
    }
}

/// Scores candidates for the genetic algorithm.
///
/// Implementations must be pure: the same candidate always gets the same fitness.
pub trait FitnessEvaluator: fmt::Debug + Send + Sync {
    /// Computes the fitness of a single candidate.
    fn evaluate(&self, candidate: &Candidate) -> f64;

    /// Computes the fitness of every candidate, in input order.
    ///
    /// Large batches are split into contiguous chunks scored on scoped worker threads.
    /// Each candidate is scored independently, so the result is identical to scoring
    /// them one by one.
    fn evaluate_all(&self, candidates: &[Candidate]) -> Vec<f64> {
        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        if workers == 1 || candidates.len() < PARALLEL_BATCH_MIN {
            return candidates.iter().map(|c| self.evaluate(c)).collect();
        }

        let chunk_size = candidates.len().div_ceil(workers);
        let mut fitness = vec![0.0; candidates.len()];
        thread::scope(|s| {
            for (chunk, out) in iter::zip(
                candidates.chunks(chunk_size),
                fitness.chunks_mut(chunk_size),
            ) {
                s.spawn(move || {
                    for (candidate, f) in iter::zip(chunk, out) {
                        *f = self.evaluate(candidate);
                    }
                });
            }
        });
        fitness
    }
}

/// Fitness of a candidate against one fixed scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptEvaluator {
    simulator: Simulator,
    scenario: Scenario,
}

impl InterceptEvaluator {
    /// Creates an evaluator that flies every candidate against `scenario`.
    #[must_use]
    pub const fn new(physics: PhysicsParams, scenario: Scenario) -> Self {
        Self {
            simulator: Simulator::new(physics),
            scenario,
        }
    }

    /// Scenario every candidate is scored against.
    #[must_use]
    pub const fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Simulates `candidate` and returns the raw outcome.
    #[must_use]
    pub fn outcome(&self, candidate: &Candidate) -> Outcome {
        self.simulator.simulate(candidate, &self.scenario)
    }
}

impl FitnessEvaluator for InterceptEvaluator {
    fn evaluate(&self, candidate: &Candidate) -> f64 {
        let outcome = self.outcome(candidate);
        log::trace!("{candidate:?} => {outcome:?}");
        outcome_fitness(&outcome)
    }
}
