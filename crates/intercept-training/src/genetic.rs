//! Generational driver of the genetic algorithm.
//!
//! # Algorithm Overview
//!
//! [`EvolutionDriver`] runs a fixed number of generations over a single scenario:
//!
//! 1. **Initialize** - Draw `N` candidates from the initial ranges and score them
//! 2. **Select** - Truncation selection restores the configured size `2·(N/2)`
//! 3. **Breed** - Consecutive pairs `(0, 1), (2, 3), ...` produce offspring through
//!    crossover and mutation, according to the [`OffspringPolicy`]
//! 4. **Evaluate** - Every offspring is scored; the best-ever record is replaced only on
//!    strict improvement
//! 5. **Report** - A [`GenerationReport`] is emitted
//!
//! The offspring of one generation are the population selected from in the next one.
//! Only offspring compete for the best-ever record; the initial population does not.
//!
//! # Driver States
//!
//! ```text
//! Initializing --initialize()--> Evolving { generation: 0 }
//!                                  |  step()
//!                                  v
//!                                Evolving { generation: G-1 } --step()--> Done
//! ```
//!
//! `step` initializes implicitly when called on a fresh driver.
//!
//! # Example
//!
//! ```
//! use intercept_engine::{Scenario, Vec2};
//! use intercept_training::{config::EvolutionConfig, genetic::EvolutionDriver};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64;
//!
//! let mut config = EvolutionConfig::default();
//! config.genetic.population_size = 10;
//! config.genetic.generations = 5;
//! let scenario = Scenario::new(Vec2::new(1000.0, 2000.0), Vec2::ZERO);
//!
//! let driver = EvolutionDriver::new(&config, scenario).unwrap();
//! let mut rng = Pcg64::seed_from_u64(0);
//! let outcome = driver.run(&mut rng, |_| {}).unwrap();
//! assert_eq!(outcome.history.len(), 5);
//! ```

use intercept_engine::{Candidate, Outcome, Scenario};
use intercept_evaluator::{FitnessEvaluator, InterceptEvaluator};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    config::{ConfigError, EvolutionConfig, GeneticParams, OffspringPolicy},
    operators::{self, CandidateSampler, Mutator},
    progress::{FitnessSummary, GenerationReport},
    selection::{self, Individual},
};

/// Candidates of one generation together with their cached fitness.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Scores `candidates` with `evaluator`, keeping their order.
    #[must_use]
    pub fn evaluate<E>(candidates: Vec<Candidate>, evaluator: &E) -> Self
    where
        E: FitnessEvaluator + ?Sized,
    {
        let fitness = evaluator.evaluate_all(&candidates);
        let individuals = candidates
            .into_iter()
            .zip(fitness)
            .map(|(candidate, fitness)| Individual::new(candidate, fitness))
            .collect();
        Self { individuals }
    }

    /// Individuals in evaluation order.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Number of individuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if the population has no individuals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Returns the fittest individual; the earliest one wins a tie.
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().min_by(|a, b| a.cmp_best_first(b))
    }

    /// Fitness statistics of the population, or `None` if it is empty.
    #[must_use]
    pub fn fitness_summary(&self) -> Option<FitnessSummary> {
        FitnessSummary::new(self.individuals.iter().map(|ind| ind.fitness))
    }
}

/// Lifecycle of an [`EvolutionDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum DriverState {
    Initializing,
    /// The next call to [`EvolutionDriver::step`] runs `generation`.
    Evolving {
        generation: usize,
    },
    Done,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    /// Best individual bred during the run.
    pub best: Individual,
    /// Flight outcome of the best candidate.
    pub outcome: Outcome,
    pub scenario: Scenario,
    pub generations: usize,
    pub history: Vec<GenerationReport>,
}

/// Runs the genetic algorithm against one scenario.
#[derive(Debug, Clone)]
pub struct EvolutionDriver {
    params: GeneticParams,
    sampler: CandidateSampler,
    mutator: Mutator,
    evaluator: InterceptEvaluator,
    state: DriverState,
    population: Population,
    best_ever: Option<(Individual, Outcome)>,
    history: Vec<GenerationReport>,
}

impl EvolutionDriver {
    /// Validates `config` and prepares a driver for `scenario`.
    pub fn new(config: &EvolutionConfig, scenario: Scenario) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            params: config.genetic,
            sampler: CandidateSampler::new(&config.bounds)?,
            mutator: Mutator::new(&config.genetic, &config.bounds)?,
            evaluator: InterceptEvaluator::new(config.physics, scenario),
            state: DriverState::Initializing,
            population: Population::default(),
            best_ever: None,
            history: Vec::with_capacity(config.genetic.generations),
        })
    }

    /// Validates `config` and draws the scenario from its ranges.
    pub fn with_random_scenario<R>(
        config: &EvolutionConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;
        let scenario = Scenario::random(&config.scenario, rng)?;
        Self::new(config, scenario)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Scenario the candidates are evolved against.
    #[must_use]
    pub fn scenario(&self) -> &Scenario {
        self.evaluator.scenario()
    }

    /// Population of the latest generation.
    ///
    /// Empty until [`Self::initialize`] has run.
    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Best bred individual so far, or `None` before the first generation.
    #[must_use]
    pub fn best_ever(&self) -> Option<&Individual> {
        self.best_ever.as_ref().map(|(best, _)| best)
    }

    /// Reports of every finished generation, oldest first.
    #[must_use]
    pub fn history(&self) -> &[GenerationReport] {
        &self.history
    }

    /// Draws and scores the initial population.
    ///
    /// Does nothing unless the driver is [`DriverState::Initializing`].
    pub fn initialize<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        if !self.state.is_initializing() {
            return;
        }
        log::info!(
            "evolving {} candidates for {} generations against {:?}",
            self.params.population_size,
            self.params.generations,
            self.evaluator.scenario(),
        );
        let candidates = self.sampler.population(self.params.population_size, rng);
        self.population = Population::evaluate(candidates, &self.evaluator);
        self.state = DriverState::Evolving { generation: 0 };
    }

    /// Runs one generation and returns its report, or `None` once the run is done.
    pub fn step<R>(&mut self, rng: &mut R) -> Option<GenerationReport>
    where
        R: Rng + ?Sized,
    {
        self.initialize(rng);
        let DriverState::Evolving { generation } = self.state else {
            return None;
        };

        let parents = selection::truncation_select(
            self.population.individuals(),
            self.params.population_size,
            rng,
        );
        let offspring = self.breed(&parents, rng);
        self.population = Population::evaluate(offspring, &self.evaluator);

        let generation_best = *self.population.best()?;
        let improved = self.update_best_ever(generation_best);
        let (best_ever, best_outcome) = self.best_ever?;
        let fitness = self.population.fitness_summary()?;

        let report = GenerationReport {
            generation,
            population_size: self.population.len(),
            generation_best,
            best_ever,
            improved,
            hit: best_outcome.is_hit(),
            fitness,
        };
        log::debug!(
            "generation {generation}: best-ever {:.6}, generation best {:.6}, mean {:.6}",
            best_ever.fitness,
            generation_best.fitness,
            fitness.mean,
        );
        self.history.push(report);

        self.state = if generation + 1 < self.params.generations {
            DriverState::Evolving {
                generation: generation + 1,
            }
        } else {
            log::info!(
                "finished after {} generations: best fitness {} ({:?})",
                self.params.generations,
                best_ever.fitness,
                best_outcome,
            );
            DriverState::Done
        };
        Some(report)
    }

    /// Runs every remaining generation, calling `on_generation` after each one.
    ///
    /// Returns `None` only if no generation produced offspring, which a validated
    /// configuration rules out.
    pub fn run<R, F>(mut self, rng: &mut R, mut on_generation: F) -> Option<EvolutionOutcome>
    where
        R: Rng + ?Sized,
        F: FnMut(&GenerationReport),
    {
        while let Some(report) = self.step(rng) {
            on_generation(&report);
        }
        self.into_outcome()
    }

    /// Packages the best-ever individual and history.
    #[must_use]
    pub fn into_outcome(self) -> Option<EvolutionOutcome> {
        let (best, outcome) = self.best_ever?;
        Some(EvolutionOutcome {
            best,
            outcome,
            scenario: *self.evaluator.scenario(),
            generations: self.history.len(),
            history: self.history,
        })
    }

    /// Replaces the best-ever record when `candidate` is strictly better.
    fn update_best_ever(&mut self, candidate: Individual) -> bool {
        let improved = self
            .best_ever
            .as_ref()
            .is_none_or(|(best, _)| candidate.cmp_best_first(best).is_lt());
        if improved {
            let outcome = self.evaluator.outcome(&candidate.candidate);
            self.best_ever = Some((candidate, outcome));
        }
        improved
    }

    fn breed<R>(&self, parents: &[Candidate], rng: &mut R) -> Vec<Candidate>
    where
        R: Rng + ?Sized,
    {
        let rate = self.params.crossover_rate;
        let mut offspring = Vec::with_capacity(parents.len());
        for pair in parents.chunks_exact(2) {
            let (p1, p2) = (&pair[0], &pair[1]);
            match self.params.offspring {
                OffspringPolicy::HalfBrood => {
                    let child = operators::crossover(p1, p2, rate, rng);
                    offspring.push(self.mutator.mutate(&child, rng));
                }
                OffspringPolicy::FullBrood => {
                    let (c1, c2) = operators::crossover_pair(p1, p2, rate, rng);
                    offspring.push(self.mutator.mutate(&c1, rng));
                    offspring.push(self.mutator.mutate(&c2, rng));
                }
            }
        }
        offspring
    }
}

#[cfg(test)]
mod tests {
    use intercept_engine::Vec2;
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64;

    use super::*;

    fn config(population_size: usize, generations: usize) -> EvolutionConfig {
        let mut config = EvolutionConfig::default();
        config.genetic.population_size = population_size;
        config.genetic.generations = generations;
        config
    }

    fn stationary_target() -> Scenario {
        Scenario::new(Vec2::new(1000.0, 2000.0), Vec2::ZERO)
    }

    #[test]
    fn test_state_transitions() {
        let mut driver = EvolutionDriver::new(&config(4, 2), stationary_target()).unwrap();
        let mut rng = Pcg64::seed_from_u64(0);
        assert_eq!(driver.state(), DriverState::Initializing);
        assert!(driver.best_ever().is_none());

        driver.initialize(&mut rng);
        assert_eq!(driver.state(), DriverState::Evolving { generation: 0 });
        assert_eq!(driver.population().len(), 4);
        // the initial population does not count towards the best-ever record
        assert!(driver.best_ever().is_none());

        assert_eq!(driver.step(&mut rng).unwrap().generation, 0);
        assert_eq!(driver.state(), DriverState::Evolving { generation: 1 });
        assert_eq!(driver.step(&mut rng).unwrap().generation, 1);
        assert!(driver.state().is_done());
        assert!(driver.step(&mut rng).is_none());
        assert_eq!(driver.history().len(), 2);
    }

    #[test]
    fn test_step_initializes_implicitly() {
        let mut driver = EvolutionDriver::new(&config(6, 1), stationary_target()).unwrap();
        let mut rng = Pcg64::seed_from_u64(1);
        let report = driver.step(&mut rng).unwrap();
        assert_eq!(report.generation, 0);
        assert!(report.improved);
        assert!(driver.state().is_done());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = EvolutionDriver::new(&config(1, 10), stationary_target()).unwrap_err();
        assert_eq!(err, ConfigError::PopulationSize { size: 1 });

        let mut rng = Pcg64::seed_from_u64(2);
        let err = EvolutionDriver::with_random_scenario(&config(10, 0), &mut rng).unwrap_err();
        assert_eq!(err, ConfigError::Generations);
    }

    #[test]
    fn test_random_scenario_within_ranges() {
        let config = config(4, 1);
        let mut rng = Pcg64::seed_from_u64(3);
        let driver = EvolutionDriver::with_random_scenario(&config, &mut rng).unwrap();
        let position = driver.scenario().target_position();
        let velocity = driver.scenario().target_velocity();
        assert!(config.scenario.position_x.contains(position.x));
        assert!(config.scenario.position_y.contains(position.y));
        assert!(config.scenario.velocity_x.contains(velocity.x));
        assert!(config.scenario.velocity_y.contains(velocity.y));
    }

    #[test]
    fn test_end_to_end_improves_on_stationary_target() {
        let scenario = stationary_target();
        let config = config(20, 50);
        let driver = EvolutionDriver::new(&config, scenario).unwrap();
        let mut rng = Pcg64::seed_from_u64(42);
        let mut reports = vec![];
        let outcome = driver.run(&mut rng, |report| reports.push(*report)).unwrap();

        assert_eq!(outcome.generations, 50);
        assert_eq!(outcome.history, reports);
        for pair in outcome.history.windows(2) {
            assert!(pair[1].best_ever.fitness >= pair[0].best_ever.fitness);
            assert!(pair[1].best_ever.fitness >= pair[1].generation_best.fitness);
        }
        let last = outcome.history.last().unwrap();
        assert_eq!(last.best_ever, outcome.best);
        assert_eq!(last.hit, outcome.outcome.is_hit());
        assert!(outcome.outcome.final_distance() < scenario.initial_distance());

        let evaluator = InterceptEvaluator::new(config.physics, scenario);
        assert_eq!(evaluator.evaluate(&outcome.best.candidate), outcome.best.fitness);
    }

    #[test]
    fn test_population_size_per_policy() {
        for (policy, expected) in [
            (OffspringPolicy::HalfBrood, 10),
            (OffspringPolicy::FullBrood, 20),
        ] {
            let mut config = config(20, 3);
            config.genetic.offspring = policy;
            let driver = EvolutionDriver::new(&config, stationary_target()).unwrap();
            let mut rng = Pcg64::seed_from_u64(7);
            let outcome = driver.run(&mut rng, |_| {}).unwrap();
            for report in &outcome.history {
                assert_eq!(report.population_size, expected, "{policy:?}");
            }
        }
    }

    #[test]
    fn test_odd_population_size() {
        let driver = EvolutionDriver::new(&config(7, 3), stationary_target()).unwrap();
        let mut rng = Pcg64::seed_from_u64(8);
        let outcome = driver.run(&mut rng, |_| {}).unwrap();
        // 2·(7/2) = 6 parents, 3 pairs
        for report in &outcome.history {
            assert_eq!(report.population_size, 3);
        }
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut rng = Pcg64::seed_from_u64(seed);
            EvolutionDriver::with_random_scenario(&config(16, 20), &mut rng)
                .unwrap()
                .run(&mut rng, |_| {})
                .unwrap()
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_population_best_prefers_earliest_tie() {
        let population = Population {
            individuals: vec![
                Individual::new(Candidate::new(0.1, 100.0), 0.5),
                Individual::new(Candidate::new(0.2, 100.0), 0.7),
                Individual::new(Candidate::new(0.3, 100.0), 0.7),
            ],
        };
        assert_eq!(population.best().unwrap().candidate.angle(), 0.2);
        assert!(Population::default().best().is_none());
    }

    #[test]
    fn test_best_ever_replaced_only_on_strict_improvement() {
        let mut driver = EvolutionDriver::new(&config(4, 1), stationary_target()).unwrap();
        let first = Individual::new(Candidate::new(0.1, 100.0), 0.5);
        let tie = Individual::new(Candidate::new(0.2, 100.0), 0.5);
        let worse = Individual::new(Candidate::new(0.3, 100.0), 0.4);
        let better = Individual::new(Candidate::new(0.4, 100.0), 0.6);

        assert!(driver.update_best_ever(first));
        assert_eq!(driver.best_ever(), Some(&first));

        assert!(!driver.update_best_ever(tie));
        assert_eq!(driver.best_ever(), Some(&first));
        assert!(!driver.update_best_ever(worse));
        assert!(!driver.update_best_ever(Individual::new(Candidate::new(0.5, 100.0), f64::NAN)));
        assert_eq!(driver.best_ever(), Some(&first));

        assert!(driver.update_best_ever(better));
        assert_eq!(driver.best_ever(), Some(&better));
        let (_, outcome) = driver.best_ever.unwrap();
        assert_eq!(outcome, driver.evaluator.outcome(&better.candidate));
    }
}
