use chrono::{DateTime, Utc};
use intercept_engine::{Candidate, Outcome, Scenario, Simulator, Trajectory};
use intercept_training::{config::EvolutionConfig, genetic::EvolutionOutcome};
use serde::{Deserialize, Serialize};

/// Best launch parameters found by one `evolve` run, with everything needed to reproduce
/// the run and its flight.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SolutionRecord {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub seed: u64,
    pub config: EvolutionConfig,
    pub scenario: Scenario,
    pub candidate: Candidate,
    pub fitness: f64,
    pub outcome: Outcome,
    pub generations: usize,
}

impl SolutionRecord {
    /// Captures the result of a finished run, stamped with the current time.
    #[must_use]
    pub fn new(
        name: String,
        seed: u64,
        config: EvolutionConfig,
        evolution: &EvolutionOutcome,
    ) -> Self {
        Self {
            name,
            created_at: Utc::now(),
            seed,
            config,
            scenario: evolution.scenario,
            candidate: evolution.best.candidate,
            fitness: evolution.best.fitness,
            outcome: evolution.outcome,
            generations: evolution.generations,
        }
    }

    /// Flies the recorded candidate again with the recorded physics.
    #[must_use]
    pub fn trajectory(&self) -> Trajectory {
        Simulator::new(self.config.physics).record(&self.candidate, &self.scenario)
    }
}
