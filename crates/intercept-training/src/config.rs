//! Immutable run configuration.
//!
//! Every tunable constant of a run lives in [`EvolutionConfig`] and is handed to the
//! components that need it; nothing is read from process-wide globals. All structs
//! deserialize with `#[serde(default)]`, so a JSON file only has to name the fields it
//! overrides:
//!
//! ```
//! use intercept_training::config::EvolutionConfig;
//!
//! let config: EvolutionConfig =
//!     serde_json::from_str(r#"{ "genetic": { "population_size": 20, "generations": 50 } }"#)
//!         .unwrap();
//! assert_eq!(config.genetic.population_size, 20);
//! assert_eq!(config.genetic.mutation_rate, 0.3);
//! config.validate().unwrap();
//! ```

use std::f64::consts::{FRAC_PI_2, FRAC_PI_8, PI};

use intercept_engine::{Interval, PhysicsError, PhysicsParams, RangeError, ScenarioRanges};
use serde::{Deserialize, Serialize};

/// How many children each parent pair produces.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum OffspringPolicy {
    /// One child per pair: the bred generation has `N/2` members and selection restores
    /// the full size `2·(N/2)` in the next generation.
    #[default]
    HalfBrood,
    /// Two complementary children per pair: the bred generation keeps `2·(N/2)` members.
    FullBrood,
}

/// When candidates are clamped into the mutation bounds.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "kebab-case")]
pub enum MutationClamp {
    /// Only mutated candidates are clamped; untouched ones pass through as they are.
    #[default]
    OnMutation,
    /// Every candidate leaving the mutation operator is clamped.
    Always,
}

/// Parameter ranges for candidate generation and mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateBounds {
    /// Launch angle range of the initial population (radians).
    pub initial_angle: Interval,
    /// Launch speed range of the initial population.
    pub initial_speed: Interval,
    /// Angle clamp applied after mutation.
    pub angle: Interval,
    /// Speed clamp applied after mutation.
    pub speed: Interval,
    /// Range of the uniform angle perturbation.
    pub angle_step: Interval,
    /// Range of the uniform speed perturbation.
    pub speed_step: Interval,
}

impl Default for CandidateBounds {
    fn default() -> Self {
        Self {
            initial_angle: Interval::new(FRAC_PI_8, FRAC_PI_2),
            initial_speed: Interval::new(100.0, 3000.0),
            angle: Interval::new(0.0, FRAC_PI_2),
            speed: Interval::new(10.0, 300.0),
            angle_step: Interval::symmetric(PI / 18.0),
            speed_step: Interval::symmetric(50.0),
        }
    }
}

impl CandidateBounds {
    /// Checks every range; the first invalid one is reported.
    pub fn validate(&self) -> Result<(), RangeError> {
        self.initial_angle.validate("initial angle")?;
        self.initial_speed.validate("initial speed")?;
        self.angle.validate("angle")?;
        self.speed.validate("speed")?;
        self.angle_step.validate("angle step")?;
        self.speed_step.validate("speed step")?;
        Ok(())
    }
}

/// Parameters of the generational loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticParams {
    /// Size `N` of the population restored by selection each generation.
    pub population_size: usize,
    /// Number of generations `G` to run.
    pub generations: usize,
    /// Probability that a child is mutated.
    pub mutation_rate: f64,
    /// Probability that a child takes a gene from its first parent.
    pub crossover_rate: f64,
    pub offspring: OffspringPolicy,
    pub clamp: MutationClamp,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 1000,
            mutation_rate: 0.3,
            crossover_rate: 0.5,
            offspring: OffspringPolicy::default(),
            clamp: MutationClamp::default(),
        }
    }
}

impl GeneticParams {
    /// Checks population size, generation count and probabilities.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationSize {
                size: self.population_size,
            });
        }
        if self.generations == 0 {
            return Err(ConfigError::Generations);
        }
        for (name, value) in [
            ("mutation rate", self.mutation_rate),
            ("crossover rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        Ok(())
    }
}

/// Complete configuration of one optimization run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub genetic: GeneticParams,
    pub bounds: CandidateBounds,
    pub physics: PhysicsParams,
    pub scenario: ScenarioRanges,
}

impl EvolutionConfig {
    /// Checks every section; the first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.genetic.validate()?;
        self.bounds.validate()?;
        self.physics.validate()?;
        self.scenario.validate()?;
        Ok(())
    }
}

/// A configuration that cannot drive a run.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be at least 2, got {size}")]
    PopulationSize { size: usize },
    #[display("generation count must be at least 1")]
    Generations,
    #[display("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[display("{_0}")]
    Range(RangeError),
    #[display("{_0}")]
    Physics(PhysicsError),
}

impl From<RangeError> for ConfigError {
    fn from(err: RangeError) -> Self {
        Self::Range(err)
    }
}

impl From<PhysicsError> for ConfigError {
    fn from(err: PhysicsError) -> Self {
        Self::Physics(err)
    }
}
