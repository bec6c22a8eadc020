//! Genetic search for launch parameters that intercept a moving target.
//!
//! # How Training Works
//!
//! 1. **Scenario** - One target position and velocity is fixed for the whole run
//! 2. **Population** - `N` random launch candidates `(angle, speed)` are drawn
//! 3. **Evaluation** - Each candidate is flown by the simulator and scored
//!    (`intercept-evaluator`)
//! 4. **Selection** - The better half survives and is resampled back to full size
//! 5. **Reproduction** - Pairs of survivors produce offspring by crossover and mutation
//! 6. **Repeat** - For a fixed number of generations, tracking the best candidate ever seen
//!
//! # Architecture
//!
//! ```text
//! EvolutionConfig (config)
//!     ↓ validated into
//! EvolutionDriver (genetic)
//!     ↓ uses
//! CandidateSampler / crossover / Mutator (operators) + truncation_select (selection)
//!     ↓ scored by
//! InterceptEvaluator (intercept-evaluator)
//!     ↓ summarized as
//! GenerationReport (progress)
//! ```
//!
//! Randomness is always injected by the caller, so a run seeded with a fixed generator
//! is fully reproducible.

pub mod config;
pub mod genetic;
pub mod operators;
pub mod progress;
pub mod selection;
