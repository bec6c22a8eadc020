//! Fitness evaluation for launch candidates.
//!
//! A candidate's fitness is derived from how its simulated flight ends:
//!
//! ```text
//! Hit  at time t              => fitness = 1000 / (t + 1)
//! Miss at time t, distance d  => fitness = 1 / (d + 1 + t)
//! ```
//!
//! - Hits reward early interception and are bounded above by 1000.
//! - Misses reward a small final separation and a short flight; they always lie in
//!   `(0, 1]`, so any hit before `t = 999` outranks every miss.
//! - Both denominators are at least 1, so fitness is always finite and positive for
//!   finite outcomes.
//!
//! # Architecture
//!
//! ```text
//! Evolution driver (intercept-training)
//!     ↓ scores populations through
//! FitnessEvaluator (trait)
//!     ↓ implemented by
//! InterceptEvaluator = Simulator + Scenario
//!     ↓ produces
//! Outcome → fitness
//! ```
//!
//! # Example
//!
//! ```
//! use intercept_engine::{Candidate, PhysicsParams, Scenario, Vec2};
//! use intercept_evaluator::{FitnessEvaluator, InterceptEvaluator};
//!
//! let scenario = Scenario::new(Vec2::new(1000.0, 2000.0), Vec2::ZERO);
//! let evaluator = InterceptEvaluator::new(PhysicsParams::default(), scenario);
//!
//! let fitness = evaluator.evaluate(&Candidate::new(1.0, 250.0));
//! assert!(fitness > 0.0 && fitness <= 1.0);
//! ```

pub use self::fitness::*;

mod fitness;
