//! Ballistic simulation for the interception search.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - Plain value types: [`Vec2`], [`Candidate`], [`Scenario`], [`Interval`]
//! - [`engine`] - Time-stepped flight simulation: [`PhysicsParams`], [`Simulator`],
//!   [`Outcome`], [`Trajectory`]
//!
//! A candidate is fired from the origin; the target starts at the scenario's position and
//! drifts with constant velocity. The simulator advances both in fixed steps until the
//! projectile comes within the collision threshold of the target (a hit) or drops below
//! ground level (a miss).
//!
//! # Example
//!
//! ```
//! use std::f64::consts::FRAC_PI_4;
//!
//! use intercept_engine::{Candidate, PhysicsParams, Scenario, Simulator, Vec2};
//!
//! let simulator = Simulator::new(PhysicsParams::default());
//! let scenario = Scenario::new(Vec2::new(1000.0, 2000.0), Vec2::ZERO);
//! let outcome = simulator.simulate(&Candidate::new(FRAC_PI_4, 100.0), &scenario);
//!
//! assert!(outcome.is_miss());
//! assert!(outcome.time() > 0.0);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
