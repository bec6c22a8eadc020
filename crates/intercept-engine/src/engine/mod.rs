//! Fixed-step flight simulation.
//!
//! - [`PhysicsParams`] - Gravity, time step and collision threshold
//! - [`Simulator`] - Flies a [`Candidate`](crate::Candidate) against a
//!   [`Scenario`](crate::Scenario)
//! - [`Outcome`] - `Hit` or `Miss`, with elapsed time and final separation
//! - [`Trajectory`] - Recorded positions for rendering
//!
//! # Step Order
//!
//! Each step of length `Δt` runs, in order:
//!
//! 1. `vy -= g·Δt` (the accumulated gravity term starts at zero)
//! 2. `x += cos(angle)·speed·Δt`, `y += (sin(angle)·speed + vy)·Δt`
//! 3. `target += target_velocity·Δt`
//! 4. If the projectile is closer than the collision threshold: `Hit`
//! 5. If the projectile is below ground: clamp `y` to zero, `Miss`
//!
//! The accumulated gravity term decreases every step, so the projectile always comes
//! back down and the loop terminates. A non-finite height also ends the flight as a
//! miss.

pub use self::{outcome::*, physics::*, simulator::*, trajectory::*};

mod outcome;
mod physics;
mod simulator;
mod trajectory;
