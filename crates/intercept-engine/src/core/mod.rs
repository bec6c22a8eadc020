//! Value types shared by the simulator, the evaluator and the training loop.
//!
//! - [`Vec2`] - 2D position / velocity
//! - [`Interval`] - Closed real range used for sampling and clamping
//! - [`Candidate`] - Launch parameters `(angle, speed)`
//! - [`Scenario`] - Target start position and constant velocity
//!
//! All types are `Copy` and serializable; none of them carries identity beyond its value.

pub use self::{candidate::*, interval::*, scenario::*, vec2::*};

mod candidate;
mod interval;
mod scenario;
mod vec2;
