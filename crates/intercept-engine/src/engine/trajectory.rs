use serde::{Deserialize, Serialize};

use super::simulator::FlightState;
use crate::{Candidate, Outcome, Scenario, Vec2};

/// Positions of projectile and target at one recorded instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub projectile: Vec2,
    pub target: Vec2,
}

/// A recorded flight, as consumed by renderers.
///
/// Produced by [`Simulator::record`](crate::Simulator::record). `points` starts at launch
/// and excludes the step that ended the flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub candidate: Candidate,
    pub scenario: Scenario,
    pub points: Vec<TrajectoryPoint>,
    pub outcome: Outcome,
}

impl Trajectory {
    pub(crate) fn new(
        candidate: Candidate,
        scenario: Scenario,
        states: &[FlightState],
        outcome: Outcome,
    ) -> Self {
        let points = states
            .iter()
            .map(|state| TrajectoryPoint {
                time: state.time(),
                projectile: state.projectile(),
                target: state.target(),
            })
            .collect();
        Self {
            candidate,
            scenario,
            points,
            outcome,
        }
    }

    /// Axis-aligned box `(min, max)` containing every recorded position.
    ///
    /// Returns `None` for an empty recording.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut positions = self
            .points
            .iter()
            .flat_map(|p| [p.projectile, p.target])
            .filter(|p| p.is_finite());
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| {
            (
                Vec2::new(min.x.min(p.x), min.y.min(p.y)),
                Vec2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }
}
