use crate::{Candidate, LAUNCH_POSITION, Outcome, PhysicsParams, Scenario, Trajectory, Vec2};

/// Kinematic state of one flight between steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FlightState {
    time: f64,
    projectile: Vec2,
    target: Vec2,
    gravity_velocity: f64,
}

impl FlightState {
    fn launch(scenario: &Scenario) -> Self {
        Self {
            time: 0.0,
            projectile: LAUNCH_POSITION,
            target: scenario.target_position(),
            gravity_velocity: 0.0,
        }
    }

    #[must_use]
    pub(crate) const fn time(&self) -> f64 {
        self.time
    }

    #[must_use]
    pub(crate) const fn projectile(&self) -> Vec2 {
        self.projectile
    }

    #[must_use]
    pub(crate) const fn target(&self) -> Vec2 {
        self.target
    }

    #[must_use]
    pub(crate) fn separation(&self) -> f64 {
        self.projectile.distance(self.target)
    }
}

/// Flies candidates against a scenario under fixed physics.
///
/// The simulator itself is stateless; every call starts a fresh flight from
/// [`LAUNCH_POSITION`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Simulator {
    physics: PhysicsParams,
}

impl Simulator {
    /// Creates a simulator using `physics`.
    ///
    /// The constants are not validated here; callers validate them up front.
    #[must_use]
    pub const fn new(physics: PhysicsParams) -> Self {
        Self { physics }
    }

    /// Runs one flight and reports how it ended.
    #[must_use]
    pub fn simulate(&self, candidate: &Candidate, scenario: &Scenario) -> Outcome {
        self.fly(candidate, scenario, |_| {})
    }

    /// Runs one flight and records every position visited.
    ///
    /// The recording holds the launch state followed by the state after each step that did
    /// not end the flight; the terminating step only shows up in the outcome.
    #[must_use]
    pub fn record(&self, candidate: &Candidate, scenario: &Scenario) -> Trajectory {
        let mut states = vec![];
        let outcome = self.fly(candidate, scenario, |state| states.push(*state));
        Trajectory::new(*candidate, *scenario, &states, outcome)
    }

    fn fly<F>(&self, candidate: &Candidate, scenario: &Scenario, mut observe: F) -> Outcome
    where
        F: FnMut(&FlightState),
    {
        let PhysicsParams {
            gravity,
            time_step,
            collision_threshold,
        } = self.physics;
        let launch_velocity = candidate.launch_velocity();
        let mut state = FlightState::launch(scenario);
        observe(&state);

        loop {
            state.gravity_velocity -= gravity * time_step;
            state.projectile.x += launch_velocity.x * time_step;
            state.projectile.y += (launch_velocity.y + state.gravity_velocity) * time_step;
            state.target += scenario.target_velocity() * time_step;
            state.time += time_step;

            let distance = state.separation();
            if distance < collision_threshold {
                return Outcome::Hit {
                    time: state.time,
                    distance,
                };
            }

            if state.projectile.y < 0.0 || !state.projectile.y.is_finite() {
                state.projectile.y = 0.0;
                return Outcome::Miss {
                    time: state.time,
                    distance: state.separation(),
                };
            }

            observe(&state);
        }
    }
}
