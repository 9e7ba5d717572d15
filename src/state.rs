//! Simulation state snapshot
//!
//! One `SimState` is threaded through successive resolver steps. Each step
//! consumes the previous snapshot and produces a complete new one, so a
//! snapshot can be cloned, serialized, or handed to a renderer at any time.

use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::params::SimParams;

/// Friction regime classification for the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Initial state, no step taken yet
    Ready,
    /// At rest, static friction cancels the driving force
    Resting,
    /// Moving under kinetic friction
    Moving,
    /// Static friction just saturated; the body (or interface) starts to slip
    BreakingStatic,
    /// Moving exactly with the belt, held by static friction
    CoVelocity,
    /// Surfaces slide relative to each other under kinetic friction
    RelativeSliding,
    /// Block and plank accelerate together as one system
    MovingTogether,
    /// Block and plank both at rest relative to the ground
    RelativeRest,
    /// Block slid off the plank; terminal, state is frozen
    Detached,
}

impl Status {
    /// Terminal states have no outgoing transitions: `step` returns the
    /// state unchanged once one is reached.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Detached)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ready => "ready",
            Status::Resting => "resting",
            Status::Moving => "moving",
            Status::BreakingStatic => "breaking static",
            Status::CoVelocity => "co-velocity",
            Status::RelativeSliding => "relative sliding",
            Status::MovingTogether => "moving together",
            Status::RelativeRest => "relative rest",
            Status::Detached => "detached",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed force magnitudes from the last resolution, for force-diagram display
///
/// These are outputs only: nothing here feeds back into the next step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceReadout {
    /// Friction on body 1 (block)
    pub friction1: f64,
    /// Friction on body 2 (ground friction on the plank)
    pub friction2: f64,
    /// Normal force on body 1
    pub normal1: f64,
    /// Normal force on body 2
    pub normal2: f64,
    /// Weight of body 1
    pub gravity1: f64,
    /// Weight of body 2
    pub gravity2: f64,
    /// External force on body 1
    pub external1: f64,
    /// External force on body 2
    pub external2: f64,
}

/// Complete kinematic snapshot at one simulation time
///
/// Body 1 is the block; body 2 is the plank and is only meaningful for
/// [`Model::Plank`]. `s1`/`s2` are cumulative path lengths: the running sum
/// of absolute per-step displacement, never decreasing even when the signed
/// position oscillates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    /// Elapsed simulation time [s]
    pub t: f64,
    /// Block position [m]
    pub x1: f64,
    /// Block velocity [m/s]
    pub v1: f64,
    /// Block acceleration [m/s^2]
    pub a1: f64,
    /// Block cumulative path length [m]
    pub s1: f64,
    /// Plank position [m]
    pub x2: f64,
    /// Plank velocity [m/s]
    pub v2: f64,
    /// Plank acceleration [m/s^2]
    pub a2: f64,
    /// Plank cumulative path length [m]
    pub s2: f64,
    /// Forces from the last resolution, for display
    pub forces: ForceReadout,
    /// Friction regime of the last resolution
    pub status: Status,
}

impl SimState {
    /// Relative displacement between block and plank centers
    #[inline]
    pub fn relative_displacement(&self) -> f64 {
        self.x1 - self.x2
    }

    /// Total kinetic energy of the system [J]
    ///
    /// The plank term only contributes for [`Model::Plank`].
    pub fn kinetic_energy(&self, model: Model, params: &SimParams) -> f64 {
        let ek1 = 0.5 * params.mass * self.v1 * self.v1;
        match model {
            Model::Plank => ek1 + 0.5 * params.m_plank * self.v2 * self.v2,
            _ => ek1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeroed() -> SimState {
        SimState {
            t: 0.0,
            x1: 0.0,
            v1: 0.0,
            a1: 0.0,
            s1: 0.0,
            x2: 0.0,
            v2: 0.0,
            a2: 0.0,
            s2: 0.0,
            forces: ForceReadout::default(),
            status: Status::Ready,
        }
    }

    #[test]
    fn test_only_detached_is_terminal() {
        for status in [
            Status::Ready,
            Status::Resting,
            Status::Moving,
            Status::BreakingStatic,
            Status::CoVelocity,
            Status::RelativeSliding,
            Status::MovingTogether,
            Status::RelativeRest,
        ] {
            assert!(!status.is_terminal(), "{status} must not be terminal");
        }
        assert!(Status::Detached.is_terminal());
    }

    #[test]
    fn test_kinetic_energy() {
        let mut state = zeroed();
        state.v1 = 4.0;
        state.v2 = 1.0;

        let params = SimParams::plank(); // mass 1, plank mass 2
        let ek = state.kinetic_energy(Model::Plank, &params);
        assert!((ek - (8.0 + 1.0)).abs() < 1e-12);

        // Non-plank models ignore body 2
        let ek = state.kinetic_energy(Model::Single, &params);
        assert!((ek - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut state = zeroed();
        state.t = 1.5;
        state.v1 = -2.0;
        state.status = Status::RelativeSliding;
        state.forces.friction1 = -3.92;

        let json = serde_json::to_string(&state).unwrap();
        let back: SimState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
