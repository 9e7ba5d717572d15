//! Per-step friction resolution
//!
//! One resolution procedure per model variant, dispatched by the fixed
//! [`Model`] tag. Each step performs the variant's friction case analysis
//! (static vs kinetic at every contact surface), then integrates with
//! semi-implicit Euler over the fixed timestep [`DT`]:
//! `v_next = v + a*DT`, `x_next = x + v_next*DT`. Path length accumulates
//! the absolute per-step displacement.
//!
//! The resolver is pure: no I/O, no shared state, deterministic for a given
//! `(model, state, params)` triple. Step n+1 must always be computed from
//! the exact output of step n.

mod belt;
mod critical;
mod incline;
mod plank;

pub use critical::{critical_force, CriticalForce};

use crate::model::Model;
use crate::params::SimParams;
use crate::state::{ForceReadout, SimState, Status};
use crate::utils::constants::DT;

/// Build the initial state for a model and parameter set
///
/// Called on load and on every reset (including every parameter edit).
pub fn initialize(model: Model, params: &SimParams) -> SimState {
    SimState {
        t: 0.0,
        x1: params.x0,
        v1: params.v0,
        a1: 0.0,
        s1: 0.0,
        x2: 0.0,
        v2: if model == Model::Plank {
            params.v0_plank
        } else {
            0.0
        },
        a2: 0.0,
        s2: 0.0,
        forces: ForceReadout::default(),
        status: Status::Ready,
    }
}

/// Advance the simulation by one fixed time increment
///
/// Identity on terminal states: once the stacked system has detached,
/// repeated calls return the unmodified prior state.
pub fn step(model: Model, current: &SimState, params: &SimParams) -> SimState {
    if current.status.is_terminal() {
        return current.clone();
    }

    let mut next = current.clone();
    next.t = current.t + DT;

    match model {
        Model::Single => incline::resolve(current, &mut next, params),
        Model::Belt => belt::resolve(current, &mut next, params),
        Model::Plank => plank::resolve(current, &mut next, params),
    }

    if next.status != current.status {
        log::debug!(
            "t={:.3}: {} -> {}",
            next.t,
            current.status,
            next.status
        );
    }

    next
}
