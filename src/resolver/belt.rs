//! Conveyor-belt resolution
//!
//! Same surface-force structure as the incline, but friction is keyed to
//! the velocity relative to the belt, and gravity along the slope is the
//! only driving term (no applied external force; `theta` may be zero for
//! a flat belt).

use crate::params::SimParams;
use crate::state::{ForceReadout, SimState, Status};
use crate::utils::constants::{DT, REST_TOLERANCE};

/// Resolve one step of the conveyor-belt model
///
/// When the body moves relative to the belt, kinetic friction opposes the
/// relative-velocity sign. When it momentarily matches the belt speed,
/// static friction holds it there if gravity along the slope is within the
/// static limit (velocity pinned to exactly `v_belt`); otherwise the body
/// slips despite the momentary equal speed.
pub(super) fn resolve(current: &SimState, next: &mut SimState, p: &SimParams) {
    let theta = p.theta_rad();
    let normal = p.mass * p.g * theta.cos();
    let f_max = p.mu * normal;
    // Gravity along the slope, negative pointing downhill
    let drive = -p.mass * p.g * theta.sin();
    let v_rel = current.v1 - p.v_belt;

    let friction;
    let accel;
    let mut pinned = false;

    if v_rel.abs() > REST_TOLERANCE {
        friction = -v_rel.signum() * f_max;
        accel = (drive + friction) / p.mass;
        next.status = Status::RelativeSliding;
    } else if drive.abs() <= f_max {
        friction = -drive;
        accel = 0.0;
        pinned = true;
        next.status = Status::CoVelocity;
    } else {
        // At belt speed but static friction cannot hold: the body slips
        // downhill relative to the belt, so friction opposes the drive.
        friction = -drive.signum() * f_max;
        accel = (drive + friction) / p.mass;
        next.status = Status::RelativeSliding;
    }

    next.a1 = accel;
    next.v1 = if pinned {
        p.v_belt
    } else {
        current.v1 + accel * DT
    };
    next.x1 = current.x1 + next.v1 * DT;
    next.s1 = current.s1 + (next.v1 * DT).abs();

    next.forces = ForceReadout {
        friction1: friction,
        friction2: 0.0,
        normal1: normal,
        normal2: 0.0,
        gravity1: p.mass * p.g,
        gravity2: 0.0,
        external1: 0.0,
        external2: 0.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::resolver::{initialize, step};
    use approx::assert_relative_eq;

    #[test]
    fn test_body_dragged_up_to_belt_speed() {
        let params = SimParams::belt(); // flat, v_belt = 4, body at rest

        let mut state = initialize(Model::Belt, &params);
        let next = step(Model::Belt, &state, &params);

        // Body slower than belt: friction drags it forward
        assert_eq!(next.status, Status::RelativeSliding);
        let f_max = params.mu * params.mass * params.g;
        assert_relative_eq!(next.forces.friction1, f_max, epsilon = 1e-12);
        assert!(next.a1 > 0.0);

        // Run until the body reaches belt speed
        state = next;
        for _ in 0..200 {
            state = step(Model::Belt, &state, &params);
        }
        assert_eq!(state.status, Status::CoVelocity);
        assert_eq!(state.v1, params.v_belt);
        assert_eq!(state.a1, 0.0);
    }

    #[test]
    fn test_covelocity_pins_exactly() {
        let mut params = SimParams::belt();
        params.theta = 10.0; // shallow enough that static friction holds
        params.v0 = params.v_belt;

        let mut state = initialize(Model::Belt, &params);
        for _ in 0..100 {
            state = step(Model::Belt, &state, &params);
            assert_eq!(state.status, Status::CoVelocity);
            assert_eq!(state.v1, params.v_belt);
            assert_eq!(state.a1, 0.0);
        }
    }

    #[test]
    fn test_steep_belt_slips_despite_equal_speed() {
        // tan(theta) > mu: static friction cannot hold the body on the belt
        let mut params = SimParams::belt();
        params.mu = 0.2;
        params.theta = 45.0;
        params.v0 = params.v_belt;

        let state = initialize(Model::Belt, &params);
        let next = step(Model::Belt, &state, &params);

        assert_eq!(next.status, Status::RelativeSliding);
        // Friction acts uphill, against the impending downhill slip
        assert!(next.forces.friction1 > 0.0);
        // But gravity wins: the body accelerates downhill
        assert!(next.a1 < 0.0);
    }

    #[test]
    fn test_faster_than_belt_is_braked() {
        let mut params = SimParams::belt();
        params.v0 = 6.0; // faster than the belt at 4

        let state = initialize(Model::Belt, &params);
        let next = step(Model::Belt, &state, &params);

        assert_eq!(next.status, Status::RelativeSliding);
        assert!(next.forces.friction1 < 0.0);
        assert!(next.v1 < 6.0);
    }
}
