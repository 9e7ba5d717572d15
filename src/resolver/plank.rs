//! Stacked block-plank resolution
//!
//! Two coupled friction interfaces: block on plank (`f1`, reaction `-f1` on
//! the plank) and plank on ground (`f2`). Ground friction is resolved first
//! from the plank velocity alone; the block interface is then either already
//! sliding (kinetic) or tested with the common-acceleration hypothesis.

use crate::params::SimParams;
use crate::state::{ForceReadout, SimState, Status};
use crate::utils::constants::{DETACH_MARGIN, DT, REST_TOLERANCE, STATIC_SLACK};

/// Resolve one step of the stacked block-plank model
///
/// Resolution order, per step:
///
/// 1. Ground friction `f2`, from the plank velocity only: kinetic when the
///    plank moves; otherwise static, balancing the two applied constant
///    forces up to its maximum.
/// 2. Block interface: sliding (`|v_rel|` above tolerance) gives kinetic
///    `f1` and independent accelerations via Newton's third law.
/// 3. Otherwise hypothesize common acceleration and back-solve the static
///    friction the block interface would require; if it exceeds the static
///    limit the interface ruptures and accelerations are recomputed
///    independently.
/// 4. After integration, detachment: relative displacement beyond half the
///    plank length (plus margin) freezes the state permanently.
pub(super) fn resolve(current: &SimState, next: &mut SimState, p: &SimParams) {
    let m = p.mass;
    let big_m = p.m_plank;
    let f1_ext = p.f_block;
    let f2_ext = p.f_plank;

    let normal1 = m * p.g;
    let normal2 = (m + big_m) * p.g;
    let f1_max = p.mu_block * normal1;
    let f2_max = p.mu_ground * normal2;

    let v_rel = current.v1 - current.v2;

    // Ground friction, from the plank velocity alone
    let f2 = if current.v2.abs() > REST_TOLERANCE {
        -current.v2.signum() * f2_max
    } else {
        let f_net = f1_ext + f2_ext;
        if f_net.abs() <= f2_max {
            -f_net
        } else {
            -f_net.signum() * f2_max
        }
    };

    let f1;
    let a1;
    let a2;

    if v_rel.abs() > REST_TOLERANCE {
        // Interface already sliding: kinetic friction opposes the slip
        f1 = -v_rel.signum() * f1_max;
        a1 = (f1_ext + f1) / m;
        a2 = (f2_ext - f1 + f2) / big_m;
        next.status = Status::RelativeSliding;
    } else {
        // Common-acceleration hypothesis
        let a_co = (f1_ext + f2_ext + f2) / (m + big_m);
        let f1_req = m * a_co - f1_ext;

        if f1_req.abs() <= f1_max + STATIC_SLACK {
            a1 = a_co;
            a2 = a_co;
            f1 = f1_req;
            next.status =
                if a_co.abs() < REST_TOLERANCE && current.v2.abs() < REST_TOLERANCE {
                    Status::RelativeRest
                } else {
                    Status::MovingTogether
                };
        } else {
            // Static friction cannot sustain common motion: it ruptures
            f1 = f1_req.signum() * f1_max;
            a1 = (f1_ext + f1) / m;
            a2 = (f2_ext - f1 + f2) / big_m;
            next.status = Status::BreakingStatic;
        }
    }

    next.a1 = a1;
    next.a2 = a2;
    next.v1 = current.v1 + a1 * DT;
    next.v2 = current.v2 + a2 * DT;
    next.x1 = current.x1 + next.v1 * DT;
    next.x2 = current.x2 + next.v2 * DT;
    next.s1 = current.s1 + (next.v1 * DT).abs();
    next.s2 = current.s2 + (next.v2 * DT).abs();

    if next.relative_displacement().abs() > p.l_plank / 2.0 + DETACH_MARGIN {
        next.status = Status::Detached;
    }

    next.forces = ForceReadout {
        friction1: f1,
        friction2: f2,
        normal1,
        normal2,
        gravity1: m * p.g,
        gravity2: big_m * p.g,
        external1: f1_ext,
        external2: f2_ext,
    };
}
