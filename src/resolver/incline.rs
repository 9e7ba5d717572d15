//! Single-body incline resolution
//!
//! A slider on an incline under gravity, surface friction, and an optional
//! external force applied at an angle to the surface.

use nalgebra::Vector2;

use crate::params::SimParams;
use crate::state::{ForceReadout, SimState, Status};
use crate::utils::constants::{DT, REST_TOLERANCE};

/// Resolve one step of the single-slider model
///
/// The external force is decomposed into components along and perpendicular
/// to the surface. The perpendicular component unloads the normal force,
/// which is clamped at zero (the model does not simulate lift-off beyond
/// the clamp). Along the surface the case analysis is:
///
/// - moving: kinetic friction `mu*N` opposes the velocity sign
/// - at rest, drive within the static limit: friction cancels the drive
///   exactly, velocity is pinned to zero
/// - at rest, drive beyond the limit: static friction saturates and the
///   body starts to accelerate
pub(super) fn resolve(current: &SimState, next: &mut SimState, p: &SimParams) {
    let theta = p.theta_rad();
    // External force in surface coordinates: x along the slope, y outward
    let f_ext = Vector2::new(
        p.f_mag * p.f_angle_rad().cos(),
        p.f_mag * p.f_angle_rad().sin(),
    );

    let normal = (p.mass * p.g * theta.cos() - f_ext.y).max(0.0);
    let f_max = p.mu * normal;
    let drive = f_ext.x - p.mass * p.g * theta.sin();

    let friction;
    let accel;
    let mut pinned = false;

    if current.v1.abs() > REST_TOLERANCE {
        friction = -current.v1.signum() * f_max;
        accel = (drive + friction) / p.mass;
        next.status = Status::Moving;
    } else if drive.abs() <= f_max {
        friction = -drive;
        accel = 0.0;
        pinned = true;
        next.status = Status::Resting;
    } else {
        friction = -drive.signum() * f_max;
        accel = (drive + friction) / p.mass;
        next.status = Status::BreakingStatic;
    }

    next.a1 = accel;
    // Pinning to exactly zero avoids drift inside the tolerance band
    next.v1 = if pinned { 0.0 } else { current.v1 + accel * DT };
    next.x1 = current.x1 + next.v1 * DT;
    next.s1 = current.s1 + (next.v1 * DT).abs();

    next.forces = ForceReadout {
        friction1: friction,
        friction2: 0.0,
        normal1: normal,
        normal2: 0.0,
        gravity1: p.mass * p.g,
        gravity2: 0.0,
        external1: p.f_mag,
        external2: 0.0,
    };
}
