//! Critical-force analysis for the stacked block-plank system
//!
//! Computes the threshold force magnitudes at which relative sliding between
//! block and plank first becomes possible, for each of the two points of
//! force application. Purely informational: the step resolver never reads
//! these values.

use serde::{Deserialize, Serialize};

use crate::params::SimParams;

/// Threshold forces for the onset of block-plank relative sliding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalForce {
    /// Minimum force on the block that makes it slide relative to the plank
    pub f1c: f64,
    /// Minimum force on the plank that makes the block slide relative to it
    pub f2c: f64,
}

/// Analyze the stacked system's critical forces
///
/// At the critical point the whole system accelerates at
/// `a_co = (F - f2_max) / (m + M)` with ground friction at its kinetic
/// maximum, while the non-driven body is held at the edge of slipping by
/// exactly `f1_max`. Isolating the non-driven body:
///
/// - force on the block: the plank feels `f1_max` forward and `f2_max`
///   backward, so `M * a_co = f1_max - f2_max` and
///   `F1c = (f1_max - f2_max) * (m + M) / M + f2_max`
/// - force on the plank: the block feels only `f1_max`, so
///   `m * a_co = f1_max` and `F2c = f1_max * (m + M) / m + f2_max`
///
/// Results are clamped non-negative. A non-positive mass on either body
/// yields `{0, 0}`.
pub fn critical_force(p: &SimParams) -> CriticalForce {
    let m = p.mass;
    let big_m = p.m_plank;
    if m <= 0.0 || big_m <= 0.0 {
        return CriticalForce { f1c: 0.0, f2c: 0.0 };
    }

    let f1_max = p.mu_block * m * p.g;
    let f2_max = p.mu_ground * (m + big_m) * p.g;

    let f1c = (f1_max - f2_max) * (m + big_m) / big_m + f2_max;
    let f2c = f1_max * (m + big_m) / m + f2_max;

    CriticalForce {
        f1c: f1c.max(0.0),
        f2c: f2c.max(0.0),
    }
}
