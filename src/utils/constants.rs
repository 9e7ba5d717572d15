//! Simulation constants and defaults

/// Fixed simulation timestep in seconds (one animation tick at ~60 fps)
pub const DT: f64 = 0.016;

/// Velocity magnitude below which a body counts as at rest
///
/// This is a hysteresis band for the static/kinetic friction decision;
/// without it the friction sign would flip every step near zero velocity.
pub const REST_TOLERANCE: f64 = 0.005;

/// Numeric slack when comparing required static friction against its maximum
pub const STATIC_SLACK: f64 = 1e-4;

/// Extra overlap margin before the stacked system counts as detached
pub const DETACH_MARGIN: f64 = 0.05;

/// Default number of samples retained by the recorder
pub const RECORDER_CAPACITY: usize = 2048;
