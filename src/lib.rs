//! frictionsim - Fixed-step friction mechanics simulation core
//!
//! Simulates classical rigid-body friction for three canonical textbook
//! configurations:
//!
//! - a single slider on an incline under gravity and an optional external force
//! - a slider on a moving conveyor belt
//! - a stacked block-plank system with two independent friction interfaces
//!
//! The core is the per-step resolver: friction is non-smooth, so each step
//! is a case analysis (static vs kinetic at every contact surface) solved
//! self-consistently before integrating one fixed time increment with
//! semi-implicit Euler.
//!
//! # Example
//!
//! ```rust
//! use frictionsim::prelude::*;
//!
//! let mut sim = Simulation::new(Model::Plank, SimParams::plank()).unwrap();
//! let mut recorder = Recorder::new(Model::Plank);
//!
//! while !sim.is_finished() && sim.state().t < 5.0 {
//!     sim.step();
//!     recorder.record(sim.state(), sim.params());
//! }
//!
//! println!("final status: {}", sim.state().status);
//! println!("friction heat: {:.3} J", recorder.heat());
//! ```

pub mod model;
pub mod params;
pub mod recorder;
pub mod resolver;
pub mod runner;
pub mod state;
pub mod utils;

pub use model::Model;
pub use params::{ParamError, SimParams};
pub use recorder::{Recorder, Sample};
pub use resolver::{critical_force, initialize, step, CriticalForce};
pub use runner::{Simulation, TickHandle, Ticker};
pub use state::{ForceReadout, SimState, Status};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::model::Model;
    pub use crate::params::{ParamError, SimParams};
    pub use crate::recorder::{Recorder, Sample};
    pub use crate::resolver::{critical_force, initialize, step, CriticalForce};
    pub use crate::runner::{Simulation, TickHandle, Ticker};
    pub use crate::state::{ForceReadout, SimState, Status};
    pub use crate::utils::constants::DT;
}
