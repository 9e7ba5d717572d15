//! Model variant tag

use serde::{Deserialize, Serialize};

/// Available friction models
///
/// Each variant selects one resolution procedure in the step resolver.
/// The tag is a closed enum: dispatch happens once per step, and the set
/// of models is fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    /// Single slider on an incline under gravity and an optional external force
    Single,
    /// Slider on a moving conveyor belt
    Belt,
    /// Block stacked on a plank, plank on the ground
    Plank,
}

impl Default for Model {
    fn default() -> Self {
        Model::Single
    }
}

impl Model {
    pub fn as_str(&self) -> &'static str {
        match self {
            Model::Single => "single",
            Model::Belt => "belt",
            Model::Plank => "plank",
        }
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
