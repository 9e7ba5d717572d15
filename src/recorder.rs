//! Bounded state recorder with CSV export
//!
//! Keeps a sliding window of the most recent state samples for charting.
//! The recorder owns the derived quantities the resolver deliberately does
//! not carry: total kinetic energy per sample, and cumulative friction heat
//! integrated from consecutive snapshots.

use std::collections::VecDeque;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::params::SimParams;
use crate::state::SimState;
use crate::utils::constants::RECORDER_CAPACITY;

/// One recorded sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64,
    pub x1: f64,
    pub v1: f64,
    pub a1: f64,
    pub x2: f64,
    pub v2: f64,
    pub a2: f64,
    /// Total kinetic energy [J]
    pub ek: f64,
    /// Cumulative kinetic friction heat [J]
    pub q: f64,
}

/// Sliding-window recorder of simulation samples
///
/// Holds at most `capacity` samples; once full, the oldest are discarded.
/// `record` only appends when simulation time strictly advances, so
/// repeated ticks at identical time (a paused loop, or a frozen terminal
/// state) are deduplicated.
#[derive(Debug, Clone)]
pub struct Recorder {
    model: Model,
    capacity: usize,
    buffer: VecDeque<Sample>,
    /// Running friction-heat integral, carried across discarded samples
    heat: f64,
}

impl Recorder {
    /// Create a recorder with the default capacity
    pub fn new(model: Model) -> Self {
        Self::with_capacity(model, RECORDER_CAPACITY)
    }

    /// Create a recorder holding at most `capacity` samples
    pub fn with_capacity(model: Model, capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        Self {
            model,
            capacity,
            buffer: VecDeque::with_capacity(capacity),
            heat: 0.0,
        }
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    /// Cumulative friction heat so far [J]
    pub fn heat(&self) -> f64 {
        self.heat
    }

    /// Most recent sample
    pub fn last(&self) -> Option<&Sample> {
        self.buffer.back()
    }

    /// Retained samples in chronological order
    pub fn data(&self) -> impl Iterator<Item = &Sample> {
        self.buffer.iter()
    }

    /// Discard all samples and reset the heat integral
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.heat = 0.0;
    }

    /// Record one state snapshot
    ///
    /// Returns `false` (and records nothing) when the snapshot's time does
    /// not strictly advance past the last retained sample.
    pub fn record(&mut self, state: &SimState, params: &SimParams) -> bool {
        if let Some(last) = self.buffer.back() {
            if state.t <= last.t {
                return false;
            }
            let dt = state.t - last.t;
            self.heat += self.heat_rate(state, params) * dt;
        }

        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(Sample {
            t: state.t,
            x1: state.x1,
            v1: state.v1,
            a1: state.a1,
            x2: state.x2,
            v2: state.v2,
            a2: state.a2,
            ek: state.kinetic_energy(self.model, params),
            q: self.heat,
        });
        true
    }

    /// Instantaneous friction heating power |f * v_rel| over the sliding
    /// interfaces [W]
    ///
    /// Static contacts contribute nothing: their relative velocity is zero
    /// (up to the rest tolerance) by construction.
    fn heat_rate(&self, state: &SimState, params: &SimParams) -> f64 {
        match self.model {
            Model::Single => (state.forces.friction1 * state.v1).abs(),
            Model::Belt => (state.forces.friction1 * (state.v1 - params.v_belt)).abs(),
            Model::Plank => {
                (state.forces.friction1 * (state.v1 - state.v2)).abs()
                    + (state.forces.friction2 * state.v2).abs()
            }
        }
    }

    /// Save retained samples to a CSV file
    ///
    /// Appends a `.csv` extension when missing.
    pub fn save(&self, filename: &str) -> io::Result<()> {
        let filename = if filename.to_lowercase().ends_with(".csv") {
            filename.to_string()
        } else {
            format!("{}.csv", filename)
        };
        let file = std::fs::File::create(&filename)?;
        self.save_to_writer(file)
    }

    /// Save retained samples as CSV to an arbitrary writer
    ///
    /// # CSV Format
    ///
    /// ```csv
    /// time [s],x1 [m],v1 [m/s],a1 [m/s^2],x2 [m],v2 [m/s],a2 [m/s^2],Ek [J],Q [J]
    /// 0.016,0.064,3.937,-3.92,0.0005,0.031,1.96,7.75,0.24
    /// ```
    pub fn save_to_writer<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record([
            "time [s]",
            "x1 [m]",
            "v1 [m/s]",
            "a1 [m/s^2]",
            "x2 [m]",
            "v2 [m/s]",
            "a2 [m/s^2]",
            "Ek [J]",
            "Q [J]",
        ])?;

        for s in &self.buffer {
            wtr.write_record([
                s.t.to_string(),
                s.x1.to_string(),
                s.v1.to_string(),
                s.a1.to_string(),
                s.x2.to_string(),
                s.v2.to_string(),
                s.a2.to_string(),
                s.ek.to_string(),
                s.q.to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}
