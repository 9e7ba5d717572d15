//! Physical parameters for a simulation run
//!
//! Parameters are immutable for the lifetime of a run: any edit goes through
//! `Simulation::set_params`, which reinitializes state. Fields that a model
//! variant does not use are simply never read by that variant's resolver.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Model;

/// Parameter validation errors
///
/// The resolver itself assumes validated parameters; these errors are only
/// produced at construction or parameter-edit time.
#[derive(Error, Debug)]
pub enum ParamError {
    #[error("body mass must be positive, got {0}")]
    NonPositiveMass(f64),

    #[error("plank mass must be positive, got {0}")]
    NonPositivePlankMass(f64),

    #[error("plank length must be positive, got {0}")]
    NonPositivePlankLength(f64),

    #[error("gravitational acceleration must be positive, got {0}")]
    NonPositiveGravity(f64),
}

/// Physical parameters, fixed for the duration of a run
///
/// Angles are in degrees; `f_angle` is measured relative to the surface.
/// Forces in newtons, masses in kilograms, lengths in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Gravitational acceleration [m/s^2]
    pub g: f64,
    /// Incline angle [deg]
    pub theta: f64,
    /// Surface friction coefficient (single/belt models)
    pub mu: f64,
    /// Body mass [kg]
    pub mass: f64,
    /// Body initial velocity [m/s]
    pub v0: f64,
    /// Body initial position [m]
    pub x0: f64,
    /// External force magnitude [N] (single model)
    pub f_mag: f64,
    /// External force angle relative to the surface [deg]
    pub f_angle: f64,
    /// Belt length [m]
    pub belt_length: f64,
    /// Belt speed [m/s]
    pub v_belt: f64,
    /// Plank mass [kg]
    pub m_plank: f64,
    /// Plank length [m]
    pub l_plank: f64,
    /// Block-plank friction coefficient
    pub mu_block: f64,
    /// Plank-ground friction coefficient
    pub mu_ground: f64,
    /// Plank initial velocity [m/s]
    pub v0_plank: f64,
    /// Constant force applied directly to the block [N]
    pub f_block: f64,
    /// Constant force applied directly to the plank [N]
    pub f_plank: f64,
}

impl SimParams {
    /// Canonical preset for the single-slider incline model
    pub fn single() -> Self {
        Self {
            g: 9.8,
            theta: 30.0,
            mu: 0.2,
            mass: 2.0,
            v0: 0.0,
            x0: 1.0,
            f_mag: 0.0,
            f_angle: 0.0,
            belt_length: 10.0,
            v_belt: 0.0,
            m_plank: 0.0,
            l_plank: 0.0,
            mu_block: 0.0,
            mu_ground: 0.0,
            v0_plank: 0.0,
            f_block: 0.0,
            f_plank: 0.0,
        }
    }

    /// Canonical preset for the conveyor-belt model (flat belt moving right)
    pub fn belt() -> Self {
        Self {
            g: 9.8,
            theta: 0.0,
            mu: 0.5,
            mass: 1.0,
            v0: 0.0,
            x0: 0.0,
            f_mag: 0.0,
            f_angle: 0.0,
            belt_length: 8.0,
            v_belt: 4.0,
            m_plank: 0.0,
            l_plank: 0.0,
            mu_block: 0.0,
            mu_ground: 0.0,
            v0_plank: 0.0,
            f_block: 0.0,
            f_plank: 0.0,
        }
    }

    /// Canonical preset for the stacked block-plank model
    pub fn plank() -> Self {
        Self {
            g: 9.8,
            theta: 0.0,
            mu: 0.0,
            mass: 1.0,
            v0: 4.0,
            x0: 0.0,
            f_mag: 0.0,
            f_angle: 0.0,
            belt_length: 0.0,
            v_belt: 0.0,
            m_plank: 2.0,
            l_plank: 4.0,
            mu_block: 0.4,
            mu_ground: 0.1,
            v0_plank: 0.0,
            f_block: 0.0,
            f_plank: 2.0,
        }
    }

    /// Incline angle in radians
    #[inline]
    pub fn theta_rad(&self) -> f64 {
        self.theta.to_radians()
    }

    /// External force angle in radians
    #[inline]
    pub fn f_angle_rad(&self) -> f64 {
        self.f_angle.to_radians()
    }

    /// Check that the parameters are physically meaningful for `model`
    ///
    /// Mass and gravity must be strictly positive everywhere; the plank model
    /// additionally requires a positive plank mass and length (division by
    /// both happens inside the resolver).
    pub fn validate(&self, model: Model) -> Result<(), ParamError> {
        if self.g <= 0.0 {
            return Err(ParamError::NonPositiveGravity(self.g));
        }
        if self.mass <= 0.0 {
            return Err(ParamError::NonPositiveMass(self.mass));
        }
        if model == Model::Plank {
            if self.m_plank <= 0.0 {
                return Err(ParamError::NonPositivePlankMass(self.m_plank));
            }
            if self.l_plank <= 0.0 {
                return Err(ParamError::NonPositivePlankLength(self.l_plank));
            }
        }
        Ok(())
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self::single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(SimParams::single().validate(Model::Single).is_ok());
        assert!(SimParams::belt().validate(Model::Belt).is_ok());
        assert!(SimParams::plank().validate(Model::Plank).is_ok());
    }

    #[test]
    fn test_reject_zero_mass() {
        let mut p = SimParams::single();
        p.mass = 0.0;
        assert!(matches!(
            p.validate(Model::Single),
            Err(ParamError::NonPositiveMass(_))
        ));
    }

    #[test]
    fn test_plank_requires_plank_fields() {
        let mut p = SimParams::plank();
        p.m_plank = 0.0;
        assert!(p.validate(Model::Plank).is_err());
        // Same parameters are fine for a model that never reads the plank
        assert!(p.validate(Model::Single).is_ok());

        let mut p = SimParams::plank();
        p.l_plank = -1.0;
        assert!(matches!(
            p.validate(Model::Plank),
            Err(ParamError::NonPositivePlankLength(_))
        ));
    }

    #[test]
    fn test_angle_conversion() {
        let mut p = SimParams::single();
        p.theta = 30.0;
        assert!((p.theta_rad() - std::f64::consts::FRAC_PI_6).abs() < 1e-12);
    }

    #[test]
    fn test_serde_roundtrip() {
        let p = SimParams::plank();
        let json = serde_json::to_string(&p).unwrap();
        let back: SimParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
