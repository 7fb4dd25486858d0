//! Error types shared across the physics components.

use crate::parser::ParseError;
use thiserror::Error;

/// Invalid static inputs, rejected when a trebuchet is configured
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("beam {field} must be positive and finite, got {value}")]
    InvalidGeometry { field: &'static str, value: f64 },
    #[error("{which} mass must be non-negative and finite, got {value}")]
    NegativeMass { which: &'static str, value: f64 },
    #[error("gravity must be positive and finite, got {0}")]
    InvalidGravity(f64),
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("base height must be non-negative and finite, got {0}")]
    InvalidBaseHeight(f64),
    #[error("degenerate beam geometry: centroidal inertia is {inertia}")]
    DegenerateGeometry { inertia: f64 },
    #[error("total inertia about the pivot must be positive, got {inertia}")]
    NonPositiveInertia { inertia: f64 },
}

/// A launch quantity that cannot be derived from otherwise valid state
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("projectile mass is zero")]
    ZeroProjectileMass,
    #[error("released potential energy must be positive, got {energy}")]
    NonPositivePotentialEnergy { energy: f64 },
    #[error("projectile never reaches the ground (discriminant {discriminant})")]
    NoLanding { discriminant: f64 },
    #[error("{quantity} is not finite")]
    NonFinite { quantity: &'static str },
}

/// Any failure while running a scenario end to end
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("scenario has {0} error(s)")]
    Analysis(usize),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Computation(#[from] ComputationError),
}
