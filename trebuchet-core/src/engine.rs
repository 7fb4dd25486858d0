use crate::error::ConfigurationError;
use crate::geometry::{beam_mass_properties, BeamGeometry, BeamMassProperties};
use crate::inertia::{system_inertia, PointMass, SystemInertia};
use glam::DVec2;
use std::f64::consts::PI;

pub const DEFAULT_GRAVITY: f64 = 9.81;
pub const DEFAULT_TIME_STEP: f64 = 0.001;

/// Start angle used when the base is at least as tall as the short arm
pub const CLAMPED_START_ANGLE: f64 = -89.0 * PI / 180.0;

/// Static description of a trebuchet and its simulation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrebuchetConfig {
    pub geometry: BeamGeometry,
    pub counterweight_mass: f64,
    pub projectile_mass: f64,
    /// Height of the pivot above the ground
    pub base_height: f64,
    pub gravity: f64,
    pub time_step: f64,
}

impl TrebuchetConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.geometry.validate()?;
        for (which, value) in [
            ("counterweight", self.counterweight_mass),
            ("projectile", self.projectile_mass),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::NegativeMass { which, value });
            }
        }
        if !self.base_height.is_finite() || self.base_height < 0.0 {
            return Err(ConfigurationError::InvalidBaseHeight(self.base_height));
        }
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(ConfigurationError::InvalidGravity(self.gravity));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(ConfigurationError::InvalidTimeStep(self.time_step));
        }
        Ok(())
    }
}

/// Angle and angular velocity of the arm.
///
/// `theta` is measured from the horizontal; decreasing `theta` lowers the
/// counterweight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmState {
    pub theta: f64,
    pub theta_dot: f64,
    /// Angle at the start of the simulation
    pub theta0: f64,
}

impl ArmState {
    pub fn at_rest(theta: f64) -> Self {
        Self {
            theta,
            theta_dot: 0.0,
            theta0: theta,
        }
    }
}

/// Largest angle at which the projectile end stays clear of the ground
pub fn start_angle(base_height: f64, short_arm: f64) -> f64 {
    if base_height >= short_arm {
        CLAMPED_START_ANGLE
    } else {
        (base_height / short_arm).asin()
    }
}

/// A validated trebuchet with its derived mass properties.
///
/// Only constructible through [`Trebuchet::new`], so the total inertia is
/// always positive.
#[derive(Debug, Clone)]
pub struct Trebuchet {
    config: TrebuchetConfig,
    beam: BeamMassProperties,
    inertia: SystemInertia,
}

impl Trebuchet {
    pub fn new(config: TrebuchetConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let beam = beam_mass_properties(&config.geometry)?;
        let inertia = system_inertia(
            &beam,
            PointMass::new(config.counterweight_mass, config.geometry.long_arm),
            PointMass::new(config.projectile_mass, -config.geometry.short_arm),
        );
        if !inertia.total_inertia.is_finite() || inertia.total_inertia <= 0.0 {
            return Err(ConfigurationError::NonPositiveInertia {
                inertia: inertia.total_inertia,
            });
        }

        Ok(Self {
            config,
            beam,
            inertia,
        })
    }

    pub fn config(&self) -> &TrebuchetConfig {
        &self.config
    }

    pub fn beam(&self) -> &BeamMassProperties {
        &self.beam
    }

    pub fn inertia(&self) -> &SystemInertia {
        &self.inertia
    }

    pub fn initial_state(&self) -> ArmState {
        ArmState::at_rest(start_angle(
            self.config.base_height,
            self.config.geometry.short_arm,
        ))
    }

    /// Angular acceleration under gravity at the given arm angle
    pub fn angular_acceleration(&self, theta: f64) -> f64 {
        let SystemInertia {
            total_inertia,
            net_torque_coefficient,
        } = self.inertia;
        (-net_torque_coefficient * self.config.gravity / total_inertia) * theta.cos()
    }

    /// Counterweight position relative to the pivot, y up
    pub fn counterweight_position(&self, state: &ArmState) -> DVec2 {
        DVec2::new(state.theta.cos(), state.theta.sin()) * self.config.geometry.long_arm
    }

    /// Projectile position relative to the pivot, y up
    pub fn projectile_position(&self, state: &ArmState) -> DVec2 {
        -DVec2::new(state.theta.cos(), state.theta.sin()) * self.config.geometry.short_arm
    }
}
