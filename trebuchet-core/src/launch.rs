//! Release and flight analysis
//!
//! Converts the arm state at release into the projectile's launch velocity,
//! then solves the ballistic flight in closed form. Efficiencies compare the
//! outcome against idealized bounds in which all released potential energy
//! becomes projectile kinetic energy.

use crate::engine::{ArmState, Trebuchet};
use crate::error::ComputationError;
use glam::DVec2;

/// Outcome of releasing the projectile from a given arm state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchResult {
    pub release_velocity: DVec2,
    /// Magnitude of the release velocity
    pub release_speed: f64,
    /// Launch angle above the horizontal, degrees
    pub launch_angle: f64,
    /// Height of the projectile above the ground at release
    pub release_height: f64,
    pub flight_time: f64,
    pub range: f64,
    pub potential_energy: f64,
    pub kinetic_energy: f64,
    /// Ideal range from the actual release height
    pub ideal_range: f64,
    /// Ideal range from the highest reachable release height
    pub ideal_height_range: f64,
    pub energy_efficiency: f64,
    pub range_efficiency: f64,
    pub height_efficiency: f64,
    pub gravity: f64,
}

/// Analyze a release from `state`. Does not modify the arm.
pub fn compute_launch(
    trebuchet: &Trebuchet,
    state: &ArmState,
) -> Result<LaunchResult, ComputationError> {
    let config = trebuchet.config();
    let l1 = config.geometry.long_arm;
    let l2 = config.geometry.short_arm;
    let g = config.gravity;
    let h0 = config.base_height;
    let m1 = config.counterweight_mass;
    let m2 = config.projectile_mass;

    if m2 == 0.0 {
        return Err(ComputationError::ZeroProjectileMass);
    }

    let theta = state.theta;
    let theta_dot = state.theta_dot;

    // Counterweight drop is measured from the start angle, not the release angle.
    let h1 = l1 * (1.0 + state.theta0.sin());
    let h2 = h0 - l2 * theta.sin();
    let h_star = h0 + l2;

    let potential_energy = (m1 * h1 - m2 * h2) * g;
    if potential_energy.is_nan() || potential_energy <= 0.0 {
        return Err(ComputationError::NonPositivePotentialEnergy {
            energy: potential_energy,
        });
    }

    let vx0 = l2 * theta_dot * theta.sin();
    let vy0 = -l2 * theta_dot * theta.cos();
    let speed_sq = vx0 * vx0 + vy0 * vy0;

    // Positive root of h2 + vy0*t - g*t^2/2 = 0
    let discriminant = (vy0 * vy0) / (g * g) + 2.0 * h2 / g;
    if discriminant < 0.0 {
        return Err(ComputationError::NoLanding { discriminant });
    }
    let flight_time = vy0 / g + discriminant.sqrt();

    let kinetic_energy = 0.5 * m2 * speed_sq;
    let range = vx0.abs() * flight_time;

    let r0_star = 2.0 * potential_energy / (m2 * g);
    let ideal_range = r0_star * (2.0 * h2 / r0_star + 1.0).sqrt();
    let ideal_height_range = r0_star * (2.0 * h_star / r0_star + 1.0).sqrt();

    let result = LaunchResult {
        release_velocity: DVec2::new(vx0, vy0),
        release_speed: speed_sq.sqrt(),
        launch_angle: vy0.atan2(vx0).to_degrees(),
        release_height: h2,
        flight_time,
        range,
        potential_energy,
        kinetic_energy,
        ideal_range,
        ideal_height_range,
        energy_efficiency: kinetic_energy / potential_energy,
        range_efficiency: range / ideal_range,
        height_efficiency: range / ideal_height_range,
        gravity: g,
    };
    result.check_finite()?;

    tracing::debug!(
        range = result.range,
        flight_time = result.flight_time,
        energy_efficiency = result.energy_efficiency,
        "launch computed"
    );

    Ok(result)
}

impl LaunchResult {
    fn check_finite(&self) -> Result<(), ComputationError> {
        let quantities = [
            ("flight time", self.flight_time),
            ("range", self.range),
            ("ideal range", self.ideal_range),
            ("ideal height range", self.ideal_height_range),
            ("energy efficiency", self.energy_efficiency),
        ];
        for (quantity, value) in quantities {
            if !value.is_finite() {
                return Err(ComputationError::NonFinite { quantity });
            }
        }
        Ok(())
    }
}
