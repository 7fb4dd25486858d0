//! Static checks on parsed scenarios
//!
//! Catches configurations that cannot run, and flags ones that will run
//! but are unlikely to do what the author meant, before any stepping.

use crate::ast::{ReleaseKind, Scenario};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::engine::start_angle;
use crate::geometry::beam_mass_properties;
use crate::inertia::{system_inertia, PointMass};
use std::f64::consts::PI;

/// Analyze a scenario and return diagnostics
pub fn analyze_scenario(scenario: &Scenario) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    diagnostics.extend(check_values(scenario));
    if !diagnostics.has_errors() {
        diagnostics.extend(check_dynamics(scenario));
    }
    diagnostics
}

fn check_values(scenario: &Scenario) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    let beam = &scenario.beam;
    for (name, value) in [
        ("long", beam.long),
        ("short", beam.short),
        ("width", beam.width),
        ("thickness", beam.thickness),
        ("density", beam.density),
    ] {
        if !value.is_finite() || value <= 0.0 {
            diagnostics.push(Diagnostic::error(
                format!("beam {} must be positive, got {}", name, value),
                beam.span,
            ));
        }
    }

    for (name, decl) in [
        ("counterweight", &scenario.counterweight),
        ("projectile", &scenario.projectile),
    ] {
        if !decl.mass.is_finite() || decl.mass < 0.0 {
            diagnostics.push(Diagnostic::error(
                format!("{} mass must be non-negative, got {}", name, decl.mass),
                decl.span,
            ));
        }
    }

    if !scenario.base.height.is_finite() || scenario.base.height < 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("base height must be non-negative, got {}", scenario.base.height),
            scenario.base.span,
        ));
    }

    if let Some(gravity) = &scenario.gravity {
        if !gravity.g.is_finite() || gravity.g <= 0.0 {
            diagnostics.push(Diagnostic::error(
                format!("gravity must be positive, got {}", gravity.g),
                gravity.span,
            ));
        }
    }

    let simulate = &scenario.simulate;
    if !simulate.dt.is_finite() || simulate.dt <= 0.0 {
        diagnostics.push(Diagnostic::error(
            format!("time step must be positive, got {}", simulate.dt),
            simulate.span,
        ));
    }
    if simulate.steps == 0 {
        diagnostics.push(Diagnostic::error(
            "simulate needs at least one step",
            simulate.span,
        ));
    }

    if let Some(release) = &scenario.release {
        if let ReleaseKind::Angle(degrees) = release.kind {
            if !degrees.is_finite() {
                diagnostics.push(Diagnostic::error(
                    format!("release angle must be finite, got {}", degrees),
                    release.span,
                ));
            }
        }
    }

    diagnostics
}

fn check_dynamics(scenario: &Scenario) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let beam = &scenario.beam;

    if scenario.base.height >= beam.short {
        diagnostics.push(Diagnostic::warning(
            format!(
                "base height {} reaches the short arm {}; arm starts at -89 degrees",
                scenario.base.height, beam.short
            ),
            scenario.base.span,
        ));
    }

    if scenario.projectile.mass == 0.0 {
        diagnostics.push(Diagnostic::warning(
            "projectile mass is zero; launch cannot be computed",
            scenario.projectile.span,
        ));
    }

    // Same coefficient the engine integrates with, beam included
    if let Ok(beam_props) = beam_mass_properties(&scenario.geometry()) {
        let inertia = system_inertia(
            &beam_props,
            PointMass::new(scenario.counterweight.mass, beam.long),
            PointMass::new(scenario.projectile.mass, -beam.short),
        );
        if inertia.net_torque_coefficient <= 0.0 {
            diagnostics.push(Diagnostic::warning(
                format!(
                    "net torque coefficient {:.3} is not positive; counterweight does not exceed \
                     projectile and beam",
                    inertia.net_torque_coefficient
                ),
                scenario.counterweight.span,
            ));
        }
    }

    if let Some(release) = &scenario.release {
        match release.kind {
            ReleaseKind::Angle(degrees) => {
                let theta0 = start_angle(scenario.base.height, beam.short);
                let angle = degrees.to_radians();
                // Without losses the arm turns back at the mirror of its start angle
                let turning = -PI - theta0;
                if angle >= theta0 {
                    diagnostics.push(Diagnostic::warning(
                        format!(
                            "release angle {} is not below the start angle {:.3}; \
                             the arm never reaches it",
                            degrees,
                            theta0.to_degrees()
                        ),
                        release.span,
                    ));
                } else if angle <= turning {
                    diagnostics.push(Diagnostic::warning(
                        format!(
                            "release angle {} lies beyond the swing limit {:.3}",
                            degrees,
                            turning.to_degrees()
                        ),
                        release.span,
                    ));
                }
            }
            ReleaseKind::Steps(n) => {
                if n > scenario.simulate.steps {
                    diagnostics.push(Diagnostic::warning(
                        format!(
                            "release after {} steps exceeds the {} step limit",
                            n, scenario.simulate.steps
                        ),
                        release.span,
                    ));
                }
            }
            ReleaseKind::Time(t) => {
                let limit = scenario.simulate.steps as f64 * scenario.simulate.dt;
                if !t.is_finite() || t < 0.0 {
                    diagnostics.push(Diagnostic::error(
                        format!("release time must be non-negative, got {}", t),
                        release.span,
                    ));
                } else if t > limit {
                    diagnostics.push(Diagnostic::warning(
                        format!("release after {}s exceeds the simulated {}s", t, limit),
                        release.span,
                    ));
                }
            }
        }
    }

    diagnostics
}
