//! Whole-system mass properties about the pivot

use crate::geometry::BeamMassProperties;

/// A concentrated mass at a signed distance from the pivot
/// (positive on the counterweight side)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMass {
    pub mass: f64,
    pub offset: f64,
}

impl PointMass {
    pub fn new(mass: f64, offset: f64) -> Self {
        Self { mass, offset }
    }

    pub fn first_moment(&self) -> f64 {
        self.mass * self.offset
    }

    pub fn inertia(&self) -> f64 {
        self.mass * self.offset * self.offset
    }
}

/// Inertia and driving coefficient of arm, counterweight and projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemInertia {
    /// Moment of inertia about the pivot
    pub total_inertia: f64,
    /// Signed mass moment; positive drives the counterweight down
    pub net_torque_coefficient: f64,
}

/// Combine the beam with the counterweight (at `+L1`) and the projectile (at `-L2`).
pub fn system_inertia(
    beam: &BeamMassProperties,
    counterweight: PointMass,
    projectile: PointMass,
) -> SystemInertia {
    let lb = beam.centroid_offset;
    let total_inertia = counterweight.inertia()
        + projectile.inertia()
        + beam.inertia_about_centroid
        + beam.mass * lb * lb;

    // m1*L1 - m2*L2 - mb*Lb. The projectile offset is already negative.
    let net_torque_coefficient =
        counterweight.first_moment() + projectile.first_moment() - beam.mass * lb;

    SystemInertia {
        total_inertia,
        net_torque_coefficient,
    }
}
