use crate::diagnostics::Span;
use crate::engine::{TrebuchetConfig, DEFAULT_GRAVITY};
use crate::geometry::BeamGeometry;
use crate::release::ReleaseCondition;

/// `beam long = L1 short = L2 width = w thickness = t density = rho`
#[derive(Debug, Clone, PartialEq)]
pub struct BeamDecl {
    pub long: f64,
    pub short: f64,
    pub width: f64,
    pub thickness: f64,
    pub density: f64,
    pub span: Option<Span>,
}

/// `counterweight mass = m` or `projectile mass = m`
#[derive(Debug, Clone, PartialEq)]
pub struct MassDecl {
    pub mass: f64,
    pub span: Option<Span>,
}

/// `base height = h0`
#[derive(Debug, Clone, PartialEq)]
pub struct BaseDecl {
    pub height: f64,
    pub span: Option<Span>,
}

/// `gravity g = value`
#[derive(Debug, Clone, PartialEq)]
pub struct GravityDecl {
    pub g: f64,
    pub span: Option<Span>,
}

/// `simulate dt = x steps = n`
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateDecl {
    pub dt: f64,
    pub steps: u64,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseKind {
    /// `release at angle = degrees`
    Angle(f64),
    /// `release after steps = n`
    Steps(u64),
    /// `release after time = seconds`
    Time(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseDecl {
    pub kind: ReleaseKind,
    pub span: Option<Span>,
}

/// A parsed scenario file
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub beam: BeamDecl,
    pub counterweight: MassDecl,
    pub projectile: MassDecl,
    pub base: BaseDecl,
    pub gravity: Option<GravityDecl>,
    pub simulate: SimulateDecl,
    pub release: Option<ReleaseDecl>,
}

impl Scenario {
    pub fn gravity(&self) -> f64 {
        self.gravity.as_ref().map_or(DEFAULT_GRAVITY, |g| g.g)
    }

    pub fn geometry(&self) -> BeamGeometry {
        BeamGeometry {
            long_arm: self.beam.long,
            short_arm: self.beam.short,
            width: self.beam.width,
            thickness: self.beam.thickness,
            density: self.beam.density,
        }
    }

    pub fn config(&self) -> TrebuchetConfig {
        TrebuchetConfig {
            geometry: self.geometry(),
            counterweight_mass: self.counterweight.mass,
            projectile_mass: self.projectile.mass,
            base_height: self.base.height,
            gravity: self.gravity(),
            time_step: self.simulate.dt,
        }
    }

    /// Replace the scenario's release with an angle in degrees
    pub fn override_release_angle(&mut self, degrees: f64) {
        self.release = Some(ReleaseDecl {
            kind: ReleaseKind::Angle(degrees),
            span: None,
        });
    }

    pub fn release_condition(&self) -> Option<ReleaseCondition> {
        self.release.as_ref().map(|release| match release.kind {
            ReleaseKind::Angle(degrees) => ReleaseCondition::at_angle_degrees(degrees),
            ReleaseKind::Steps(n) => ReleaseCondition::AfterSteps(n),
            ReleaseKind::Time(t) => ReleaseCondition::AfterTime(t),
        })
    }
}
