pub mod analyzer;
pub mod ast;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod inertia;
pub mod integrator;
pub mod launch;
pub mod parser;
pub mod release;
pub mod runtime;
pub mod trajectory;

pub use analyzer::analyze_scenario;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, Diagnostics, SourceLocation, Span};
pub use engine::{ArmState, Trebuchet, TrebuchetConfig};
pub use error::{ComputationError, ConfigurationError, ScenarioError};
pub use geometry::{beam_mass_properties, BeamGeometry, BeamMassProperties};
pub use inertia::{system_inertia, PointMass, SystemInertia};
pub use launch::{compute_launch, LaunchResult};
pub use parser::{parse_scenario, ParseError};
pub use release::ReleaseCondition;
pub use runtime::{
    build_simulation_context, build_simulation_context_from_source, configure, run_scenario,
    step_simulation, ScenarioResult, SimulationContext,
};
pub use trajectory::{Extents, Trajectory};
