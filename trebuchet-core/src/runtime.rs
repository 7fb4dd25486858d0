use crate::analyzer::analyze_scenario;
use crate::ast::Scenario;
use crate::diagnostics::Diagnostics;
use crate::engine::{ArmState, Trebuchet, TrebuchetConfig};
use crate::error::{ComputationError, ConfigurationError, ScenarioError};
use crate::geometry::BeamMassProperties;
use crate::inertia::SystemInertia;
use crate::integrator::step;
use crate::launch::{compute_launch, LaunchResult};
use crate::parser::parse_scenario;
use crate::release::ReleaseCondition;
use glam::DVec2;
use tracing::debug;

/// A running simulation: the configured trebuchet plus the arm state it owns
#[derive(Debug, Clone)]
pub struct SimulationContext {
    trebuchet: Trebuchet,
    state: ArmState,
    /// State one step back, for detecting angle crossings
    previous: ArmState,
    steps_taken: u64,
    pub max_steps: u64,
    pub release: Option<ReleaseCondition>,
}

/// Validate a trebuchet and set up its arm at the start angle
pub fn configure(config: TrebuchetConfig) -> Result<SimulationContext, ConfigurationError> {
    let trebuchet = Trebuchet::new(config)?;
    let mut state = trebuchet.initial_state();
    // Index 0 is the initial condition
    step(&trebuchet, &mut state, 0);

    debug!(
        theta0 = state.theta0,
        total_inertia = trebuchet.inertia().total_inertia,
        net_torque_coefficient = trebuchet.inertia().net_torque_coefficient,
        "configured trebuchet"
    );

    Ok(SimulationContext {
        trebuchet,
        state,
        previous: state,
        steps_taken: 0,
        max_steps: u64::MAX,
        release: None,
    })
}

/// Advance the simulation by exactly one time step
pub fn step_simulation(ctx: &mut SimulationContext) -> ArmState {
    ctx.steps_taken += 1;
    ctx.previous = ctx.state;
    step(&ctx.trebuchet, &mut ctx.state, ctx.steps_taken);
    ctx.state
}

impl SimulationContext {
    pub fn trebuchet(&self) -> &Trebuchet {
        &self.trebuchet
    }

    pub fn arm_state(&self) -> &ArmState {
        &self.state
    }

    pub fn system_inertia(&self) -> &SystemInertia {
        self.trebuchet.inertia()
    }

    pub fn beam_properties(&self) -> &BeamMassProperties {
        self.trebuchet.beam()
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Simulated time since the start
    pub fn elapsed(&self) -> f64 {
        self.steps_taken as f64 * self.trebuchet.config().time_step
    }

    pub fn is_finished(&self) -> bool {
        self.steps_taken >= self.max_steps
    }

    pub fn counterweight_position(&self) -> DVec2 {
        self.trebuchet.counterweight_position(&self.state)
    }

    pub fn projectile_position(&self) -> DVec2 {
        self.trebuchet.projectile_position(&self.state)
    }

    /// Put the arm back at its start angle, at rest
    pub fn reset(&mut self) {
        self.state = self.trebuchet.initial_state();
        self.previous = self.state;
        self.steps_taken = 0;
    }

    /// Whether the configured release condition holds for the current state
    pub fn release_due(&self) -> bool {
        self.release.is_some_and(|condition| self.condition_met(condition))
    }

    fn condition_met(&self, condition: ReleaseCondition) -> bool {
        condition.is_met(&self.previous, &self.state, self.steps_taken, self.elapsed())
    }

    /// Step until `condition` holds or the step limit is reached.
    /// Returns whether the condition was met.
    pub fn run_until(&mut self, condition: ReleaseCondition) -> bool {
        loop {
            if self.condition_met(condition) {
                return true;
            }
            if self.is_finished() {
                return false;
            }
            step_simulation(self);
        }
    }

    /// Step until `predicate` holds, taking at most `max_steps` steps
    pub fn run_until_with<F>(&mut self, mut predicate: F, max_steps: u64) -> bool
    where
        F: FnMut(&ArmState) -> bool,
    {
        for _ in 0..max_steps {
            if predicate(&self.state) {
                return true;
            }
            step_simulation(self);
        }
        predicate(&self.state)
    }

    /// Analyze a release from the current arm state
    pub fn compute_launch(&self) -> Result<LaunchResult, ComputationError> {
        compute_launch(&self.trebuchet, &self.state)
    }
}

/// Final result of running a scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Whether the release condition fired before the step limit
    pub released: bool,
    pub release_step: u64,
    pub release_time: f64,
    pub arm: ArmState,
    pub beam: BeamMassProperties,
    pub inertia: SystemInertia,
    pub launch: LaunchResult,
    pub diagnostics: Diagnostics,
}

/// Build a simulation context from a parsed scenario
pub fn build_simulation_context(
    scenario: &Scenario,
) -> Result<SimulationContext, ConfigurationError> {
    let mut ctx = configure(scenario.config())?;
    ctx.max_steps = scenario.simulate.steps;
    ctx.release = scenario.release_condition();
    Ok(ctx)
}

/// Parse, analyze and configure a scenario without running it
pub fn build_simulation_context_from_source(
    source: &str,
) -> Result<(SimulationContext, Diagnostics), ScenarioError> {
    let scenario = parse_scenario(source)?;
    let diagnostics = analyze_scenario(&scenario);
    if diagnostics.has_errors() {
        return Err(ScenarioError::Analysis(diagnostics.error_count()));
    }
    let ctx = build_simulation_context(&scenario)?;
    Ok((ctx, diagnostics))
}

/// Main entry point: parse a scenario, swing the arm until release and
/// analyze the launch.
///
/// Without a release condition the projectile leaves when the step limit
/// is reached.
pub fn run_scenario(source: &str) -> Result<ScenarioResult, ScenarioError> {
    let (mut ctx, diagnostics) = build_simulation_context_from_source(source)?;

    let released = match ctx.release {
        Some(condition) => ctx.run_until(condition),
        None => {
            while !ctx.is_finished() {
                step_simulation(&mut ctx);
            }
            false
        }
    };
    debug!(
        released,
        step = ctx.steps_taken(),
        theta = ctx.arm_state().theta,
        "arm released"
    );

    let launch = ctx.compute_launch()?;

    Ok(ScenarioResult {
        released,
        release_step: ctx.steps_taken(),
        release_time: ctx.elapsed(),
        arm: *ctx.arm_state(),
        beam: *ctx.beam_properties(),
        inertia: *ctx.system_inertia(),
        launch,
        diagnostics,
    })
}
