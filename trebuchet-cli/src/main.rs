mod config;
mod view_app;

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use trebuchet_core::diagnostics::{format_diagnostic, format_parse_error};
use trebuchet_core::{
    analyze_scenario, build_simulation_context, parse_scenario, ReleaseCondition, ScenarioError,
    Trajectory,
};

#[derive(Parser)]
#[command(name = "trebuchet")]
#[command(about = "Trebuchet launch simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario to release and print the launch result
    Run {
        /// Path to the scenario file
        file: PathBuf,
        /// Print this many flight path samples
        #[arg(long)]
        samples: Option<usize>,
        /// Override the scenario's release with an angle in degrees
        #[arg(long, allow_hyphen_values = true)]
        release_angle: Option<f64>,
    },
    /// Open an interactive view of a scenario, reloaded on save
    View {
        /// Path to the scenario file
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn main() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            samples,
            release_angle,
        } => {
            if let Err(e) = run_file(&file, samples, release_angle) {
                tracing::error!(file = %file.display(), "run failed");
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::View { file } => {
            if let Err(e) = view_app::launch(file) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run_file(
    file: &Path,
    samples: Option<usize>,
    release_angle: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(file)?;
    let mut scenario = parse_scenario(&source).map_err(|e| format_parse_error(&e, &source))?;
    if let Some(degrees) = release_angle {
        scenario.override_release_angle(degrees);
    }

    let diagnostics = analyze_scenario(&scenario);
    for diagnostic in diagnostics.iter() {
        eprintln!("{}", format_diagnostic(diagnostic, &source));
    }
    if diagnostics.has_errors() {
        return Err(ScenarioError::Analysis(diagnostics.error_count()).into());
    }

    let mut ctx = build_simulation_context(&scenario)?;

    let released = match ctx.release {
        Some(condition) => ctx.run_until(condition),
        None => {
            ctx.run_until(ReleaseCondition::AfterSteps(ctx.max_steps));
            false
        }
    };
    if !released {
        tracing::warn!(steps = ctx.steps_taken(), "released at the step limit");
    }

    let launch = ctx.compute_launch()?;
    let arm = ctx.arm_state();
    let beam = ctx.beam_properties();
    let inertia = ctx.system_inertia();

    let rows = [
        ("beam_mass", beam.mass),
        ("beam_centroid", beam.centroid_offset),
        ("beam_inertia", beam.inertia_about_centroid),
        ("total_inertia", inertia.total_inertia),
        ("net_torque_coefficient", inertia.net_torque_coefficient),
        ("release_step", ctx.steps_taken() as f64),
        ("release_time", ctx.elapsed()),
        ("theta_deg", arm.theta.to_degrees()),
        ("theta_dot", arm.theta_dot),
        ("vx0", launch.release_velocity.x),
        ("vy0", launch.release_velocity.y),
        ("v0", launch.release_speed),
        ("alpha_deg", launch.launch_angle),
        ("release_height", launch.release_height),
        ("flight_time", launch.flight_time),
        ("range", launch.range),
        ("energy_efficiency", launch.energy_efficiency),
        ("range_efficiency", launch.range_efficiency),
        ("height_efficiency", launch.height_efficiency),
    ];
    for (name, value) in rows {
        println!("{} = {}", name, value);
    }

    if let Some(samples) = samples {
        for (i, point) in Trajectory::from_launch(&launch).sample(samples).iter().enumerate() {
            println!("path[{}] = {:.6} {:.6}", i, point.x, point.y);
        }
    }

    Ok(())
}
