//! Integration tests running scenario files end to end

use std::path::PathBuf;
use trebuchet_core::error::{ComputationError, ScenarioError};
use trebuchet_core::tests::test_helpers::{
    approx_eq, run_treb_file, run_treb_source, sample_scenario,
};
use trebuchet_core::trajectory::Trajectory;

fn test_data_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(filename);
    path
}

#[test]
fn test_classic_release_at_45_degrees() {
    let path = test_data_path("classic.treb");
    let result = run_treb_file(path.to_str().unwrap()).expect("Failed to run scenario");

    assert!(result.released);
    assert!((860..=864).contains(&result.release_step), "step {}", result.release_step);
    assert!(result.arm.theta <= (-45.0f64).to_radians());
    assert!(result.arm.theta_dot < 0.0);
    assert!(approx_eq(result.release_time, result.release_step as f64 * 0.001, 1e-12));

    // Thrown forward and upward, roughly 40 m
    let launch = result.launch;
    assert!(launch.release_velocity.x > 0.0);
    assert!(launch.release_velocity.y > 0.0);
    assert!(approx_eq(launch.range, 40.06, 0.5), "range {}", launch.range);
    assert!(launch.range_efficiency > 0.0 && launch.range_efficiency <= 1.0);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_step_limit_releases_without_condition() {
    let path = test_data_path("step_limit.treb");
    let result = run_treb_file(path.to_str().unwrap()).expect("Failed to run scenario");

    assert!(!result.released);
    assert_eq!(result.release_step, 900);
    assert!(approx_eq(result.launch.range, 43.07, 0.5), "range {}", result.launch.range);
}

#[test]
fn test_tall_base_cannot_launch() {
    let path = test_data_path("tall_base.treb");
    let source = std::fs::read_to_string(path).unwrap();

    match run_treb_source(&source) {
        Err(ScenarioError::Computation(ComputationError::NonPositivePotentialEnergy { .. })) => {}
        other => panic!(
            "expected non-positive potential energy, got {:?}",
            other.map(|r| r.launch)
        ),
    }
}

#[test]
fn test_later_release_throws_flatter() {
    let early = run_treb_source(&sample_scenario(-30.0)).unwrap();
    let late = run_treb_source(&sample_scenario(-60.0)).unwrap();

    assert!(late.release_step > early.release_step);
    assert!(late.launch.launch_angle < early.launch.launch_angle);
    assert!(late.launch.release_speed > early.launch.release_speed);
}

#[test]
fn test_result_carries_mass_properties() {
    let result = run_treb_source(&sample_scenario(-45.0)).unwrap();
    assert!(approx_eq(result.beam.mass, 75.04, 1e-9));
    assert!(approx_eq(result.inertia.net_torque_coefficient, 500.848, 1e-9));
}

#[test]
fn test_trajectory_from_scenario() {
    let result = run_treb_source(&sample_scenario(-45.0)).unwrap();
    let path = Trajectory::from_launch(&result.launch);
    let points = path.sample(50);
    let apex = points.iter().map(|p| p.y).fold(f64::MIN, f64::max);

    assert!(apex > result.launch.release_height);
    assert!(apex <= path.extents().y_max + 1e-9);
}
