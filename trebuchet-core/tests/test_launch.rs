//! Tests for release velocity, flight time, range and efficiencies

use trebuchet_core::engine::{ArmState, Trebuchet, TrebuchetConfig};
use trebuchet_core::error::ComputationError;
use trebuchet_core::launch::compute_launch;
use trebuchet_core::release::ReleaseCondition;
use trebuchet_core::runtime::{configure, step_simulation};
use trebuchet_core::tests::test_helpers::{approx_eq, sample_config};

fn vertical_release_config() -> TrebuchetConfig {
    TrebuchetConfig {
        base_height: 2.0,
        gravity: 9.81,
        ..sample_config()
    }
}

#[test]
fn test_horizontal_arm_gives_vertical_velocity() {
    let trebuchet = Trebuchet::new(vertical_release_config()).unwrap();
    let state = ArmState {
        theta: 0.0,
        theta_dot: 10.0,
        theta0: (2.0f64 / 6.0).asin(),
    };

    let launch = compute_launch(&trebuchet, &state).expect("launch");
    assert_eq!(launch.release_velocity.x, 0.0);
    assert_eq!(launch.release_velocity.y, -60.0);
    assert_eq!(launch.range, 0.0);
    assert_eq!(launch.release_height, 2.0);

    // Positive root of 2 - 60 t - 9.81 t^2 / 2 = 0
    let g = 9.81;
    let expected = (-60.0 + (3600.0f64 + 2.0 * g * 2.0).sqrt()) / g;
    assert!(approx_eq(launch.flight_time, expected, 1e-12));
    assert!(launch.flight_time > 0.0);
    let landing = 2.0 - 60.0 * launch.flight_time - 0.5 * g * launch.flight_time.powi(2);
    assert!(approx_eq(landing, 0.0, 1e-9));
}

#[test]
fn test_release_velocity_is_tangential() {
    let trebuchet = Trebuchet::new(sample_config()).unwrap();
    let state = ArmState {
        theta: -0.7,
        theta_dot: -3.0,
        theta0: 0.5,
    };
    let launch = compute_launch(&trebuchet, &state).unwrap();

    // Perpendicular to the arm and |v| = L2 * |omega|
    let arm = trebuchet.projectile_position(&state);
    assert!(approx_eq(arm.dot(launch.release_velocity), 0.0, 1e-12));
    assert!(approx_eq(launch.release_speed, 18.0, 1e-12));
    assert!(launch.release_velocity.x > 0.0);
    assert!(launch.launch_angle > 0.0 && launch.launch_angle < 90.0);
}

#[test]
fn test_energy_accounting() {
    let trebuchet = Trebuchet::new(sample_config()).unwrap();
    let state = ArmState {
        theta: -0.7868499717751032,
        theta_dot: -3.039782463284615,
        theta0: std::f64::consts::FRAC_PI_6,
    };
    let launch = compute_launch(&trebuchet, &state).unwrap();

    // H1 = 2 * (1 + sin(30 deg)) = 3
    let h2 = 3.0 - 6.0 * state.theta.sin();
    let pe = (200.0 * 3.0 - h2) * 9.81;
    assert!(approx_eq(launch.potential_energy, pe, 1e-6));
    assert!(approx_eq(launch.kinetic_energy, 0.5 * launch.release_speed.powi(2), 1e-9));
    assert!(approx_eq(launch.range, 40.06240942066047, 1e-6));
    assert!(approx_eq(launch.flight_time, 3.1019065463070294, 1e-9));
    assert!(approx_eq(launch.energy_efficiency, 0.028603294861040317, 1e-9));
    assert!(approx_eq(launch.range_efficiency, 0.03358885670319731, 1e-9));
    assert!(approx_eq(launch.height_efficiency, 0.033539946284209116, 1e-9));
}

#[test]
fn test_efficiencies_within_unit_interval() {
    for degrees in [-20.0, -30.0, -45.0, -60.0, -75.0, -90.0, -110.0] {
        let mut ctx = configure(sample_config()).unwrap();
        ctx.max_steps = 10_000;
        assert!(ctx.run_until(ReleaseCondition::at_angle_degrees(degrees)));
        let launch = ctx.compute_launch().unwrap();

        for (name, value) in [
            ("energy", launch.energy_efficiency),
            ("range", launch.range_efficiency),
            ("height", launch.height_efficiency),
        ] {
            assert!(
                value > 0.0 && value <= 1.0,
                "{} efficiency {} out of range at {} degrees",
                name,
                value,
                degrees
            );
        }
        // The highest release point bounds the actual one
        assert!(launch.height_efficiency <= launch.range_efficiency);
    }
}

#[test]
fn test_zero_projectile_mass_rejected() {
    let mut config = sample_config();
    config.projectile_mass = 0.0;
    let mut ctx = configure(config).unwrap();
    for _ in 0..500 {
        step_simulation(&mut ctx);
    }
    assert_eq!(ctx.compute_launch(), Err(ComputationError::ZeroProjectileMass));

    // Stepping is unaffected by the failed launch
    let before = ctx.arm_state().theta;
    step_simulation(&mut ctx);
    assert!(ctx.arm_state().theta < before);
}

#[test]
fn test_non_positive_potential_energy_rejected() {
    // Counterweight already at the bottom: no drop left to release
    let mut config = sample_config();
    config.base_height = 7.0;
    let trebuchet = Trebuchet::new(config).unwrap();
    let state = trebuchet.initial_state();

    match compute_launch(&trebuchet, &state) {
        Err(ComputationError::NonPositivePotentialEnergy { energy }) => assert!(energy <= 0.0),
        other => panic!("expected NonPositivePotentialEnergy, got {:?}", other),
    }
}

#[test]
fn test_launch_below_ground_has_no_landing() {
    let mut config = sample_config();
    config.base_height = 1.0;
    let trebuchet = Trebuchet::new(config).unwrap();
    // Release height 1 - 6*sin(1.5) is below ground
    let state = ArmState {
        theta: 1.5,
        theta_dot: 0.0,
        theta0: 1.5,
    };
    assert!(matches!(
        compute_launch(&trebuchet, &state),
        Err(ComputationError::NoLanding { .. })
    ));
}

#[test]
fn test_compute_launch_is_idempotent() {
    let mut ctx = configure(sample_config()).unwrap();
    ctx.max_steps = 5000;
    ctx.run_until(ReleaseCondition::at_angle_degrees(-50.0));
    let state = *ctx.arm_state();

    let first = ctx.compute_launch().unwrap();
    let second = ctx.compute_launch().unwrap();
    assert_eq!(first, second);
    assert_eq!(*ctx.arm_state(), state);
}
