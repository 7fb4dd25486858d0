//! Static analysis of scenarios

use trebuchet_core::analyzer::analyze_scenario;
use trebuchet_core::diagnostics::{format_diagnostic, DiagnosticSeverity};
use trebuchet_core::parser::parse_scenario;
use trebuchet_core::release::ReleaseCondition;
use trebuchet_core::tests::test_helpers::sample_scenario;

fn analyze(source: &str) -> trebuchet_core::Diagnostics {
    let scenario = parse_scenario(source).expect("Should parse");
    analyze_scenario(&scenario)
}

#[test]
fn test_valid_scenario_is_clean() {
    let diagnostics = analyze(&sample_scenario(-45.0));
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_non_positive_values_are_errors() {
    let source = sample_scenario(-45.0)
        .replace("width = 0.2", "width = 0")
        .replace("dt = 0.001", "dt = -0.001")
        .replace("counterweight mass = 200", "counterweight mass = -5");
    let diagnostics = analyze(&source);

    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 3);
    assert!(diagnostics.iter().any(|d| d.message.contains("width")));
    assert!(diagnostics.iter().any(|d| d.message.contains("time step")));
    assert!(diagnostics.iter().any(|d| d.message.contains("counterweight")));
}

#[test]
fn test_zero_steps_is_error() {
    let source = sample_scenario(-45.0).replace("steps = 5000", "steps = 0");
    assert!(analyze(&source).has_errors());
}

#[test]
fn test_tall_base_warns() {
    let source = sample_scenario(-45.0).replace("base height = 3", "base height = 6");
    let diagnostics = analyze(&source);
    assert!(!diagnostics.has_errors());
    let warning = diagnostics.warnings().next().expect("warning");
    assert_eq!(warning.severity, DiagnosticSeverity::Warning);
    assert!(warning.message.contains("-89"));
}

#[test]
fn test_weak_counterweight_warns() {
    // 0 - 20*6 + 75.04*1.424 < 0
    let source = sample_scenario(-45.0)
        .replace("counterweight mass = 200", "counterweight mass = 0")
        .replace("projectile mass = 1", "projectile mass = 20");
    let diagnostics = analyze(&source);
    assert!(diagnostics
        .warnings()
        .any(|d| d.message.contains("does not exceed")));
}

#[test]
fn test_torque_warning_includes_beam() {
    // Point masses alone: 2*2 < 1*6, but the beam term keeps the coefficient positive
    let source =
        sample_scenario(-45.0).replace("counterweight mass = 200", "counterweight mass = 2");
    let diagnostics = analyze(&source);
    assert!(!diagnostics
        .warnings()
        .any(|d| d.message.contains("does not exceed")));
}

#[test]
fn test_zero_projectile_warns() {
    let source = sample_scenario(-45.0).replace("projectile mass = 1", "projectile mass = 0");
    let diagnostics = analyze(&source);
    assert!(!diagnostics.has_errors());
    assert!(diagnostics.warnings().any(|d| d.message.contains("zero")));
}

#[test]
fn test_release_angle_checks() {
    // Start angle is 30 degrees
    let above = analyze(&sample_scenario(40.0));
    assert!(above.warnings().any(|d| d.message.contains("never reaches")));

    // Swing limit is -210 degrees
    let beyond = analyze(&sample_scenario(-250.0));
    assert!(beyond.warnings().any(|d| d.message.contains("swing limit")));

    let fine = analyze(&sample_scenario(-120.0));
    assert!(fine.is_empty());
}

#[test]
fn test_non_finite_release_angle_is_error() {
    for value in ["NaN", "inf", "-inf"] {
        let source = sample_scenario(-45.0).replace("angle = -45", &format!("angle = {}", value));
        let diagnostics = analyze(&source);
        assert_eq!(diagnostics.error_count(), 1, "{}", value);
        assert!(diagnostics.iter().any(|d| d.message.contains("finite")));
    }
}

#[test]
fn test_overridden_release_angle_is_checked() {
    let mut scenario = parse_scenario(&sample_scenario(-45.0)).expect("Should parse");
    assert!(analyze_scenario(&scenario).is_empty());

    scenario.override_release_angle(-250.0);
    let diagnostics = analyze_scenario(&scenario);
    assert!(diagnostics.warnings().any(|d| d.message.contains("swing limit")));
    assert_eq!(
        scenario.release_condition(),
        Some(ReleaseCondition::at_angle_degrees(-250.0))
    );

    // Also installs a release where the file had none
    let source = sample_scenario(-45.0).replace("release at angle = -45\n", "");
    let mut scenario = parse_scenario(&source).expect("Should parse");
    assert!(scenario.release.is_none());
    scenario.override_release_angle(40.0);
    assert!(analyze_scenario(&scenario)
        .warnings()
        .any(|d| d.message.contains("never reaches")));
}

#[test]
fn test_release_beyond_step_limit_warns() {
    let steps =
        sample_scenario(-45.0).replace("release at angle = -45", "release after steps = 9000");
    assert_eq!(analyze(&steps).warnings().count(), 1);

    let time = sample_scenario(-45.0).replace("release at angle = -45", "release after time = 6");
    assert_eq!(analyze(&time).warnings().count(), 1);

    let negative =
        sample_scenario(-45.0).replace("release at angle = -45", "release after time = -1");
    assert!(analyze(&negative).has_errors());
}

#[test]
fn test_diagnostic_points_at_line() {
    let source = sample_scenario(-45.0).replace("base height = 3", "base height = 6");
    let diagnostics = analyze(&source);
    let warning = diagnostics.warnings().next().unwrap();
    let formatted = format_diagnostic(warning, &source);
    assert!(formatted.starts_with("warning:"));
    assert!(formatted.contains("at line 4: base height = 6"));
}
