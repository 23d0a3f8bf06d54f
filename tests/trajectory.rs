use ballistic_range::core::ballistics::STANDARD_GRAVITY_MPS2;
use ballistic_range::core::integrator::compute_with;
use ballistic_range::core::report::format_history_text;
use ballistic_range::core::{
    DragProfile, History, IntegratorConfig, LaunchParameters, RecordingSink, TrajectoryError,
    compute, play,
};

fn assert_within_percent(actual: f64, expected: f64, percent: f64) {
    let tolerance = expected.abs() * percent / 100.0;
    assert!(
        (actual - expected).abs() <= tolerance,
        "actual={actual}, expected={expected}, tolerance={tolerance}"
    );
}

#[test]
fn textbook_shot_peaks_and_lands_where_expected() {
    let trajectory = compute(&LaunchParameters::new(100.0, 45.0), 0.01).expect("trajectory");

    let g = STANDARD_GRAVITY_MPS2;
    let sin45 = 45f64.to_radians().sin();
    assert_within_percent(trajectory.apex().y_m, 100.0 * 100.0 * sin45 * sin45 / (2.0 * g), 1.0);
    assert_within_percent(trajectory.range_m(), 100.0 * 100.0 / g, 1.0);
    assert_within_percent(trajectory.apex().y_m, 255.1, 1.0);
    assert_within_percent(trajectory.range_m(), 1019.4, 1.0);
}

#[test]
fn every_sample_is_at_or_above_ground() {
    let shots = [
        LaunchParameters::new(30.0, 10.0),
        LaunchParameters::new(500.0, 70.0),
        LaunchParameters::new(800.0, 25.0).with_drag(DragProfile::new(0.25, 0.01, 7.62)),
        LaunchParameters::new(120.0, 55.0).with_azimuth(20.0),
    ];
    for params in shots {
        let trajectory = compute(&params, 0.01).expect("trajectory");
        assert!(!trajectory.is_empty());
        assert!(trajectory.iter().all(|s| s.y_m >= 0.0));
        assert!(trajectory.landing().y_m >= 0.0);
    }
}

#[test]
fn custom_gravity_changes_the_flight() {
    let params = LaunchParameters::new(50.0, 45.0);
    let earth = compute(&params, 0.01).expect("earth");
    let moon = compute_with(
        &params,
        &IntegratorConfig {
            gravity_mps2: 1.62,
            ..IntegratorConfig::default()
        },
    )
    .expect("moon");
    assert!(moon.range_m() > earth.range_m() * 5.0);
}

#[test]
fn invalid_drag_inputs_fail_without_a_trajectory() {
    for drag in [
        DragProfile::new(0.3, 0.0, 100.0),
        DragProfile::new(0.3, 5.0, 0.0),
        DragProfile::new(0.3, -5.0, 100.0),
    ] {
        let result = compute(&LaunchParameters::new(200.0, 30.0).with_drag(drag), 0.01);
        assert!(matches!(result, Err(TrajectoryError::InvalidParameter { .. })));
    }
    assert!(matches!(
        compute(&LaunchParameters::new(-10.0, 30.0), 0.01),
        Err(TrajectoryError::InvalidParameter { .. })
    ));
}

#[test]
fn session_records_played_shots() {
    let mut history = History::new();
    for angle in [15.0, 30.0, 45.0] {
        let params = LaunchParameters::new(200.0, angle)
            .with_drag(DragProfile::new(0.3, 43.0, 152.0))
            .with_target_km(3.0);
        let trajectory = compute(&params, 0.01).expect("trajectory");
        let shot = play(&params, &trajectory, RecordingSink::new()).expect("play");
        history.record(shot);
    }

    assert_eq!(history.len(), 3);
    let ranges: Vec<f64> = history.iter().map(|s| s.range_m()).collect();
    assert!(ranges[0] < ranges[1] && ranges[1] < ranges[2]);

    let report = format_history_text(&history);
    assert_eq!(report.matches("Landing coordinates").count(), 3);
    assert!(report.contains("Miss distance"));
}
