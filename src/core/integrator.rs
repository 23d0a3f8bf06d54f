//! Projectile trajectory integration.
//!
//! Two flight models are supported. Without a [`DragProfile`] the ideal
//! closed-form parabola is sampled every `dt`. With one, the speed and
//! flight-path angle are stepped with explicit Euler under quadratic drag.
//! Both stop at the first sample that would fall below the launch height
//! and never append it.

use serde::{Deserialize, Serialize};

use crate::core::ballistics::{
    DEFAULT_MAX_STEPS, DEFAULT_TIME_STEP_S, DragProfile, LaunchParameters, MIN_DRAG_SPEED_MPS,
    STANDARD_GRAVITY_MPS2, ideal_flight_time, ideal_position_at, require_positive,
};
use crate::core::error::TrajectoryError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightModel {
    Ideal,
    Drag,
}

impl FlightModel {
    pub fn label(self) -> &'static str {
        match self {
            FlightModel::Ideal => "ideal",
            FlightModel::Drag => "drag",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
}

impl TrajectorySample {
    pub const ORIGIN: TrajectorySample = TrajectorySample {
        time_s: 0.0,
        x_m: 0.0,
        y_m: 0.0,
        z_m: 0.0,
    };

    pub fn position(&self) -> (f64, f64, f64) {
        (self.x_m, self.y_m, self.z_m)
    }

    /// Ground distance from the launch point, whatever the azimuth.
    pub fn horizontal_distance_m(&self) -> f64 {
        self.x_m.hypot(self.z_m)
    }
}

/// Samples from launch to the last point at or above launch height.
/// Always holds at least the launch point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    model: FlightModel,
    samples: Vec<TrajectorySample>,
}

impl Trajectory {
    pub fn model(&self) -> FlightModel {
        self.model
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectorySample> {
        self.samples.iter()
    }

    pub fn first(&self) -> TrajectorySample {
        self.samples[0]
    }

    pub fn landing(&self) -> TrajectorySample {
        self.samples[self.samples.len() - 1]
    }

    pub fn flight_time_s(&self) -> f64 {
        self.landing().time_s
    }

    /// Horizontal distance of the landing sample from the origin.
    pub fn range_m(&self) -> f64 {
        self.landing().horizontal_distance_m()
    }

    pub fn apex(&self) -> TrajectorySample {
        self.samples
            .iter()
            .copied()
            .fold(self.samples[0], |best, s| if s.y_m > best.y_m { s } else { best })
    }

    pub fn into_samples(self) -> Vec<TrajectorySample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectorySample;
    type IntoIter = std::slice::Iter<'a, TrajectorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntegratorConfig {
    pub dt_s: f64,
    pub gravity_mps2: f64,
    /// Upper bound on integration steps; a flight needing more fails.
    pub max_steps: usize,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            dt_s: DEFAULT_TIME_STEP_S,
            gravity_mps2: STANDARD_GRAVITY_MPS2,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl IntegratorConfig {
    pub fn with_dt(dt_s: f64) -> Self {
        Self {
            dt_s,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TrajectoryError> {
        require_positive("time step", self.dt_s)?;
        require_positive("gravity", self.gravity_mps2)?;
        if self.max_steps == 0 {
            return Err(TrajectoryError::invalid(
                "max steps",
                0.0,
                "must allow at least one step",
            ));
        }
        Ok(())
    }
}

/// Computes a trajectory with the default gravity and step budget.
pub fn compute(params: &LaunchParameters, dt_s: f64) -> Result<Trajectory, TrajectoryError> {
    compute_with(params, &IntegratorConfig::with_dt(dt_s))
}

pub fn compute_with(
    params: &LaunchParameters,
    config: &IntegratorConfig,
) -> Result<Trajectory, TrajectoryError> {
    params.validate()?;
    config.validate()?;

    match &params.drag {
        None => ideal_trajectory(params, config),
        Some(drag) => drag_trajectory(params, drag, config),
    }
}

fn ideal_trajectory(
    params: &LaunchParameters,
    config: &IntegratorConfig,
) -> Result<Trajectory, TrajectoryError> {
    let t_end = ideal_flight_time(params, config.gravity_mps2);
    let steps = (t_end / config.dt_s).ceil();
    if steps > config.max_steps as f64 {
        return Err(TrajectoryError::StepLimitExceeded {
            max_steps: config.max_steps,
        });
    }
    let steps = steps as usize;

    let mut samples = Vec::with_capacity(steps + 1);
    samples.push(TrajectorySample::ORIGIN);
    for step in 1..=steps {
        // Multiplying instead of accumulating keeps t free of drift.
        let t = step as f64 * config.dt_s;
        if t > t_end {
            break;
        }
        let (x, y, z) = ideal_position_at(params, t, config.gravity_mps2);
        if y < 0.0 {
            break;
        }
        samples.push(TrajectorySample {
            time_s: t,
            x_m: x,
            y_m: y,
            z_m: z,
        });
    }

    Ok(Trajectory {
        model: FlightModel::Ideal,
        samples,
    })
}

fn drag_trajectory(
    params: &LaunchParameters,
    drag: &DragProfile,
    config: &IntegratorConfig,
) -> Result<Trajectory, TrajectoryError> {
    let dt = config.dt_s;
    let g = config.gravity_mps2;
    let k = drag.drag_factor();
    // The planar solution is rotated into the launch azimuth.
    let (azimuth_cos, azimuth_sin) = match params.azimuth_deg {
        Some(azimuth) => {
            let phi = azimuth.to_radians();
            (phi.cos(), phi.sin())
        }
        None => (1.0, 0.0),
    };

    let mut v = params.speed_mps;
    let mut theta = params.angle_deg.to_radians();
    let mut x = 0.0;
    let mut y = 0.0;
    let mut samples = vec![TrajectorySample::ORIGIN];

    for step in 1..=config.max_steps {
        let next_v = v - dt * (k * v * v + g * theta.sin());
        let next_theta = theta - dt * g * theta.cos() / v;
        let next_x = x + v * theta.cos() * dt;
        let next_y = y + v * theta.sin() * dt;

        if next_y < 0.0 {
            return Ok(Trajectory {
                model: FlightModel::Drag,
                samples,
            });
        }

        let time_s = step as f64 * dt;
        if !(next_v > MIN_DRAG_SPEED_MPS)
            || !next_theta.is_finite()
            || !next_x.is_finite()
            || !next_y.is_finite()
        {
            return Err(TrajectoryError::ArithmeticDegeneracy {
                step,
                time_s,
                speed_mps: next_v,
            });
        }

        v = next_v;
        theta = next_theta;
        x = next_x;
        y = next_y;
        samples.push(TrajectorySample {
            time_s,
            x_m: x * azimuth_cos,
            y_m: y,
            z_m: x * azimuth_sin,
        });
    }

    Err(TrajectoryError::StepLimitExceeded {
        max_steps: config.max_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::{ideal_apex_height, ideal_range};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn howitzer() -> DragProfile {
        DragProfile::new(0.3, 43.0, 152.0)
    }

    #[test]
    fn ideal_shot_matches_closed_form_apex_and_range() {
        let params = LaunchParameters::new(100.0, 45.0);
        let trajectory = compute(&params, 0.01).expect("trajectory should compute");

        let expected_apex = ideal_apex_height(&params, STANDARD_GRAVITY_MPS2);
        let expected_range = ideal_range(&params, STANDARD_GRAVITY_MPS2);
        assert_close(trajectory.apex().y_m, expected_apex, expected_apex * 0.01);
        assert_close(trajectory.range_m(), expected_range, expected_range * 0.01);
        assert_close(trajectory.range_m(), 1019.4, 10.2);
        assert_eq!(trajectory.model(), FlightModel::Ideal);
    }

    #[test]
    fn starts_at_origin_and_time_increases() {
        let trajectory = compute(&LaunchParameters::new(60.0, 30.0), 0.01).expect("trajectory");
        assert_eq!(trajectory.first(), TrajectorySample::ORIGIN);
        for pair in trajectory.samples().windows(2) {
            assert!(pair[1].time_s > pair[0].time_s);
        }
    }

    #[test]
    fn never_appends_a_sample_below_ground() {
        for angle in [5.0, 30.0, 60.0, 85.0] {
            let ideal = compute(&LaunchParameters::new(80.0, angle), 0.01).expect("ideal");
            let dragged = compute(
                &LaunchParameters::new(80.0, angle).with_drag(howitzer()),
                0.01,
            )
            .expect("drag");
            for sample in ideal.iter().chain(dragged.iter()) {
                assert!(sample.y_m >= 0.0, "angle={angle} sample={sample:?}");
            }
        }
    }

    #[test]
    fn level_ideal_shot_lands_immediately() {
        let trajectory = compute(&LaunchParameters::new(250.0, 0.0), 0.01).expect("trajectory");
        assert_eq!(trajectory.samples(), &[TrajectorySample::ORIGIN]);
        assert_eq!(trajectory.flight_time_s(), 0.0);
    }

    #[test]
    fn downward_drag_shot_keeps_only_origin() {
        let params = LaunchParameters::new(250.0, -15.0).with_drag(howitzer());
        let trajectory = compute(&params, 0.01).expect("trajectory");
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.landing(), TrajectorySample::ORIGIN);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let params = LaunchParameters::new(320.0, 38.0).with_drag(howitzer());
        let first = compute(&params, 0.01).expect("first");
        let second = compute(&params, 0.01).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn zero_drag_coefficient_reduces_to_ideal_model() {
        let ideal = compute(&LaunchParameters::new(100.0, 45.0), 0.01).expect("ideal");
        let dragless = compute(
            &LaunchParameters::new(100.0, 45.0).with_drag(DragProfile::new(0.0, 10.0, 100.0)),
            0.01,
        )
        .expect("dragless");

        assert_eq!(dragless.model(), FlightModel::Drag);
        assert_close(dragless.range_m(), ideal.range_m(), ideal.range_m() * 0.01);
        assert_close(dragless.apex().y_m, ideal.apex().y_m, ideal.apex().y_m * 0.01);
        assert_close(
            dragless.flight_time_s(),
            ideal.flight_time_s(),
            ideal.flight_time_s() * 0.01,
        );
    }

    #[test]
    fn drag_shortens_the_range() {
        let ideal = compute(&LaunchParameters::new(300.0, 40.0), 0.01).expect("ideal");
        let dragged = compute(
            &LaunchParameters::new(300.0, 40.0).with_drag(DragProfile::new(0.5, 5.0, 120.0)),
            0.01,
        )
        .expect("dragged");
        assert!(dragged.range_m() < ideal.range_m());
        assert!(dragged.apex().y_m < ideal.apex().y_m);
    }

    #[test]
    fn vertical_drag_shot_reports_degeneracy() {
        let params = LaunchParameters::new(50.0, 90.0).with_drag(howitzer());
        let err = compute(&params, 0.01).expect_err("speed should collapse at the apex");
        match err {
            TrajectoryError::ArithmeticDegeneracy { speed_mps, .. } => {
                assert!(speed_mps <= MIN_DRAG_SPEED_MPS)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn step_budget_bounds_both_models() {
        let config = IntegratorConfig {
            max_steps: 10,
            ..IntegratorConfig::default()
        };
        let ideal = compute_with(&LaunchParameters::new(100.0, 45.0), &config);
        let dragged = compute_with(
            &LaunchParameters::new(100.0, 45.0).with_drag(howitzer()),
            &config,
        );
        assert_eq!(
            ideal,
            Err(TrajectoryError::StepLimitExceeded { max_steps: 10 })
        );
        assert_eq!(
            dragged,
            Err(TrajectoryError::StepLimitExceeded { max_steps: 10 })
        );
    }

    #[test]
    fn rejects_invalid_inputs_before_integrating() {
        let zero_speed = compute(&LaunchParameters::new(0.0, 45.0), 0.01);
        let negative_mass = compute(
            &LaunchParameters::new(100.0, 45.0).with_drag(DragProfile::new(0.3, -2.0, 100.0)),
            0.01,
        );
        let zero_caliber = compute(
            &LaunchParameters::new(100.0, 45.0).with_drag(DragProfile::new(0.3, 2.0, 0.0)),
            0.01,
        );
        let bad_dt = compute(&LaunchParameters::new(100.0, 45.0), 0.0);

        for result in [zero_speed, negative_mass, zero_caliber, bad_dt] {
            assert!(matches!(
                result,
                Err(TrajectoryError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn azimuth_rotates_drag_shot_out_of_plane() {
        let planar = compute(
            &LaunchParameters::new(200.0, 30.0).with_drag(howitzer()),
            0.01,
        )
        .expect("planar");
        let turned = compute(
            &LaunchParameters::new(200.0, 30.0)
                .with_drag(howitzer())
                .with_azimuth(90.0),
            0.01,
        )
        .expect("turned");

        assert_eq!(planar.len(), turned.len());
        assert_close(turned.landing().z_m, planar.landing().x_m, 1e-6);
        assert_close(turned.landing().x_m, 0.0, 1e-6);
        assert_close(turned.range_m(), planar.range_m(), 1e-6);
    }

    #[test]
    fn three_dimensional_ideal_shot_follows_closed_form_z() {
        let params = LaunchParameters::new(100.0, 45.0).with_azimuth(30.0);
        let trajectory = compute(&params, 0.01).expect("trajectory");
        let sample = trajectory.samples()[100];
        let (x, y, z) = ideal_position_at(&params, sample.time_s, STANDARD_GRAVITY_MPS2);
        assert_close(sample.x_m, x, 1e-9);
        assert_close(sample.y_m, y, 1e-9);
        assert_close(sample.z_m, z, 1e-9);
    }
}
