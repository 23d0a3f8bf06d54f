use serde::{Deserialize, Serialize};

use crate::core::error::TrajectoryError;

pub const STANDARD_GRAVITY_MPS2: f64 = 9.81;
pub const DEFAULT_TIME_STEP_S: f64 = 0.01;
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

// Standard atmosphere used by the drag model.
pub const SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;
pub const AIR_MOLAR_MASS_G_PER_MOL: f64 = 28.98;
pub const GAS_CONSTANT_J_PER_MOL_K: f64 = 8.314;
pub const STANDARD_TEMPERATURE_K: f64 = 288.15;

/// Below this speed the drag model's angular update diverges.
pub const MIN_DRAG_SPEED_MPS: f64 = 1e-6;

/// Aerodynamic properties of the projectile. Supplying one switches the
/// integrator to the drag-aware model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragProfile {
    pub drag_coefficient: f64,
    pub mass_kg: f64,
    pub caliber_mm: f64,
}

impl DragProfile {
    pub fn new(drag_coefficient: f64, mass_kg: f64, caliber_mm: f64) -> Self {
        Self {
            drag_coefficient,
            mass_kg,
            caliber_mm,
        }
    }

    pub fn frontal_area_m2(&self) -> f64 {
        let radius_m = self.caliber_mm / 1000.0 / 2.0;
        std::f64::consts::PI * radius_m * radius_m
    }

    /// k in dv/dt = -k·v² - g·sin(θ).
    pub fn drag_factor(&self) -> f64 {
        self.drag_coefficient * self.frontal_area_m2() * air_density_kg_m3() / (2.0 * self.mass_kg)
    }

    fn validate(&self) -> Result<(), TrajectoryError> {
        if !self.drag_coefficient.is_finite() || self.drag_coefficient < 0.0 {
            return Err(TrajectoryError::invalid(
                "drag coefficient",
                self.drag_coefficient,
                "must be a finite number >= 0",
            ));
        }
        require_positive("mass", self.mass_kg)?;
        require_positive("caliber", self.caliber_mm)
    }
}

/// Display range limits. They never affect the physics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisClamps {
    pub max_x_m: Option<f64>,
    pub max_y_m: Option<f64>,
    pub max_z_m: Option<f64>,
}

impl AxisClamps {
    fn validate(&self) -> Result<(), TrajectoryError> {
        for (name, value) in [
            ("max X", self.max_x_m),
            ("max Y", self.max_y_m),
            ("max Z", self.max_z_m),
        ] {
            if let Some(value) = value {
                require_positive(name, value)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchParameters {
    pub speed_mps: f64,
    pub angle_deg: f64,
    /// `Some` selects the 3D variant.
    pub azimuth_deg: Option<f64>,
    pub drag: Option<DragProfile>,
    pub target_distance_km: Option<f64>,
    pub clamps: AxisClamps,
}

impl LaunchParameters {
    pub fn new(speed_mps: f64, angle_deg: f64) -> Self {
        Self {
            speed_mps,
            angle_deg,
            azimuth_deg: None,
            drag: None,
            target_distance_km: None,
            clamps: AxisClamps::default(),
        }
    }

    pub fn with_azimuth(mut self, azimuth_deg: f64) -> Self {
        self.azimuth_deg = Some(azimuth_deg);
        self
    }

    pub fn with_drag(mut self, drag: DragProfile) -> Self {
        self.drag = Some(drag);
        self
    }

    pub fn with_target_km(mut self, target_distance_km: f64) -> Self {
        self.target_distance_km = Some(target_distance_km);
        self
    }

    pub fn with_clamps(mut self, clamps: AxisClamps) -> Self {
        self.clamps = clamps;
        self
    }

    pub fn is_three_dimensional(&self) -> bool {
        self.azimuth_deg.is_some()
    }

    pub fn target_distance_m(&self) -> Option<f64> {
        self.target_distance_km.map(|km| km * 1000.0)
    }

    pub fn validate(&self) -> Result<(), TrajectoryError> {
        require_positive("speed", self.speed_mps)?;
        if !self.angle_deg.is_finite() || !(-90.0..=90.0).contains(&self.angle_deg) {
            return Err(TrajectoryError::invalid(
                "angle",
                self.angle_deg,
                "must be between -90 and 90 degrees",
            ));
        }
        if let Some(azimuth) = self.azimuth_deg {
            if !azimuth.is_finite() {
                return Err(TrajectoryError::invalid(
                    "azimuth",
                    azimuth,
                    "must be a finite number",
                ));
            }
        }
        if let Some(drag) = &self.drag {
            drag.validate()?;
        }
        if let Some(target) = self.target_distance_km {
            require_positive("target distance", target)?;
        }
        self.clamps.validate()
    }
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<(), TrajectoryError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TrajectoryError::invalid(
            name,
            value,
            "must be a finite number > 0",
        ));
    }
    Ok(())
}

/// Air density in kg/m³ from the ideal gas law at standard conditions.
pub fn air_density_kg_m3() -> f64 {
    (SEA_LEVEL_PRESSURE_PA * AIR_MOLAR_MASS_G_PER_MOL)
        / (GAS_CONSTANT_J_PER_MOL_K * STANDARD_TEMPERATURE_K)
        / 1000.0
}

/// Launch velocity split into (x, y, z). Planar launches have no z part.
pub fn velocity_components(params: &LaunchParameters) -> (f64, f64, f64) {
    let theta = params.angle_deg.to_radians();
    let phi = params.azimuth_deg.unwrap_or(0.0).to_radians();
    let horizontal = params.speed_mps * theta.cos();
    (
        horizontal * phi.cos(),
        params.speed_mps * theta.sin(),
        horizontal * phi.sin(),
    )
}

/// Drag-free position at `time_s`.
pub fn ideal_position_at(
    params: &LaunchParameters,
    time_s: f64,
    gravity_mps2: f64,
) -> (f64, f64, f64) {
    let (vx, vy, vz) = velocity_components(params);
    let fall = 0.5 * gravity_mps2 * time_s * time_s;
    let z = if params.is_three_dimensional() {
        (vz * time_s) - fall
    } else {
        0.0
    };
    (vx * time_s, (vy * time_s) - fall, z)
}

/// Drag-free time until the projectile returns to launch height.
pub fn ideal_flight_time(params: &LaunchParameters, gravity_mps2: f64) -> f64 {
    let (_, vy, _) = velocity_components(params);
    (2.0 * vy / gravity_mps2).max(0.0)
}

pub fn ideal_apex_height(params: &LaunchParameters, gravity_mps2: f64) -> f64 {
    let (_, vy, _) = velocity_components(params);
    if vy <= 0.0 {
        return 0.0;
    }
    vy * vy / (2.0 * gravity_mps2)
}

pub fn ideal_range(params: &LaunchParameters, gravity_mps2: f64) -> f64 {
    let (vx, _, _) = velocity_components(params);
    vx * ideal_flight_time(params, gravity_mps2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    #[test]
    fn standard_air_density_matches_sea_level() {
        assert_close(air_density_kg_m3(), 1.2257, 0.0005);
    }

    #[test]
    fn drag_factor_scales_with_area_over_mass() {
        let drag = DragProfile::new(0.3, 10.0, 100.0);
        assert_close(drag.frontal_area_m2(), 0.007854, 1e-6);
        let expected = 0.3 * 0.007854 * air_density_kg_m3() / 20.0;
        assert_close(drag.drag_factor(), expected, 1e-8);
    }

    #[test]
    fn computes_known_range_for_flat_ground() {
        let params = LaunchParameters::new(10.0, 45.0);
        assert_close(ideal_flight_time(&params, 9.8), 1.4431, 0.001);
        assert_close(ideal_range(&params, 9.8), 10.2041, 0.001);
        assert_close(ideal_apex_height(&params, 9.8), 2.5510, 0.001);
    }

    #[test]
    fn azimuth_splits_horizontal_velocity() {
        let params = LaunchParameters::new(100.0, 0.0).with_azimuth(90.0);
        let (vx, vy, vz) = velocity_components(&params);
        assert_close(vx, 0.0, 1e-9);
        assert_close(vy, 0.0, 1e-9);
        assert_close(vz, 100.0, 1e-9);
    }

    #[test]
    fn planar_launch_stays_on_z_zero() {
        let params = LaunchParameters::new(50.0, 30.0);
        let (_, _, z) = ideal_position_at(&params, 2.0, STANDARD_GRAVITY_MPS2);
        assert_eq!(z, 0.0);
    }

    #[test]
    fn downward_launch_has_no_apex_or_range() {
        let params = LaunchParameters::new(50.0, -10.0);
        assert_eq!(ideal_apex_height(&params, STANDARD_GRAVITY_MPS2), 0.0);
        assert_eq!(ideal_range(&params, STANDARD_GRAVITY_MPS2), 0.0);
    }

    #[test]
    fn rejects_out_of_domain_inputs() {
        let cases = [
            LaunchParameters::new(0.0, 45.0),
            LaunchParameters::new(f64::NAN, 45.0),
            LaunchParameters::new(100.0, 120.0),
            LaunchParameters::new(100.0, 45.0).with_azimuth(f64::INFINITY),
            LaunchParameters::new(100.0, 45.0).with_drag(DragProfile::new(0.3, 0.0, 100.0)),
            LaunchParameters::new(100.0, 45.0).with_drag(DragProfile::new(0.3, 1.0, -5.0)),
            LaunchParameters::new(100.0, 45.0).with_drag(DragProfile::new(-0.1, 1.0, 5.0)),
            LaunchParameters::new(100.0, 45.0).with_target_km(0.0),
            LaunchParameters::new(100.0, 45.0).with_clamps(AxisClamps {
                max_y_m: Some(-1.0),
                ..Default::default()
            }),
        ];

        for params in cases {
            let err = params.validate().expect_err("validation should fail");
            assert!(matches!(err, TrajectoryError::InvalidParameter { .. }), "{err}");
        }
    }

    #[test]
    fn zero_drag_coefficient_is_accepted() {
        let params =
            LaunchParameters::new(100.0, 45.0).with_drag(DragProfile::new(0.0, 1.0, 50.0));
        assert!(params.validate().is_ok());
    }
}
