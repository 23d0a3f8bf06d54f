use crate::core::ballistics::{AxisClamps, LaunchParameters};
use crate::core::integrator::{Trajectory, TrajectorySample};

pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

/// Visible data extents: downrange distance vs height, plus a symmetric
/// cross-range half-width for shots with an azimuth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisWindow {
    pub max_x_m: f64,
    pub max_y_m: f64,
    pub max_z_m: Option<f64>,
}

impl AxisWindow {
    /// Pads the raw extents, widens one axis to keep the fixed ratio, then
    /// applies any display clamps.
    pub fn fit(raw_max_x: f64, raw_max_y: f64, clamps: &AxisClamps) -> Self {
        let x_span = raw_max_x.max(1.0);
        let y_span = raw_max_y.max(1.0);
        let mut max_x = (x_span + x_span * X_PADDING_RATIO).max(1.0);
        let mut max_y = (y_span + y_span * Y_PADDING_RATIO).max(1.0);

        if max_x / max_y < DISTANCE_TO_HEIGHT_RATIO {
            max_x = max_y * DISTANCE_TO_HEIGHT_RATIO;
        } else {
            max_y = max_x / DISTANCE_TO_HEIGHT_RATIO;
        }

        if let Some(limit) = clamps.max_x_m {
            max_x = max_x.min(limit);
        }
        if let Some(limit) = clamps.max_y_m {
            max_y = max_y.min(limit);
        }

        Self {
            max_x_m: max_x,
            max_y_m: max_y,
            max_z_m: None,
        }
    }

    /// Adds a cross-range extent covering `raw_max_abs_z` either side of the
    /// launch line, capped by the Z clamp.
    pub fn with_cross_range(mut self, raw_max_abs_z: f64, clamps: &AxisClamps) -> Self {
        let z_span = raw_max_abs_z.abs().max(1.0);
        let mut max_z = z_span + z_span * X_PADDING_RATIO;
        if let Some(limit) = clamps.max_z_m {
            max_z = max_z.min(limit);
        }
        self.max_z_m = Some(max_z);
        self
    }

    /// Window that shows the whole flight and the target, if there is one.
    pub fn for_trajectory(trajectory: &Trajectory, params: &LaunchParameters) -> Self {
        Self::for_samples(trajectory.samples(), params)
    }

    pub fn for_samples(samples: &[TrajectorySample], params: &LaunchParameters) -> Self {
        let raw_max_x = samples
            .iter()
            .fold(0.0f64, |acc, s| acc.max(s.horizontal_distance_m()))
            .max(params.target_distance_m().unwrap_or(0.0));
        let raw_max_y = samples.iter().fold(0.0f64, |acc, s| acc.max(s.y_m));
        let window = Self::fit(raw_max_x, raw_max_y, &params.clamps);

        if params.is_three_dimensional() {
            let raw_max_z = samples.iter().fold(0.0f64, |acc, s| acc.max(s.z_m.abs()));
            window.with_cross_range(raw_max_z, &params.clamps)
        } else {
            window
        }
    }
}
