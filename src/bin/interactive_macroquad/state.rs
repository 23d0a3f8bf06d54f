use ballistic_range::core::ballistics::DEFAULT_TIME_STEP_S;
use ballistic_range::core::report::format_shot_summary;
use ballistic_range::core::{
    DragProfile, History, LaunchParameters, Playback, ShotRecord, SinkError, Trajectory,
    TrajectoryError, TrajectorySample, TrajectorySink, compute,
};
use macroquad::prelude::{Vec2, vec2};

use crate::constants::{
    DEFAULT_ANGLE_DEG, DEFAULT_CALIBER_MM, DEFAULT_DRAG_COEFFICIENT, DEFAULT_MASS_KG,
    DEFAULT_PLAYBACK_RATE, DEFAULT_SPEED_MPS,
};

#[derive(Clone, Copy)]
pub(crate) struct PanelConfig {
    pub(crate) speed_mps: f32,
    pub(crate) angle_deg: f32,
    pub(crate) use_drag: bool,
    pub(crate) drag_coefficient: f32,
    pub(crate) mass_kg: f32,
    pub(crate) caliber_mm: f32,
    pub(crate) use_target: bool,
    pub(crate) target_km: f32,
    pub(crate) playback_rate: f32,
}

impl PanelConfig {
    fn new() -> Self {
        Self {
            speed_mps: DEFAULT_SPEED_MPS,
            angle_deg: DEFAULT_ANGLE_DEG,
            use_drag: true,
            drag_coefficient: DEFAULT_DRAG_COEFFICIENT,
            mass_kg: DEFAULT_MASS_KG,
            caliber_mm: DEFAULT_CALIBER_MM,
            use_target: false,
            target_km: 5.0,
            playback_rate: DEFAULT_PLAYBACK_RATE,
        }
    }

    pub(crate) fn launch_parameters(&self) -> LaunchParameters {
        let mut params = LaunchParameters::new(self.speed_mps as f64, self.angle_deg as f64);
        if self.use_drag {
            params = params.with_drag(DragProfile::new(
                self.drag_coefficient as f64,
                self.mass_kg as f64,
                self.caliber_mm as f64,
            ));
        }
        if self.use_target {
            params = params.with_target_km(self.target_km as f64);
        }
        params
    }
}

/// Screen-space trail built from played-back samples (x downrange, y up).
#[derive(Default)]
pub(crate) struct Trail {
    pub(crate) points: Vec<Vec2>,
}

impl TrajectorySink for Trail {
    fn frame(&mut self, sample: &TrajectorySample) -> Result<(), SinkError> {
        self.points.push(vec2(sample.x_m as f32, sample.y_m as f32));
        Ok(())
    }
}

pub(crate) struct Flight {
    pub(crate) params: LaunchParameters,
    pub(crate) playback: Playback,
    pub(crate) trail: Trail,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlightPhase {
    Aiming,
    Flying,
    Landed,
}

pub(crate) struct AppRuntime {
    pub(crate) config: PanelConfig,
    pub(crate) phase: FlightPhase,
    pub(crate) paused: bool,
    pub(crate) show_preview: bool,
    pub(crate) flight: Option<Flight>,
    pub(crate) preview: Result<Trajectory, TrajectoryError>,
    pub(crate) history: History,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new() -> Self {
        let config = PanelConfig::new();
        Self {
            config,
            phase: FlightPhase::Aiming,
            paused: false,
            show_preview: true,
            flight: None,
            preview: compute(&config.launch_parameters(), DEFAULT_TIME_STEP_S),
            history: History::new(),
            status_line: "Ready".to_string(),
        }
    }

    pub(crate) fn refresh_preview(&mut self) {
        self.preview = compute(&self.config.launch_parameters(), DEFAULT_TIME_STEP_S);
    }

    pub(crate) fn launch(&mut self) {
        let params = self.config.launch_parameters();
        match compute(&params, DEFAULT_TIME_STEP_S) {
            Ok(trajectory) => {
                self.flight = Some(Flight {
                    params,
                    playback: Playback::with_rate(trajectory, self.config.playback_rate as f64),
                    trail: Trail::default(),
                });
                self.phase = FlightPhase::Flying;
                self.paused = false;
                self.status_line = "Shot launched".to_string();
            }
            Err(err) => {
                self.status_line = format!("Cannot launch: {err}");
            }
        }
    }

    pub(crate) fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.status_line = if self.paused {
            "Paused".to_string()
        } else {
            "Resumed".to_string()
        };
    }

    pub(crate) fn reset(&mut self) {
        self.phase = FlightPhase::Aiming;
        self.flight = None;
        self.paused = false;
        self.status_line = "Reset".to_string();
    }

    /// Plays the active flight forward; records the shot once it lands.
    pub(crate) fn step_flight(&mut self, frame_dt: f32) {
        if self.phase != FlightPhase::Flying || self.paused {
            return;
        }
        let Some(flight) = self.flight.as_mut() else {
            return;
        };

        flight.playback.set_rate(self.config.playback_rate as f64);
        if let Err(err) = flight.playback.advance(frame_dt as f64, &mut flight.trail) {
            self.status_line = format!("Playback failed: {err}");
            self.phase = FlightPhase::Aiming;
            return;
        }

        if flight.playback.is_finished() {
            let shot = ShotRecord::new(flight.params, flight.playback.trajectory());
            self.status_line = format_shot_summary(&shot);
            self.history.record(shot);
            self.phase = FlightPhase::Landed;
        }
    }

    pub(crate) fn flight_time_s(&self) -> f64 {
        self.flight
            .as_ref()
            .and_then(|f| f.playback.current())
            .map_or(0.0, |s| s.time_s)
    }

    pub(crate) fn projectile_position(&self) -> Option<Vec2> {
        self.flight
            .as_ref()
            .and_then(|f| f.playback.current())
            .map(|s| vec2(s.x_m as f32, s.y_m as f32))
    }
}
