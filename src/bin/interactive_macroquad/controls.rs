use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use crate::state::{AppRuntime, FlightPhase};

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) launch_pause: bool,
    pub(crate) reset: bool,
    pub(crate) clear_history: bool,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            launch_pause: self.launch_pause || other.launch_pause,
            reset: self.reset || other.reset,
            clear_history: self.clear_history || other.clear_history,
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        launch_pause: is_key_pressed(KeyCode::Space),
        reset: is_key_pressed(KeyCode::R),
        clear_history: is_key_pressed(KeyCode::C),
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), vec2(18.0, 110.0), vec2(370.0, 420.0))
        .label("Launch Controls")
        .ui(&mut *root_ui(), |ui| {
            ui.slider(hash!(), "Speed (m/s)", 10.0..1000.0, &mut state.config.speed_mps);
            ui.slider(hash!(), "Angle (deg)", -10.0..89.0, &mut state.config.angle_deg);
            ui.separator();
            ui.checkbox(hash!(), "Air drag", &mut state.config.use_drag);
            ui.slider(
                hash!(),
                "Drag coeff.",
                0.0..1.5,
                &mut state.config.drag_coefficient,
            );
            ui.slider(hash!(), "Mass (kg)", 0.1..100.0, &mut state.config.mass_kg);
            ui.slider(hash!(), "Caliber (mm)", 5.0..400.0, &mut state.config.caliber_mm);
            ui.separator();
            ui.checkbox(hash!(), "Show target", &mut state.config.use_target);
            ui.slider(hash!(), "Target (km)", 0.1..30.0, &mut state.config.target_km);
            ui.slider(
                hash!(),
                "Playback speed",
                0.5..20.0,
                &mut state.config.playback_rate,
            );
            ui.separator();
            if ui.button(None, "Launch / Pause (Space)") {
                actions.launch_pause = true;
            }
            if ui.button(None, "Reset (R)") {
                actions.reset = true;
            }
            if ui.button(None, "Clear History (C)") {
                actions.clear_history = true;
            }
            if ui.button(None, "Toggle Preview") {
                state.show_preview = !state.show_preview;
            }
        });

    actions
}

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if actions.launch_pause {
        match state.phase {
            FlightPhase::Flying => state.toggle_pause(),
            FlightPhase::Aiming | FlightPhase::Landed => state.launch(),
        }
    }
    if actions.reset {
        state.reset();
    }
    if actions.clear_history {
        state.history.clear();
        state.status_line = "History cleared".to_string();
    }
}

pub(crate) fn phase_text(phase: FlightPhase, paused: bool) -> &'static str {
    match phase {
        FlightPhase::Aiming => "Aiming",
        FlightPhase::Flying => {
            if paused {
                "Paused"
            } else {
                "Flying"
            }
        }
        FlightPhase::Landed => "Landed",
    }
}
