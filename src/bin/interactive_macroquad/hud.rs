use ballistic_range::core::ShotRecord;
use macroquad::prelude::*;

use crate::constants::{CONTROLS_Y, HEADER_COLOR, HISTORY_ROWS, TITLE_Y};
use crate::controls::phase_text;
use crate::render::{PlotArea, draw_ui_text};
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, area: &PlotArea, screen_h: f32, font: Option<&Font>) {
    draw_header(area.left, font);
    draw_range_label(state, area, font);
    draw_status_block(state, area.left, screen_h, font);
    draw_history_panel(state, 18.0, 560.0, font);
}

fn draw_header(left: f32, font: Option<&Font>) {
    draw_ui_text(
        "Ballistic Range - Trajectory Playback",
        left,
        TITLE_Y,
        30,
        HEADER_COLOR,
        font,
    );
    draw_ui_text(
        "Controls: Space launch/pause | R reset | C clear history | sliders in panel",
        left,
        CONTROLS_Y,
        20,
        DARKGRAY,
        font,
    );
}

fn draw_range_label(state: &AppRuntime, area: &PlotArea, font: Option<&Font>) {
    let Ok(preview) = &state.preview else {
        return;
    };
    let range = preview.range_m().max(0.0) as f32;
    let label = format!("{range:.1} m");
    let size = measure_text(&label, font, 18, 1.0);
    let landing = area.to_screen(vec2(range, 0.0));
    let label_x = (landing.x - (size.width * 0.5))
        .clamp(area.left + 4.0, area.right - size.width - 4.0);
    let label_y = (area.bottom - 12.0).max(area.top + 20.0);
    draw_ui_text(&label, label_x, label_y, 18, DARKGRAY, font);
}

fn draw_status_block(state: &AppRuntime, left: f32, screen_h: f32, font: Option<&Font>) {
    let phase = phase_text(state.phase, state.paused);
    let model = if state.config.use_drag {
        "drag"
    } else {
        "ideal"
    };

    draw_ui_text(
        &format!(
            "Speed: {:.1} m/s | Angle: {:.1} deg | Model: {}",
            state.config.speed_mps, state.config.angle_deg, model
        ),
        left,
        screen_h - 45.0,
        24,
        HEADER_COLOR,
        font,
    );
    draw_ui_text(
        &format!(
            "Time: {:.2} s | Playback x{:.1} | State: {} | {}",
            state.flight_time_s(),
            state.config.playback_rate,
            phase,
            state.status_line
        ),
        left,
        screen_h - 14.0,
        20,
        BLUE,
        font,
    );

    let prediction = match &state.preview {
        Ok(preview) => format!(
            "Prediction -> range {:.1} m, apex {:.1} m, flight {:.2} s",
            preview.range_m(),
            preview.apex().y_m,
            preview.flight_time_s()
        ),
        Err(err) => format!("Prediction unavailable: {err}"),
    };
    draw_ui_text(&prediction, left, screen_h - 76.0, 18, DARKGRAY, font);
}

fn history_line(shot: &ShotRecord) -> String {
    format!(
        "#{} {:.0} m/s @ {:.1} deg -> {:.1} m in {:.2} s",
        shot.shot_number,
        shot.params.speed_mps,
        shot.params.angle_deg,
        shot.range_m(),
        shot.flight_time_s
    )
}

fn draw_history_panel(state: &AppRuntime, x: f32, y: f32, font: Option<&Font>) {
    draw_ui_text("Shot history", x, y, 22, HEADER_COLOR, font);
    if state.history.is_empty() {
        draw_ui_text("No shots recorded.", x, y + 26.0, 18, DARKGRAY, font);
        return;
    }

    let skip = state.history.len().saturating_sub(HISTORY_ROWS);
    for (row, shot) in state.history.iter().skip(skip).enumerate() {
        draw_ui_text(
            &history_line(shot),
            x,
            y + 26.0 + (row as f32 * 22.0),
            18,
            DARKGRAY,
            font,
        );
    }
}
