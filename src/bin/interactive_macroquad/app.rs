use ballistic_range::core::window::AxisWindow;
use macroquad::prelude::*;

use crate::constants::{
    BACKGROUND, BOTTOM_MARGIN, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN,
    MAX_FRAME_STEP_S, MSAA_SAMPLES, PREVIEW_COLOR, RIGHT_MARGIN, TOP_MARGIN, TRAIL_COLOR,
    UI_FONT_PATH,
};
use crate::controls::{apply_actions, draw_control_panel, hotkey_actions};
use crate::hud::draw_hud;
use crate::render::{PlotArea, draw_axes, draw_path, draw_projectile, draw_target};
use crate::state::{AppRuntime, FlightPhase};

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Ballistic Range".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

fn world_window(state: &AppRuntime) -> (f32, f32) {
    let params = state.config.launch_parameters();
    let mut raw_max_x = params.target_distance_m().unwrap_or(0.0);
    let mut raw_max_y = 0.0f64;

    if let Ok(preview) = &state.preview {
        raw_max_x = raw_max_x.max(preview.range_m());
        raw_max_y = raw_max_y.max(preview.apex().y_m);
    }
    if let Some(flight) = &state.flight {
        let trajectory = flight.playback.trajectory();
        raw_max_x = raw_max_x.max(trajectory.range_m());
        raw_max_y = raw_max_y.max(trajectory.apex().y_m);
    }

    let window = AxisWindow::fit(raw_max_x, raw_max_y, &params.clamps);
    (window.max_x_m as f32, window.max_y_m as f32)
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            println!("Could not load '{UI_FONT_PATH}': {err}. Falling back to default font.");
            None
        }
    };

    let mut state = AppRuntime::new();

    loop {
        let frame_dt = get_frame_time().min(MAX_FRAME_STEP_S);
        let screen_w = screen_width();
        let screen_h = screen_height();

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        apply_actions(&mut state, actions);
        state.refresh_preview();
        state.step_flight(frame_dt);

        let (world_max_x, world_max_y) = world_window(&state);
        let area = PlotArea {
            left: LEFT_MARGIN,
            right: screen_w - RIGHT_MARGIN,
            top: TOP_MARGIN,
            bottom: screen_h - BOTTOM_MARGIN,
            world_max_x,
            world_max_y,
        };

        clear_background(BACKGROUND);
        draw_axes(&area, ui_font.as_ref());

        if let Some(target_m) = state.config.launch_parameters().target_distance_m() {
            draw_target(&area, target_m as f32, ui_font.as_ref());
        }

        if state.show_preview && state.phase != FlightPhase::Flying {
            if let Ok(preview) = &state.preview {
                let points: Vec<Vec2> = preview
                    .iter()
                    .map(|s| vec2(s.x_m as f32, s.y_m as f32))
                    .collect();
                draw_path(&area, &points, 2.0, PREVIEW_COLOR);
            }
        }

        if let Some(flight) = &state.flight {
            draw_path(&area, &flight.trail.points, 3.0, TRAIL_COLOR);
        }
        if let Some(position) = state.projectile_position() {
            draw_projectile(&area, position);
        }

        draw_hud(&state, &area, screen_h, ui_font.as_ref());

        next_frame().await;
    }
}
