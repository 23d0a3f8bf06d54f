use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1600;
pub const INITIAL_WINDOW_HEIGHT: i32 = 900;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const LEFT_MARGIN: f32 = 420.0;
pub const RIGHT_MARGIN: f32 = 30.0;
pub const TOP_MARGIN: f32 = 120.0;
pub const BOTTOM_MARGIN: f32 = 110.0;

pub const TITLE_Y: f32 = 46.0;
pub const CONTROLS_Y: f32 = 84.0;
pub const X_GRID_LINES: usize = 10;
pub const Y_GRID_LINES: usize = 8;

pub const DEFAULT_SPEED_MPS: f32 = 320.0;
pub const DEFAULT_ANGLE_DEG: f32 = 40.0;
pub const DEFAULT_DRAG_COEFFICIENT: f32 = 0.3;
pub const DEFAULT_MASS_KG: f32 = 43.0;
pub const DEFAULT_CALIBER_MM: f32 = 152.0;
pub const DEFAULT_PLAYBACK_RATE: f32 = 4.0;
// Longest frame step fed to playback, so a stalled window does not jump.
pub const MAX_FRAME_STEP_S: f32 = 0.1;
pub const HISTORY_ROWS: usize = 8;

pub const BACKGROUND: Color = Color::new(0.98, 0.98, 0.99, 1.0);
pub const GRID_COLOR: Color = Color::new(0.89, 0.91, 0.93, 1.0);
pub const LABEL_COLOR: Color = Color::new(0.41, 0.44, 0.49, 1.0);
pub const HEADER_COLOR: Color = Color::new(0.12, 0.12, 0.14, 1.0);
pub const PREVIEW_COLOR: Color = Color::new(0.30, 0.55, 0.96, 0.55);
pub const TRAIL_COLOR: Color = Color::new(0.21, 0.48, 0.96, 1.0);
pub const TARGET_COLOR: Color = Color::new(0.32, 0.79, 0.48, 0.9);
