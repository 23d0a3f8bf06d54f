use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::core::ballistics::LaunchParameters;
use crate::core::error::SinkError;
use crate::core::history::ShotRecord;
use crate::core::integrator::TrajectorySample;
use crate::core::sink::TrajectorySink;
use crate::core::window::AxisWindow;

const DEFAULT_PLOT_SIZE: (u32, u32) = (1280, 720);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotFormat {
    Svg,
    Png,
}

impl PlotFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(PlotFormat::Svg),
            "png" => Some(PlotFormat::Png),
            _ => None,
        }
    }
}

/// Collects frames and draws a side-view chart when the shot finishes.
pub struct PlotSink {
    path: PathBuf,
    format: PlotFormat,
    size: (u32, u32),
    frames: Vec<TrajectorySample>,
}

impl PlotSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let format = PlotFormat::from_path(&path).ok_or_else(|| {
            SinkError::Plot(format!(
                "unsupported plot file '{}', expected .svg or .png",
                path.display()
            ))
        })?;
        Ok(Self {
            path,
            format,
            size: DEFAULT_PLOT_SIZE,
            frames: Vec::new(),
        })
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width.max(200), height.max(150));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TrajectorySink for PlotSink {
    fn begin(&mut self, _params: &LaunchParameters) -> Result<(), SinkError> {
        self.frames.clear();
        Ok(())
    }

    fn frame(&mut self, sample: &TrajectorySample) -> Result<(), SinkError> {
        self.frames.push(*sample);
        Ok(())
    }

    fn finish(&mut self, shot: &ShotRecord) -> Result<(), SinkError> {
        if self.frames.is_empty() {
            return Err(SinkError::Plot("no trajectory samples to draw".to_string()));
        }
        match self.format {
            PlotFormat::Svg => {
                let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
                draw_chart(root, &self.frames, shot)
            }
            PlotFormat::Png => {
                let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
                draw_chart(root, &self.frames, shot)
            }
        }
    }
}

fn plot_err<E: std::fmt::Display>(err: E) -> SinkError {
    SinkError::Plot(err.to_string())
}

fn draw_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    frames: &[TrajectorySample],
    shot: &ShotRecord,
) -> Result<(), SinkError> {
    let window = AxisWindow::for_samples(frames, &shot.params);

    root.fill(&WHITE).map_err(plot_err)?;
    match window.max_z_m {
        Some(max_z) => {
            let (side, top) = root.split_horizontally(root.dim_in_pixel().0 * 3 / 5);
            draw_side_view(&side, frames, shot, &window)?;
            draw_top_view(&top, frames, shot, &window, max_z)?;
        }
        None => draw_side_view(&root, frames, shot, &window)?,
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Height against ground distance from the launch point.
fn draw_side_view<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frames: &[TrajectorySample],
    shot: &ShotRecord,
    window: &AxisWindow,
) -> Result<(), SinkError> {
    let params = &shot.params;
    let mut chart = ChartBuilder::on(area)
        .caption(
            format!(
                "{:.1} m/s at {:.1} deg ({} model)",
                params.speed_mps,
                params.angle_deg,
                shot.model.label()
            ),
            ("sans-serif", 26),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..window.max_x_m, 0f64..window.max_y_m)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Distance (m)")
        .y_desc("Height (m)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            frames.iter().map(|s| (s.horizontal_distance_m(), s.y_m)),
            ShapeStyle::from(&BLUE).stroke_width(2),
        ))
        .map_err(plot_err)?
        .label("Trajectory")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    let apex = frames
        .iter()
        .fold(frames[0], |best, s| if s.y_m > best.y_m { *s } else { best });
    chart
        .draw_series(std::iter::once(Circle::new(
            (apex.horizontal_distance_m(), apex.y_m),
            5,
            ShapeStyle::from(&MAGENTA).filled(),
        )))
        .map_err(plot_err)?
        .label(format!("Apex {:.1} m", apex.y_m))
        .legend(|(x, y)| Circle::new((x + 10, y), 4, MAGENTA.filled()));

    chart
        .draw_series(std::iter::once(Circle::new(
            (shot.range_m(), shot.landing.y_m),
            5,
            ShapeStyle::from(&RED).filled(),
        )))
        .map_err(plot_err)?
        .label(format!(
            "Landing {:.1} m after {:.2} s",
            shot.range_m(),
            shot.flight_time_s
        ))
        .legend(|(x, y)| Circle::new((x + 10, y), 4, RED.filled()));

    if let Some(target) = params.target_distance_m() {
        chart
            .draw_series(std::iter::once(TriangleMarker::new(
                (target, 0.0),
                8,
                ShapeStyle::from(&GREEN).filled(),
            )))
            .map_err(plot_err)?
            .label(format!("Target {target:.0} m"))
            .legend(|(x, y)| TriangleMarker::new((x + 10, y), 5, GREEN.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;
    Ok(())
}

/// Ground track seen from above: x against cross-range z.
fn draw_top_view<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    frames: &[TrajectorySample],
    shot: &ShotRecord,
    window: &AxisWindow,
    max_z: f64,
) -> Result<(), SinkError> {
    let min_x = if frames.iter().any(|s| s.x_m < 0.0) {
        -window.max_x_m
    } else {
        0.0
    };
    let mut chart = ChartBuilder::on(area)
        .caption(
            format!("Azimuth {:.1} deg", shot.params.azimuth_deg.unwrap_or(0.0)),
            ("sans-serif", 22),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(min_x..window.max_x_m, -max_z..max_z)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("X (m)")
        .y_desc("Cross-range Z (m)")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            frames.iter().map(|s| (s.x_m, s.z_m)),
            ShapeStyle::from(&BLUE).stroke_width(2),
        ))
        .map_err(plot_err)?;

    chart
        .draw_series(std::iter::once(Circle::new(
            (shot.landing.x_m, shot.landing.z_m),
            5,
            ShapeStyle::from(&RED).filled(),
        )))
        .map_err(plot_err)?;
    Ok(())
}
