use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ballistic_range::core::ballistics::{
    AxisClamps, DEFAULT_MAX_STEPS, DEFAULT_TIME_STEP_S, DragProfile, LaunchParameters,
    STANDARD_GRAVITY_MPS2,
};
use ballistic_range::core::integrator::{IntegratorConfig, compute_with};
use ballistic_range::core::plot::PlotSink;
use ballistic_range::core::report::{
    format_history_text, format_shot_summary, history_to_csv, history_to_json,
};
use ballistic_range::core::{History, TextSink, play};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
    Csv,
}

/// Projectile range calculator. Values left out are asked for on stdin.
#[derive(Parser, Debug)]
#[command(name = "ballistic_range", version)]
struct Cli {
    /// Initial speed (m/s)
    #[arg(short = 'v', long)]
    speed: Option<f64>,

    /// Launch angle above the horizon (degrees)
    #[arg(short = 'a', long, allow_hyphen_values = true)]
    angle: Option<f64>,

    /// Horizontal launch direction (degrees); enables the 3D variant
    #[arg(long, allow_hyphen_values = true)]
    azimuth: Option<f64>,

    /// Use the drag model; missing drag values are prompted for
    #[arg(long)]
    drag: bool,

    /// Drag coefficient
    #[arg(long)]
    cd: Option<f64>,

    /// Projectile mass (kg)
    #[arg(long)]
    mass: Option<f64>,

    /// Projectile caliber (mm)
    #[arg(long)]
    caliber: Option<f64>,

    /// Distance to the target (km)
    #[arg(long)]
    target_km: Option<f64>,

    /// Display limit for the distance axis (m)
    #[arg(long)]
    max_x: Option<f64>,

    /// Display limit for the height axis (m)
    #[arg(long)]
    max_y: Option<f64>,

    /// Display limit for the cross-range axis of the --plot top view (m)
    #[arg(long)]
    max_z: Option<f64>,

    /// Integration time step (s)
    #[arg(long, default_value_t = DEFAULT_TIME_STEP_S)]
    dt: f64,

    /// Gravitational acceleration (m/s^2)
    #[arg(long, default_value_t = STANDARD_GRAVITY_MPS2)]
    gravity: f64,

    /// Give up on flights needing more steps than this
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Format of the history report printed at the end
    #[arg(short = 'f', long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Write a chart of each shot (.svg or .png)
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Print the trajectory while it plays
    #[arg(long)]
    trace: bool,

    /// Print every Nth sample when tracing
    #[arg(long, default_value_t = 50)]
    trace_stride: usize,

    /// Keep firing until told to stop
    #[arg(short = 'i', long)]
    interactive: bool,
}

fn read_f64(prompt: &str) -> Result<f64, String> {
    loop {
        print!("{prompt}");
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {e}"))?;

        let mut line = String::new();
        let bytes = io::stdin()
            .read_line(&mut line)
            .map_err(|e| format!("Could not read input: {e}"))?;

        if bytes == 0 {
            return Err("Input ended unexpectedly (EOF).".to_string());
        }

        match line.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => eprintln!("Please enter a valid number (e.g., 45 or 12.5)."),
        }
    }
}

fn read_yes(prompt: &str) -> Result<bool, String> {
    print!("{prompt}");
    io::stdout()
        .flush()
        .map_err(|e| format!("Failed to flush stdout: {e}"))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| format!("Could not read input: {e}"))?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn value_or_prompt(value: Option<f64>, prompt: &str) -> Result<f64, String> {
    match value {
        Some(v) => Ok(v),
        None => read_f64(prompt),
    }
}

fn launch_from_cli(cli: &Cli) -> Result<LaunchParameters, String> {
    let speed = value_or_prompt(cli.speed, "Initial speed (m/s): ")?;
    let angle = value_or_prompt(cli.angle, "Launch angle (degrees): ")?;

    let mut params = LaunchParameters::new(speed, angle).with_clamps(AxisClamps {
        max_x_m: cli.max_x,
        max_y_m: cli.max_y,
        max_z_m: cli.max_z,
    });
    if let Some(azimuth) = cli.azimuth {
        params = params.with_azimuth(azimuth);
    }
    if cli.drag || cli.cd.is_some() || cli.mass.is_some() || cli.caliber.is_some() {
        params = params.with_drag(DragProfile::new(
            value_or_prompt(cli.cd, "Drag coefficient: ")?,
            value_or_prompt(cli.mass, "Projectile mass (kg): ")?,
            value_or_prompt(cli.caliber, "Projectile caliber (mm): ")?,
        ));
    }
    if let Some(target) = cli.target_km {
        params = params.with_target_km(target);
    }
    Ok(params)
}

/// Asks for a fresh speed and angle (and drag values when the previous
/// shot used drag), keeping everything else.
fn next_launch(previous: &LaunchParameters) -> Result<LaunchParameters, String> {
    let mut params = *previous;
    params.speed_mps = read_f64("Initial speed (m/s): ")?;
    params.angle_deg = read_f64("Launch angle (degrees): ")?;
    if params.drag.is_some() {
        params.drag = Some(DragProfile::new(
            read_f64("Drag coefficient: ")?,
            read_f64("Projectile mass (kg): ")?,
            read_f64("Projectile caliber (mm): ")?,
        ));
    }
    Ok(params)
}

fn plot_path_for(base: &Path, shot_number: usize, numbered: bool) -> PathBuf {
    if !numbered {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("trajectory");
    let ext = base.extension().and_then(|s| s.to_str()).unwrap_or("svg");
    base.with_file_name(format!("{stem}-{shot_number}.{ext}"))
}

fn fire(
    cli: &Cli,
    config: &IntegratorConfig,
    params: &LaunchParameters,
    history: &mut History,
) -> Result<(), String> {
    let trajectory = compute_with(params, config).map_err(|e| e.to_string())?;

    let trace = cli
        .trace
        .then(|| TextSink::new(io::stdout().lock(), cli.trace_stride));
    let plot = match &cli.plot {
        Some(base) => {
            let path = plot_path_for(base, history.len() + 1, cli.interactive);
            Some(PlotSink::new(path).map_err(|e| e.to_string())?)
        }
        None => None,
    };
    let plot_path = plot.as_ref().map(|p| p.path().to_path_buf());

    let shot = play(params, &trajectory, (trace, plot)).map_err(|e| e.to_string())?;

    println!(
        "\n{} trajectory: {} samples",
        shot.model.label(),
        trajectory.len()
    );
    println!("{}", format_shot_summary(&shot));
    if let Some(path) = plot_path {
        println!("Plot written to {}", path.display());
    }
    history.record(shot);
    Ok(())
}

fn print_report(history: &History, format: ReportFormat) -> Result<(), String> {
    match format {
        ReportFormat::Text => print!("\n{}", format_history_text(history)),
        ReportFormat::Json => println!(
            "{}",
            history_to_json(history).map_err(|e| format!("Could not encode history: {e}"))?
        ),
        ReportFormat::Csv => print!("{}", history_to_csv(history)),
    }
    Ok(())
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let config = IntegratorConfig {
        dt_s: cli.dt,
        gravity_mps2: cli.gravity,
        max_steps: cli.max_steps,
    };
    let mut history = History::new();

    let mut params = launch_from_cli(&cli)?;
    loop {
        match fire(&cli, &config, &params, &mut history) {
            Ok(()) => {}
            // Bad inputs are recoverable when the user can try again.
            Err(err) if cli.interactive => eprintln!("Error: {err}"),
            Err(err) => return Err(err),
        }

        if !cli.interactive || !read_yes("\nAnother shot? [y/N]: ")? {
            break;
        }
        params = next_launch(&params)?;
    }

    print_report(&history, cli.format)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        eprintln!("Run with --help for usage.");
        std::process::exit(1);
    }
}
