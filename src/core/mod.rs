pub mod ballistics;
pub mod error;
pub mod history;
pub mod integrator;
pub mod playback;
pub mod plot;
pub mod report;
pub mod sink;
pub mod window;

pub use ballistics::{AxisClamps, DragProfile, LaunchParameters};
pub use error::{SinkError, TrajectoryError};
pub use history::{History, ShotRecord};
pub use integrator::{FlightModel, IntegratorConfig, Trajectory, TrajectorySample, compute};
pub use playback::{Playback, play};
pub use sink::{RecordingSink, TextSink, TrajectorySink};
