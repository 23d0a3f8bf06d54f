use std::error::Error;
use std::fmt;
use std::io;

/// Failure of a trajectory computation. No partial trajectory accompanies
/// an error; the caller can fix the inputs and call again.
#[derive(Debug, Clone, PartialEq)]
pub enum TrajectoryError {
    /// An input was non-finite or outside its domain. Raised before any
    /// integration step runs.
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// The drag model's speed collapsed (or a state value stopped being
    /// finite) before the projectile reached the ground.
    ArithmeticDegeneracy {
        step: usize,
        time_s: f64,
        speed_mps: f64,
    },
    /// The projectile was still airborne after the configured step budget.
    StepLimitExceeded { max_steps: usize },
}

impl TrajectoryError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        TrajectoryError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

impl fmt::Display for TrajectoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrajectoryError::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "Invalid {name}: {value} ({reason})."),
            TrajectoryError::ArithmeticDegeneracy {
                step,
                time_s,
                speed_mps,
            } => write!(
                f,
                "Speed collapsed to {speed_mps} m/s at step {step} (t = {time_s:.2} s) before landing."
            ),
            TrajectoryError::StepLimitExceeded { max_steps } => write!(
                f,
                "Projectile still airborne after {max_steps} steps. Check your inputs."
            ),
        }
    }
}

impl Error for TrajectoryError {}

/// Failure of a trajectory sink while presenting samples.
#[derive(Debug)]
pub enum SinkError {
    Io(io::Error),
    Plot(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SinkError::Io(err) => write!(f, "Could not write trajectory output: {err}"),
            SinkError::Plot(msg) => write!(f, "Could not draw trajectory plot: {msg}"),
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SinkError::Io(err) => Some(err),
            SinkError::Plot(_) => None,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(err: io::Error) -> Self {
        SinkError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::{SinkError, TrajectoryError};

    #[test]
    fn invalid_parameter_message_names_the_input() {
        let err = TrajectoryError::invalid("mass", -1.0, "must be positive");
        assert_eq!(err.to_string(), "Invalid mass: -1 (must be positive).");
    }

    #[test]
    fn io_errors_convert_into_sink_errors() {
        let err: SinkError = std::io::Error::other("disk full").into();
        assert!(matches!(err, SinkError::Io(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
