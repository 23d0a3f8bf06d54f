use crate::core::ballistics::LaunchParameters;
use crate::core::error::SinkError;
use crate::core::history::ShotRecord;
use crate::core::integrator::{Trajectory, TrajectorySample};
use crate::core::sink::TrajectorySink;

/// Paces a computed trajectory against a caller-driven clock.
///
/// Each `advance` moves the playback clock forward and hands the sink every
/// sample whose timestamp has been reached. `rate` scales wall time into
/// flight time (2.0 plays twice as fast).
#[derive(Clone, Debug)]
pub struct Playback {
    trajectory: Trajectory,
    next: usize,
    clock_s: f64,
    rate: f64,
}

impl Playback {
    pub fn new(trajectory: Trajectory) -> Self {
        Self::with_rate(trajectory, 1.0)
    }

    pub fn with_rate(trajectory: Trajectory, rate: f64) -> Self {
        let rate = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            1.0
        };
        Self {
            trajectory,
            next: 0,
            clock_s: 0.0,
            rate,
        }
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn clock_s(&self) -> f64 {
        self.clock_s
    }

    pub fn set_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.rate = rate;
        }
    }

    /// Returns how many samples were handed to the sink.
    pub fn advance<S: TrajectorySink>(
        &mut self,
        elapsed_s: f64,
        mut sink: S,
    ) -> Result<usize, SinkError> {
        if elapsed_s.is_finite() && elapsed_s > 0.0 {
            self.clock_s += elapsed_s * self.rate;
        }

        let samples = self.trajectory.samples();
        let start = self.next;
        while self.next < samples.len() && samples[self.next].time_s <= self.clock_s {
            sink.frame(&samples[self.next])?;
            self.next += 1;
        }
        Ok(self.next - start)
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.trajectory.len()
    }

    /// Latest sample shown, if any.
    pub fn current(&self) -> Option<TrajectorySample> {
        self.next
            .checked_sub(1)
            .map(|idx| self.trajectory.samples()[idx])
    }

    pub fn shown(&self) -> &[TrajectorySample] {
        &self.trajectory.samples()[..self.next]
    }

    pub fn progress(&self) -> f64 {
        self.next as f64 / self.trajectory.len() as f64
    }
}

/// Feeds a whole trajectory to `sink` at once and returns the shot record
/// for the caller's history.
pub fn play<S: TrajectorySink>(
    params: &LaunchParameters,
    trajectory: &Trajectory,
    mut sink: S,
) -> Result<ShotRecord, SinkError> {
    sink.begin(params)?;
    for sample in trajectory {
        sink.frame(sample)?;
    }
    let shot = ShotRecord::new(*params, trajectory);
    sink.finish(&shot)?;
    Ok(shot)
}
