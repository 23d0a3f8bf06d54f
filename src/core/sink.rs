use std::io::Write;

use crate::core::ballistics::LaunchParameters;
use crate::core::error::SinkError;
use crate::core::history::ShotRecord;
use crate::core::integrator::TrajectorySample;

/// Anything that presents a trajectory: a window, a plot, a console trace.
///
/// Frames arrive in time order. `finish` is called once, after the last
/// frame, with the record of the completed shot.
pub trait TrajectorySink {
    fn begin(&mut self, _params: &LaunchParameters) -> Result<(), SinkError> {
        Ok(())
    }

    fn frame(&mut self, sample: &TrajectorySample) -> Result<(), SinkError>;

    fn finish(&mut self, _shot: &ShotRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: TrajectorySink + ?Sized> TrajectorySink for &mut S {
    fn begin(&mut self, params: &LaunchParameters) -> Result<(), SinkError> {
        (**self).begin(params)
    }

    fn frame(&mut self, sample: &TrajectorySample) -> Result<(), SinkError> {
        (**self).frame(sample)
    }

    fn finish(&mut self, shot: &ShotRecord) -> Result<(), SinkError> {
        (**self).finish(shot)
    }
}

/// A missing sink ignores everything.
impl<S: TrajectorySink> TrajectorySink for Option<S> {
    fn begin(&mut self, params: &LaunchParameters) -> Result<(), SinkError> {
        match self {
            Some(sink) => sink.begin(params),
            None => Ok(()),
        }
    }

    fn frame(&mut self, sample: &TrajectorySample) -> Result<(), SinkError> {
        match self {
            Some(sink) => sink.frame(sample),
            None => Ok(()),
        }
    }

    fn finish(&mut self, shot: &ShotRecord) -> Result<(), SinkError> {
        match self {
            Some(sink) => sink.finish(shot),
            None => Ok(()),
        }
    }
}

/// Fans every call out to both sinks, first one first.
impl<A: TrajectorySink, B: TrajectorySink> TrajectorySink for (A, B) {
    fn begin(&mut self, params: &LaunchParameters) -> Result<(), SinkError> {
        self.0.begin(params)?;
        self.1.begin(params)
    }

    fn frame(&mut self, sample: &TrajectorySample) -> Result<(), SinkError> {
        self.0.frame(sample)?;
        self.1.frame(sample)
    }

    fn finish(&mut self, shot: &ShotRecord) -> Result<(), SinkError> {
        self.0.finish(shot)?;
        self.1.finish(shot)
    }
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames: Vec<TrajectorySample>,
    pub finished: Option<ShotRecord>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrajectorySink for RecordingSink {
    fn begin(&mut self, _params: &LaunchParameters) -> Result<(), SinkError> {
        self.frames.clear();
        self.finished = None;
        Ok(())
    }

    fn frame(&mut self, sample: &TrajectorySample) -> Result<(), SinkError> {
        self.frames.push(*sample);
        Ok(())
    }

    fn finish(&mut self, shot: &ShotRecord) -> Result<(), SinkError> {
        self.finished = Some(shot.clone());
        Ok(())
    }
}

/// Writes a time/position line for every `stride`-th frame and a landing
/// summary at the end.
pub struct TextSink<W: Write> {
    out: W,
    stride: usize,
    seen: usize,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W, stride: usize) -> Self {
        Self {
            out,
            stride: stride.max(1),
            seen: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TrajectorySink for TextSink<W> {
    fn begin(&mut self, params: &LaunchParameters) -> Result<(), SinkError> {
        self.seen = 0;
        writeln!(
            self.out,
            "Launch: {:.1} m/s at {:.1} deg",
            params.speed_mps, params.angle_deg
        )?;
        writeln!(
            self.out,
            "{:>8} {:>12} {:>12} {:>12}",
            "t (s)", "x (m)", "y (m)", "z (m)"
        )?;
        Ok(())
    }

    fn frame(&mut self, sample: &TrajectorySample) -> Result<(), SinkError> {
        if self.seen % self.stride == 0 {
            writeln!(
                self.out,
                "{:>8.2} {:>12.2} {:>12.2} {:>12.2}",
                sample.time_s, sample.x_m, sample.y_m, sample.z_m
            )?;
        }
        self.seen += 1;
        Ok(())
    }

    fn finish(&mut self, shot: &ShotRecord) -> Result<(), SinkError> {
        writeln!(
            self.out,
            "Landed at ({:.2}, {:.2}, {:.2}) after {:.2} s",
            shot.landing.x_m, shot.landing.y_m, shot.landing.z_m, shot.flight_time_s
        )?;
        self.out.flush()?;
        Ok(())
    }
}
