use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::ballistics::LaunchParameters;
use crate::core::integrator::{FlightModel, Trajectory, TrajectorySample};

/// Summary of one completed shot.
///
/// `shot_number` is 0 until the shot is recorded in a [`History`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShotRecord {
    pub shot_number: usize,
    pub params: LaunchParameters,
    pub model: FlightModel,
    pub landing: TrajectorySample,
    pub flight_time_s: f64,
    pub apex_height_m: f64,
    pub recorded_at: DateTime<Local>,
}

impl ShotRecord {
    pub fn new(params: LaunchParameters, trajectory: &Trajectory) -> Self {
        Self::recorded_at(params, trajectory, Local::now())
    }

    pub fn recorded_at(
        params: LaunchParameters,
        trajectory: &Trajectory,
        recorded_at: DateTime<Local>,
    ) -> Self {
        Self {
            shot_number: 0,
            params,
            model: trajectory.model(),
            landing: trajectory.landing(),
            flight_time_s: trajectory.flight_time_s(),
            apex_height_m: trajectory.apex().y_m,
            recorded_at,
        }
    }

    pub fn range_m(&self) -> f64 {
        self.landing.horizontal_distance_m()
    }

    /// Landing distance minus target distance; positive means long.
    pub fn miss_distance_m(&self) -> Option<f64> {
        self.params
            .target_distance_m()
            .map(|target| self.range_m() - target)
    }
}

/// Shots recorded during one session. Owned by the front-end; nothing
/// outlives the process.
#[derive(Clone, Debug, Default, Serialize)]
pub struct History {
    shots: Vec<ShotRecord>,
    #[serde(skip)]
    numbered: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numbers the shot and appends it. Numbers keep counting across
    /// [`History::clear`].
    pub fn record(&mut self, mut shot: ShotRecord) -> &ShotRecord {
        self.numbered += 1;
        shot.shot_number = self.numbered;
        self.shots.push(shot);
        &self.shots[self.shots.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ShotRecord> {
        self.shots.get(index)
    }

    pub fn last(&self) -> Option<&ShotRecord> {
        self.shots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShotRecord> {
        self.shots.iter()
    }

    pub fn clear(&mut self) {
        self.shots.clear();
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a ShotRecord;
    type IntoIter = std::slice::Iter<'a, ShotRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.shots.iter()
    }
}
