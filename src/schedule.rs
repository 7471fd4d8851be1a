//! A planner for the hours of a single day

use std::error::Error;

use chrono::NaiveTime;
use uuid::Uuid;

/// An activity, from `start` (included) to `end` (excluded)
#[derive(Clone, Debug, PartialEq)]
pub struct TimeInterval {
    id: Uuid,
    start: NaiveTime,
    end: NaiveTime,
    activity: String,
}

impl TimeInterval {
    pub fn id(&self) -> Uuid { self.id }
    pub fn start(&self) -> NaiveTime { self.start }
    pub fn end(&self) -> NaiveTime { self.end }
    pub fn activity(&self) -> &str { &self.activity }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Whether both intervals share some time
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The intervals planned for a day. This is not saved anywhere.
///
/// Intervals may overlap.
#[derive(Clone, Debug, Default)]
pub struct DaySchedule {
    intervals: Vec<TimeInterval>,
}

impl DaySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan an activity, and return the ID it has been given
    pub fn add<S: ToString>(&mut self, start: NaiveTime, end: NaiveTime, activity: S) -> Result<Uuid, Box<dyn Error>> {
        let activity = activity.to_string();
        if activity.trim().is_empty() {
            return Err("An activity must be named".into());
        }
        if end <= start {
            return Err(format!("Invalid interval: {} does not come after {}", end, start).into());
        }

        let interval = TimeInterval { id: Uuid::new_v4(), start, end, activity };
        let id = interval.id;
        log::debug!("Scheduling {:?}", interval);

        let position = self.intervals.partition_point(|other| other.start <= start);
        self.intervals.insert(position, interval);
        Ok(id)
    }

    /// Remove an interval. Returns it, or `None` if there was no such interval
    pub fn remove(&mut self, id: Uuid) -> Option<TimeInterval> {
        let index = self.intervals.iter().position(|interval| interval.id == id)?;
        Some(self.intervals.remove(index))
    }

    /// Every interval, sorted by start time
    pub fn intervals(&self) -> &[TimeInterval] {
        &self.intervals
    }

    /// The intervals that are in progress at `time`
    pub fn at(&self, time: NaiveTime) -> impl Iterator<Item = &TimeInterval> {
        self.intervals.iter().filter(move |interval| interval.start <= time && time < interval.end)
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}
