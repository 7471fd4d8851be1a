//! Summary statistics over a set of tasks

use std::ops::{Index, IndexMut};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::status::{StatusSet, TaskStatus};
use crate::task::Task;

const MILLISECONDS_PER_DAY: f64 = 24. * 3600. * 1000.;

/// How many tasks have each status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
    pub paused: usize,
}

impl StatusCounts {
    pub fn count(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            counts[task.status()] += 1;
        }
        counts
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        self[status]
    }

    /// How many tasks have any of the statuses in `set`
    pub fn matching(&self, set: StatusSet) -> usize {
        TaskStatus::ALL.iter()
            .filter(|status| set.contains_status(**status))
            .map(|status| self.get(*status))
            .sum()
    }

    pub fn total(&self) -> usize {
        self.matching(StatusSet::all())
    }
}

impl Index<TaskStatus> for StatusCounts {
    type Output = usize;

    fn index(&self, status: TaskStatus) -> &usize {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::Doing => &self.doing,
            TaskStatus::Done => &self.done,
            TaskStatus::Paused => &self.paused,
        }
    }
}

impl IndexMut<TaskStatus> for StatusCounts {
    fn index_mut(&mut self, status: TaskStatus) -> &mut usize {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::Doing => &mut self.doing,
            TaskStatus::Done => &mut self.done,
            TaskStatus::Paused => &mut self.paused,
        }
    }
}


/// Derived counters, as shown by the dashboard widgets.
///
/// Percentages and day counts are kept as raw floating-point values; see [`Stats::format_percentage`] and [`Stats::format_margin`] for display.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Stats {
    pub count_by_status: StatusCounts,
    pub total_count: usize,
    /// In `[0, 100]`. Zero when there are no tasks.
    pub completion_percentage: f64,
    /// Tasks that are not done
    pub remaining_count: usize,
    /// Tasks that are not paused
    pub active_count: usize,
    /// Days elapsed since the latest due date among the tasks (negative if it is in the future).
    /// Zero when no task has a due date.
    pub margin_days: f64,
}

impl Stats {
    /// e.g. `"66.7%"`
    pub fn format_percentage(&self) -> String {
        format!("{:.1}%", self.completion_percentage)
    }

    /// e.g. `"3.5d"`
    pub fn format_margin(&self) -> String {
        format!("{:.1}d", self.margin_days)
    }
}

/// Compute the statistics of a set of tasks, as of now
pub fn aggregate(tasks: &[Task]) -> Stats {
    aggregate_at(tasks, Utc::now())
}

/// Compute the statistics of a set of tasks, as of `now`.
///
/// This never fails: an empty input gives all-zero statistics.
pub fn aggregate_at(tasks: &[Task], now: DateTime<Utc>) -> Stats {
    let count_by_status = StatusCounts::count(tasks);
    let total_count = tasks.len();

    let completion_percentage = if total_count == 0 {
        0.
    } else {
        count_by_status.done as f64 / total_count as f64 * 100.
    };

    let latest = tasks.iter()
        .filter_map(|task| task.due_datetime())
        .max();
    let margin_days = match latest {
        None => 0.,
        Some(latest) => {
            let elapsed = now.naive_utc().signed_duration_since(latest);
            elapsed.num_milliseconds() as f64 / MILLISECONDS_PER_DAY
        },
    };

    Stats {
        count_by_status,
        total_count,
        completion_percentage,
        remaining_count: count_by_status.matching(StatusSet::REMAINING),
        active_count: count_by_status.matching(StatusSet::ACTIVE),
        margin_days,
    }
}
