//! Task statuses, and sets of them

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use bitflags::bitflags;

/// The progress of a [`Task`](crate::Task).
///
/// This is a closed set. The server sends (and expects) the upper-case names, e.g. `"DOING"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
    Paused,
}

impl TaskStatus {
    /// Every status, in the order the task board displays its columns
    pub const ALL: [TaskStatus; 4] = [TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done, TaskStatus::Paused];

    /// Position of this status in [`TaskStatus::ALL`]
    pub fn index(&self) -> usize {
        match self {
            TaskStatus::Todo => 0,
            TaskStatus::Doing => 1,
            TaskStatus::Done => 2,
            TaskStatus::Paused => 3,
        }
    }

    /// The wire name of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::Doing => "DOING",
            TaskStatus::Done => "DONE",
            TaskStatus::Paused => "PAUSED",
        }
    }

    /// Column title on the task board
    pub fn title(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::Doing => "Doing",
            TaskStatus::Done => "Done",
            TaskStatus::Paused => "Paused",
        }
    }

    /// Color token used to outline the cards of this column
    pub fn accent_color(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "border-red-500",
            TaskStatus::Doing => "border-purple-500",
            TaskStatus::Done => "border-green-500",
            TaskStatus::Paused => "border-blue-500",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    /// Parses a wire name, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL.iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown task status {:?} (expected one of TODO, DOING, DONE, PAUSED)", s))
    }
}


bitflags! {
    /// A set of statuses, used to filter tasks
    pub struct StatusSet: u8 {
        const TODO = 1;
        const DOING = 2;
        const DONE = 4;
        const PAUSED = 8;

        /// Tasks that are not on hold
        const ACTIVE = Self::TODO.bits | Self::DOING.bits | Self::DONE.bits;
        /// Tasks that are not finished yet
        const REMAINING = Self::TODO.bits | Self::DOING.bits | Self::PAUSED.bits;
    }
}

impl StatusSet {
    pub fn contains_status(&self, status: TaskStatus) -> bool {
        self.contains(StatusSet::from(status))
    }
}

impl From<TaskStatus> for StatusSet {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => StatusSet::TODO,
            TaskStatus::Doing => StatusSet::DOING,
            TaskStatus::Done => StatusSet::DONE,
            TaskStatus::Paused => StatusSet::PAUSED,
        }
    }
}
