//! What the dashboard shows, derived from a [`Snapshot`]

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::board::{self, StatusBoard};
use crate::quick_task::{QuickTask, QuickTaskId, QuickTaskKind};
use crate::session::Session;
use crate::stats::Stats;
use crate::store::Snapshot;
use crate::task::Task;

/// How many tasks the reminders widget lists
pub const REMINDER_LIMIT: usize = 5;

/// Every widget of the dashboard.
///
/// This is rebuilt from scratch whenever the snapshot changes, it is never updated in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub greeting: String,
    pub stats: Stats,
    pub board: StatusBoard,
    /// Monthly goals
    pub goals: Vec<QuickTask>,
    /// Quick tasks for today
    pub quick_tasks: Vec<QuickTask>,
    /// The tasks that are due first
    pub reminders: Vec<Task>,
}

impl Dashboard {
    pub fn build(snapshot: &Snapshot, session: &Session, now: DateTime<Utc>) -> Self {
        Self {
            greeting: session.greeting(),
            stats: snapshot.stats_at(now),
            board: snapshot.board(),
            goals: snapshot.quick_tasks_of(QuickTaskKind::Month).cloned().collect(),
            quick_tasks: snapshot.quick_tasks_of(QuickTaskKind::Day).cloned().collect(),
            reminders: board::upcoming(snapshot.tasks(), REMINDER_LIMIT),
        }
    }

    /// Monthly goals that are completed, and the total number of goals
    pub fn goal_progress(&self) -> (usize, usize) {
        let completed = self.goals.iter().filter(|goal| goal.completed()).count();
        (completed, self.goals.len())
    }
}


/// Quick tasks the user has ticked, before they are deleted in bulk
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<QuickTaskId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an unselected quick task, or unselect a selected one.
    /// Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: QuickTaskId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn is_selected(&self, id: QuickTaskId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The selected IDs, in increasing order
    pub fn ids(&self) -> Vec<QuickTaskId> {
        self.ids.iter().copied().collect()
    }

    /// Forget the selected IDs that are not in `quick_tasks` anymore
    pub fn retain_existing(&mut self, quick_tasks: &[QuickTask]) {
        self.ids.retain(|id| quick_tasks.iter().any(|q| q.id() == *id));
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;
    use crate::status::TaskStatus;
    use crate::store::Store;
    use chrono::{NaiveDate, TimeZone};
    use url::Url;

    fn session(username: Option<&str>) -> Session {
        let session = Session::new(Url::parse("http://127.0.0.1:8000/api/").unwrap(), "token");
        match username {
            Some(name) => session.with_username(name),
            None => session,
        }
    }

    #[tokio::test]
    async fn dashboard_from_snapshot() {
        let tasks = (1..=7i64)
            .map(|day| {
                let status = if day % 2 == 0 { TaskStatus::Done } else { TaskStatus::Todo };
                Task::new(day, format!("task {}", day))
                    .with_due_date(NaiveDate::from_ymd_opt(2024, 5, (8 - day) as u32).unwrap())
                    .with_status(status)
            })
            .collect();
        let quick_tasks = vec![
            QuickTask::new(1, "read a book", QuickTaskKind::Month).with_completed(true),
            QuickTask::new(2, "water plants", QuickTaskKind::Day),
            QuickTask::new(3, "run 100km", QuickTaskKind::Month),
        ];
        let store = Store::new(MemorySource::with_contents(tasks, Vec::new(), quick_tasks));
        store.refresh().await.unwrap();

        let now = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();
        let dashboard = Dashboard::build(&*store.snapshot().await, &session(Some("ana")), now);

        assert_eq!(dashboard.greeting, "Welcome ana!");
        assert_eq!(dashboard.stats.total_count, 7);
        assert_eq!(dashboard.stats.count_by_status.done, 3);
        assert_eq!(dashboard.board.column(TaskStatus::Todo).len(), 4);
        assert_eq!(dashboard.goal_progress(), (1, 2));
        assert_eq!(dashboard.quick_tasks.len(), 1);

        let reminders: Vec<String> = dashboard.reminders.iter().map(|t| t.title().to_string()).collect();
        assert_eq!(reminders, vec!["task 7", "task 6", "task 5", "task 4", "task 3"]);
    }

    #[test]
    fn guest_greeting() {
        let dashboard = Dashboard::build(&Snapshot::default(), &session(None), Utc::now());
        assert_eq!(dashboard.greeting, "Welcome Guest!");
        assert!(dashboard.reminders.is_empty());
        assert_eq!(dashboard.stats, Stats::default());
    }

    #[test]
    fn selection() {
        let mut selection = Selection::new();
        assert!(selection.toggle(4));
        assert!(selection.toggle(2));
        assert!(selection.is_selected(4));
        assert_eq!(selection.ids(), vec![2, 4]);

        assert_eq!(selection.toggle(4), false);
        assert_eq!(selection.len(), 1);

        selection.retain_existing(&[QuickTask::new(3, "x", QuickTaskKind::Day)]);
        assert!(selection.is_empty());

        selection.toggle(3);
        selection.clear();
        assert!(selection.is_empty());
    }
}
