//! Tasks grouped by status, and the upcoming reminders

use crate::status::TaskStatus;
use crate::task::Task;

/// The task board: one column per status, in [`TaskStatus::ALL`] order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusBoard {
    columns: [Vec<Task>; 4],
}

impl StatusBoard {
    /// Group tasks by status. Each column keeps the input order.
    pub fn group(tasks: &[Task]) -> Self {
        let mut board = Self::default();
        for task in tasks {
            board.columns[task.status().index()].push(task.clone());
        }
        board
    }

    pub fn column(&self, status: TaskStatus) -> &[Task] {
        &self.columns[status.index()]
    }

    /// Every column with its status, including the empty ones
    pub fn columns(&self) -> impl Iterator<Item = (TaskStatus, &[Task])> {
        let statuses: &'static [TaskStatus; 4] = &TaskStatus::ALL;
        statuses.iter()
            .map(move |status| (*status, self.column(*status)))
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(|col| col.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The `limit` tasks that are due first.
/// Tasks without a due date come last; ties keep the input order.
pub fn upcoming(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|task| (task.due_date().is_none(), task.due_datetime()));
    sorted.into_iter()
        .take(limit)
        .cloned()
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn columns_in_board_order() {
        let tasks = vec![
            Task::new(1, "a").with_status(TaskStatus::Done),
            Task::new(2, "b"),
            Task::new(3, "c").with_status(TaskStatus::Done),
            Task::new(4, "d").with_status(TaskStatus::Paused),
        ];
        let board = StatusBoard::group(&tasks);

        let layout: Vec<(TaskStatus, Vec<String>)> = board.columns()
            .map(|(status, col)| (status, col.iter().map(|t| t.title().to_string()).collect()))
            .collect();
        assert_eq!(layout, vec![
            (TaskStatus::Todo, vec!["b".to_string()]),
            (TaskStatus::Doing, vec![]),
            (TaskStatus::Done, vec!["a".to_string(), "c".to_string()]),
            (TaskStatus::Paused, vec!["d".to_string()]),
        ]);
        assert_eq!(board.len(), 4);
        assert!(StatusBoard::group(&[]).is_empty());
    }

    #[test]
    fn upcoming_sorts_by_due_date() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 4, d).unwrap();
        let tasks = vec![
            Task::new(1, "undated"),
            Task::new(2, "late").with_due_date(day(20)),
            Task::new(3, "early").with_due_date(day(2)),
            Task::new(4, "early too").with_due_date(day(2)),
            Task::new(5, "middle").with_due_date(day(9)),
        ];

        let titles: Vec<String> = upcoming(&tasks, 3).iter().map(|t| t.title().to_string()).collect();
        assert_eq!(titles, vec!["early", "early too", "middle"]);

        let all = upcoming(&tasks, 10);
        assert_eq!(all.len(), 5);
        assert_eq!(all[4].title(), "undated");
    }
}
