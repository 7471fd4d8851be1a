//! A shared, cached view of the user's data
//!
//! Instead of every view fetching (and holding) its own copy of the tasks, a single [`Store`] fetches them,
//! keeps the latest [`Snapshot`], and tells its subscribers whenever it changes.
//!
//! Every refresh and every mutation takes a new _generation_ number. A refresh only commits its result if no
//! newer generation has started in the meantime, so that a slow, outdated response never overwrites fresher data.

use std::error::Error;
use std::fmt::Display;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::board::StatusBoard;
use crate::calendar::{MonthGrid, YearMonth};
use crate::category::Category;
use crate::quick_task::{NewQuickTask, QuickTask, QuickTaskId, QuickTaskKind};
use crate::stats::{self, Stats};
use crate::status::TaskStatus;
use crate::task::{NewTask, Task, TaskId};
use crate::traits::TaskSource;

pub mod events;
use events::{EventReceiver, EventSender, StoreEvent};

pub const FETCH_ERROR: &str = "Error fetching tasks. Please try again.";
pub const CREATE_TASK_ERROR: &str = "Error creating the task. Please try again.";
pub const UPDATE_STATUS_ERROR: &str = "Error updating task status. Please try again.";
pub const DELETE_TASK_ERROR: &str = "Error deleting task. Please try again.";
pub const CREATE_QUICK_TASK_ERROR: &str = "Error adding a new quick task. Please try again.";
pub const DELETE_QUICK_TASKS_ERROR: &str = "Failed to delete selected tasks. Please try again.";


/// An immutable copy of everything a store knows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    generation: u64,
    fetched_at: Option<DateTime<Utc>>,
    tasks: Vec<Task>,
    categories: Vec<Category>,
    quick_tasks: Vec<QuickTask>,
}

impl Snapshot {
    /// The refresh or mutation that produced this snapshot (0 if nothing has been fetched yet)
    pub fn generation(&self) -> u64 { self.generation }
    /// When the data was last fetched from the source
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> { self.fetched_at }
    pub fn tasks(&self) -> &[Task] { &self.tasks }
    pub fn categories(&self) -> &[Category] { &self.categories }
    pub fn quick_tasks(&self) -> &[QuickTask] { &self.quick_tasks }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn quick_tasks_of(&self, kind: QuickTaskKind) -> impl Iterator<Item = &QuickTask> {
        self.quick_tasks.iter().filter(move |q| q.kind() == kind)
    }

    pub fn month_grid(&self, month: YearMonth) -> MonthGrid {
        MonthGrid::build(month, &self.tasks)
    }

    pub fn stats_at(&self, now: DateTime<Utc>) -> Stats {
        stats::aggregate_at(&self.tasks, now)
    }

    pub fn board(&self) -> StatusBoard {
        StatusBoard::group(&self.tasks)
    }
}


/// What became of a refresh
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The fetched data is now the current snapshot
    Updated { generation: u64 },
    /// A newer refresh or mutation started while this one was in flight. Its data has been discarded.
    Superseded { generation: u64 },
}


/// A shared cache in front of a [`TaskSource`]
pub struct Store<S> {
    source: S,
    snapshot: RwLock<Arc<Snapshot>>,
    latest_generation: AtomicU64,
    events: EventSender,
}

impl<S> Store<S>
where
    S: TaskSource + Send + Sync,
{
    /// Create an empty store. Nothing is fetched until [`Store::refresh`] is called.
    pub fn new(source: S) -> Self {
        let (events, _) = events::event_channel();
        Self {
            source,
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            latest_generation: AtomicU64::new(0),
            events,
        }
    }

    pub fn source(&self) -> &S { &self.source }

    /// The current data. This never waits for the network.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Get notified of every change. The receiver immediately holds the latest event.
    pub fn subscribe(&self) -> EventReceiver {
        self.events.subscribe()
    }

    /// The event subscribers have last been sent
    pub fn last_event(&self) -> StoreEvent {
        self.events.borrow().clone()
    }

    /// Discard the results of every refresh currently in flight
    pub fn invalidate(&self) -> u64 {
        let generation = self.next_generation();
        log::debug!("Store invalidated (#{})", generation);
        generation
    }

    fn next_generation(&self) -> u64 {
        self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.latest_generation.load(Ordering::SeqCst) == generation
    }

    fn publish(&self, event: StoreEvent) {
        log::trace!("Store event: {:?}", event);
        self.events.send_replace(event);
    }

    fn fail(&self, message: &str, cause: &dyn Display) {
        log::error!("{} ({})", message, cause);
        let generation = self.latest_generation.load(Ordering::SeqCst);
        self.publish(StoreEvent::Failed { generation, message: message.to_string() });
    }

    /// Fetch tasks, categories and quick tasks (concurrently), and make them the current snapshot.
    ///
    /// In case of an error, the previous snapshot is kept and subscribers get a [`StoreEvent::Failed`].
    /// Nothing is retried.
    pub async fn refresh(&self) -> Result<RefreshOutcome, Box<dyn Error>> {
        let generation = self.next_generation();
        log::debug!("Starting refresh #{}", generation);
        self.publish(StoreEvent::Loading { generation });

        let fetched = tokio::try_join!(
            self.source.get_tasks(),
            self.source.get_categories(),
            self.source.get_quick_tasks(),
        );
        let (tasks, categories, quick_tasks) = match fetched {
            Ok(fetched) => fetched,
            Err(err) => {
                if self.is_latest(generation) {
                    self.fail(FETCH_ERROR, &err);
                } else {
                    log::warn!("Outdated refresh #{} failed: {}", generation, err);
                }
                return Err(err);
            },
        };

        Ok(self.commit(generation, tasks, categories, quick_tasks).await)
    }

    async fn commit(&self, generation: u64, tasks: Vec<Task>, categories: Vec<Category>, quick_tasks: Vec<QuickTask>) -> RefreshOutcome {
        let mut current = self.snapshot.write().await;
        if self.is_latest(generation) == false {
            log::debug!("Discarding the result of refresh #{}, a newer generation has started", generation);
            return RefreshOutcome::Superseded { generation };
        }

        log::info!("Refresh #{}: {} tasks, {} categories, {} quick tasks", generation, tasks.len(), categories.len(), quick_tasks.len());
        *current = Arc::new(Snapshot {
            generation,
            fetched_at: Some(Utc::now()),
            tasks,
            categories,
            quick_tasks,
        });
        drop(current);

        self.publish(StoreEvent::Updated { generation });
        RefreshOutcome::Updated { generation }
    }

    /// Apply a local change to the current snapshot, as a new generation
    async fn apply<F>(&self, change: F) -> u64
    where
        F: FnOnce(&mut Snapshot),
    {
        let generation = self.next_generation();
        let mut current = self.snapshot.write().await;
        let mut next = Snapshot::clone(&current);
        change(&mut next);
        next.generation = generation;
        *current = Arc::new(next);
        drop(current);

        self.publish(StoreEvent::Updated { generation });
        generation
    }

    pub async fn create_task(&self, new_task: &NewTask) -> Result<Task, Box<dyn Error>> {
        let created = match self.source.create_task(new_task).await {
            Ok(task) => task,
            Err(err) => {
                self.fail(CREATE_TASK_ERROR, &err);
                return Err(err);
            },
        };

        // A refresh may have fetched it already
        let stored = created.clone();
        self.apply(move |snapshot| {
            match snapshot.tasks.iter_mut().find(|task| task.id() == stored.id()) {
                Some(task) => *task = stored,
                None => snapshot.tasks.push(stored),
            }
        }).await;
        Ok(created)
    }

    /// Change the status of a known task.
    /// The whole task is sent to the source, and replaced by the version it sends back.
    pub async fn set_task_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task, Box<dyn Error>> {
        let mut task = match self.snapshot().await.task(id) {
            Some(task) => task.clone(),
            None => {
                let err = format!("Task not found: {}", id);
                self.fail(UPDATE_STATUS_ERROR, &err);
                return Err(err.into());
            },
        };
        task.set_status(status);

        let updated = match self.source.update_task(&task).await {
            Ok(task) => task,
            Err(err) => {
                self.fail(UPDATE_STATUS_ERROR, &err);
                return Err(err);
            },
        };

        let stored = updated.clone();
        self.apply(move |snapshot| {
            for task in snapshot.tasks.iter_mut() {
                if task.id() == stored.id() {
                    *task = stored.clone();
                }
            }
        }).await;
        Ok(updated)
    }

    pub async fn delete_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        if let Err(err) = self.source.delete_task(id).await {
            self.fail(DELETE_TASK_ERROR, &err);
            return Err(err);
        }

        self.apply(|snapshot| snapshot.tasks.retain(|task| task.id() != id)).await;
        Ok(())
    }

    pub async fn create_quick_task(&self, new_quick_task: &NewQuickTask) -> Result<QuickTask, Box<dyn Error>> {
        let created = match self.source.create_quick_task(new_quick_task).await {
            Ok(quick_task) => quick_task,
            Err(err) => {
                self.fail(CREATE_QUICK_TASK_ERROR, &err);
                return Err(err);
            },
        };

        let stored = created.clone();
        self.apply(move |snapshot| {
            match snapshot.quick_tasks.iter_mut().find(|q| q.id() == stored.id()) {
                Some(quick_task) => *quick_task = stored,
                None => snapshot.quick_tasks.push(stored),
            }
        }).await;
        Ok(created)
    }

    /// Delete quick tasks one after the other, stopping at the first failure.
    ///
    /// Returns how many have been deleted. In case of a failure, those deleted before it are removed from the snapshot anyway.
    pub async fn delete_quick_tasks(&self, ids: &[QuickTaskId]) -> Result<usize, Box<dyn Error>> {
        let mut deleted = Vec::new();
        let mut failure = None;
        for id in ids {
            match self.source.delete_quick_task(*id).await {
                Ok(()) => deleted.push(*id),
                Err(err) => {
                    failure = Some(format!("Unable to delete quick task {}: {}", id, err));
                    break;
                },
            }
        }

        if deleted.is_empty() == false {
            let removed = deleted.clone();
            self.apply(move |snapshot| snapshot.quick_tasks.retain(|q| removed.contains(&q.id()) == false)).await;
        }

        match failure {
            None => Ok(deleted.len()),
            Some(err) => {
                self.fail(DELETE_QUICK_TASKS_ERROR, &err);
                Err(err.into())
            },
        }
    }
}
