//! Traits used by multiple structs in this crate

use std::error::Error;

use async_trait::async_trait;

use crate::category::Category;
use crate::quick_task::{NewQuickTask, QuickTask, QuickTaskId};
use crate::task::{NewTask, Task, TaskId};

/// Somewhere tasks, categories and quick tasks can be fetched from and written to.
///
/// This is usually the remote API (see [`Client`](crate::client::Client)), but can be an in-memory
/// [`MemorySource`](crate::memory::MemorySource) for tests or offline use.
#[async_trait]
pub trait TaskSource {
    /// Returns every task of the current user
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>>;
    /// Returns every category ("family") of the current user
    async fn get_categories(&self) -> Result<Vec<Category>, Box<dyn Error>>;
    /// Returns every quick task (goals included) of the current user
    async fn get_quick_tasks(&self) -> Result<Vec<QuickTask>, Box<dyn Error>>;

    /// Create a task, and return it as stored by the source (with its ID)
    async fn create_task(&self, new_task: &NewTask) -> Result<Task, Box<dyn Error>>;
    /// Replace a task with this new version, and return the version stored by the source
    async fn update_task(&self, task: &Task) -> Result<Task, Box<dyn Error>>;
    async fn delete_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>>;

    async fn create_quick_task(&self, new_quick_task: &NewQuickTask) -> Result<QuickTask, Box<dyn Error>>;
    async fn delete_quick_task(&self, id: QuickTaskId) -> Result<(), Box<dyn Error>>;
}
