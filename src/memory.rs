//! An in-memory [`TaskSource`]

use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::category::Category;
use crate::mock_behaviour::MockBehaviour;
use crate::quick_task::{NewQuickTask, QuickTask, QuickTaskId};
use crate::task::{NewTask, Task, TaskId};
use crate::traits::TaskSource;

struct Contents {
    tasks: Vec<Task>,
    categories: Vec<Category>,
    quick_tasks: Vec<QuickTask>,
}

/// A [`TaskSource`] that keeps everything in memory.
///
/// It behaves like the server would (it assigns IDs, rejects unknown IDs), and can be told to fail
/// some calls through its [`MockBehaviour`].
pub struct MemorySource {
    contents: Mutex<Contents>,
    mock_behaviour: Arc<Mutex<MockBehaviour>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::with_contents(Vec::new(), Vec::new(), Vec::new())
    }

    pub fn with_contents(tasks: Vec<Task>, categories: Vec<Category>, quick_tasks: Vec<QuickTask>) -> Self {
        Self {
            contents: Mutex::new(Contents { tasks, categories, quick_tasks }),
            mock_behaviour: Arc::new(Mutex::new(MockBehaviour::new())),
        }
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self::with_contents(tasks, Vec::new(), Vec::new())
    }

    /// Share the behaviour of this source, so that it can be changed while the source is in use
    pub fn mock_behaviour(&self) -> Arc<Mutex<MockBehaviour>> {
        Arc::clone(&self.mock_behaviour)
    }

    pub async fn set_mock_behaviour(&self, behaviour: MockBehaviour) {
        *self.mock_behaviour.lock().await = behaviour;
    }

    /// Replace every task, as if they had been changed by another client
    pub async fn replace_tasks(&self, tasks: Vec<Task>) {
        self.contents.lock().await.tasks = tasks;
    }

    pub async fn replace_categories(&self, categories: Vec<Category>) {
        self.contents.lock().await.categories = categories;
    }

    pub async fn replace_quick_tasks(&self, quick_tasks: Vec<QuickTask>) {
        self.contents.lock().await.quick_tasks = quick_tasks;
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

/// The next free integer ID
fn next_task_id(tasks: &[Task]) -> TaskId {
    let max = tasks.iter()
        .filter_map(|task| match task.id() {
            TaskId::Int(i) => Some(*i),
            TaskId::Text(_) => None,
        })
        .max()
        .unwrap_or(0);
    TaskId::Int(max + 1)
}

#[async_trait]
impl TaskSource for MemorySource {
    async fn get_tasks(&self) -> Result<Vec<Task>, Box<dyn Error>> {
        self.mock_behaviour.lock().await.can_get_tasks()?;
        Ok(self.contents.lock().await.tasks.clone())
    }

    async fn get_categories(&self) -> Result<Vec<Category>, Box<dyn Error>> {
        self.mock_behaviour.lock().await.can_get_categories()?;
        Ok(self.contents.lock().await.categories.clone())
    }

    async fn get_quick_tasks(&self) -> Result<Vec<QuickTask>, Box<dyn Error>> {
        self.mock_behaviour.lock().await.can_get_quick_tasks()?;
        Ok(self.contents.lock().await.quick_tasks.clone())
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<Task, Box<dyn Error>> {
        self.mock_behaviour.lock().await.can_create_task()?;
        let mut contents = self.contents.lock().await;
        let task = Task::from_new(next_task_id(&contents.tasks), new_task);
        contents.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: &Task) -> Result<Task, Box<dyn Error>> {
        self.mock_behaviour.lock().await.can_update_task()?;
        let mut contents = self.contents.lock().await;
        match contents.tasks.iter_mut().find(|t| t.id() == task.id()) {
            None => Err(format!("No task with ID {}", task.id()).into()),
            Some(stored) => {
                *stored = task.clone();
                Ok(task.clone())
            },
        }
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), Box<dyn Error>> {
        self.mock_behaviour.lock().await.can_delete_task()?;
        let mut contents = self.contents.lock().await;
        let n_before = contents.tasks.len();
        contents.tasks.retain(|t| t.id() != id);
        if contents.tasks.len() == n_before {
            return Err(format!("No task with ID {}", id).into());
        }
        Ok(())
    }

    async fn create_quick_task(&self, new_quick_task: &NewQuickTask) -> Result<QuickTask, Box<dyn Error>> {
        self.mock_behaviour.lock().await.can_create_quick_task()?;
        let mut contents = self.contents.lock().await;
        let id = contents.quick_tasks.iter().map(|q| q.id()).max().unwrap_or(0) + 1;
        let quick_task = QuickTask::from_new(id, new_quick_task);
        contents.quick_tasks.push(quick_task.clone());
        Ok(quick_task)
    }

    async fn delete_quick_task(&self, id: QuickTaskId) -> Result<(), Box<dyn Error>> {
        self.mock_behaviour.lock().await.can_delete_quick_task()?;
        let mut contents = self.contents.lock().await;
        let n_before = contents.quick_tasks.len();
        contents.quick_tasks.retain(|q| q.id() != id);
        if contents.quick_tasks.len() == n_before {
            return Err(format!("No quick task with ID {}", id).into());
        }
        Ok(())
    }
}
