//! Mock implementations for testing.
//!
//! Provides an in-memory [`TaskRepository`] whose saves can be made to fail.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{Result, TaskerError};
use crate::store::{sort_newest_first, TaskRepository};
use crate::task::{NewTask, Task, TaskId};

/// In-memory task repository.
///
/// # Example
///
/// ```rust,ignore
/// let repo = MockTaskRepository::new().with_failing_saves();
/// let mut service = TaskService::new(repo);
/// assert!(service.add_task("A", None).await.is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockTaskRepository {
    tasks: Vec<Task>,
    next_id: TaskId,
    fail_saves: bool,
    fixed_time: Option<DateTime<Utc>>,
    save_count: usize,
}

impl Default for MockTaskRepository {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: TaskId::FIRST,
            fail_saves: false,
            fixed_time: None,
            save_count: 0,
        }
    }
}

impl MockTaskRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with tasks; the counter continues after the largest id.
    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.next_id = tasks
            .iter()
            .map(|t| t.id)
            .max()
            .and_then(TaskId::next)
            .unwrap_or(TaskId::FIRST);
        self.tasks = tasks;
        self
    }

    /// Make every mutation fail as if the disk write failed.
    #[must_use]
    pub fn with_failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Stamp created tasks with a fixed time instead of the clock.
    #[must_use]
    pub fn with_fixed_time(mut self, time: DateTime<Utc>) -> Self {
        self.fixed_time = Some(time);
        self
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if no tasks are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn save(&mut self) -> Result<()> {
        if self.fail_saves {
            return Err(TaskerError::persist(
                "mock://tasks.txt",
                std::io::Error::other("simulated write failure"),
            ));
        }
        self.save_count += 1;
        Ok(())
    }

    fn find_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Task>> {
        let mut tasks = self.tasks.clone();
        sort_newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn create(&mut self, task: NewTask) -> Result<TaskId> {
        let id = self.next_id;
        let following = id
            .next()
            .ok_or_else(|| anyhow::anyhow!("Task id space exhausted at {id}"))?;
        self.save()?;
        self.next_id = following;
        self.tasks.push(Task {
            id,
            title: task.title,
            description: task.description,
            is_completed: false,
            created_at: self.fixed_time.unwrap_or_else(Utc::now),
        });
        Ok(id)
    }

    async fn update(&mut self, task: &Task) -> Result<bool> {
        if self.find_mut(task.id).is_none() {
            return Ok(false);
        }
        self.save()?;
        if let Some(existing) = self.find_mut(task.id) {
            existing.title = task.title.clone();
            existing.description = task.description.clone();
            existing.is_completed = task.is_completed;
        }
        Ok(true)
    }

    async fn delete(&mut self, id: TaskId) -> Result<bool> {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        self.save()?;
        self.tasks.remove(idx);
        Ok(true)
    }

    async fn set_completion(&mut self, id: TaskId, completed: bool) -> Result<bool> {
        if self.find_mut(id).is_none() {
            return Ok(false);
        }
        self.save()?;
        if let Some(existing) = self.find_mut(id) {
            existing.is_completed = completed;
        }
        Ok(true)
    }
}
