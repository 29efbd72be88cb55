//! Task service.
//!
//! [`TaskService`] is the entry point for front ends. It checks arguments and
//! task existence before handing work to a [`TaskRepository`], so callers get
//! a distinct [`TaskerError::NotFound`] instead of a bare `false`.
//!
//! Length limits are not enforced here; front ends check them with
//! [`crate::validation`] before calling in.

use tracing::debug;

use crate::error::{Result, TaskerError};
use crate::store::TaskRepository;
use crate::task::{NewTask, Task, TaskId, TaskUpdate};

/// Service layer over a task repository.
#[derive(Debug)]
pub struct TaskService<R> {
    repository: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Create a service that owns `repository`.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Borrow the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Add a task and return its id.
    ///
    /// Title and description are trimmed; a missing description is stored as
    /// an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`TaskerError::InvalidArgument`] if the title is blank, or a
    /// storage error if the task could not be saved.
    pub async fn add_task(&mut self, title: &str, description: Option<&str>) -> Result<TaskId> {
        let title = non_blank_title(title)?;
        let description = description.map(str::trim).unwrap_or_default();
        self.repository
            .create(NewTask::new(title, description))
            .await
    }

    /// All tasks, newest first.
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>> {
        self.repository.get_all().await
    }

    /// Look up a single task.
    pub async fn get_task(&self, id: TaskId) -> Result<Option<Task>> {
        self.repository.get_by_id(id).await
    }

    /// Mark a task completed or not completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskerError::NotFound`] if no task has this id.
    pub async fn update_completion(&mut self, id: TaskId, completed: bool) -> Result<bool> {
        self.require(id).await?;
        self.repository.set_completion(id, completed).await
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskerError::NotFound`] if no task has this id.
    pub async fn delete_task(&mut self, id: TaskId) -> Result<bool> {
        self.require(id).await?;
        self.repository.delete(id).await
    }

    /// Edit title, description and/or completion of a task.
    ///
    /// A given title must not be blank; given values are trimmed. An empty
    /// update still checks that the task exists but writes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskerError::NotFound`] if no task has this id and
    /// [`TaskerError::InvalidArgument`] for a blank title.
    pub async fn update_task(&mut self, id: TaskId, update: TaskUpdate) -> Result<bool> {
        let existing = self.require(id).await?;

        let mut normalized = TaskUpdate::new();
        if let Some(title) = update.title.as_deref() {
            normalized = normalized.with_title(non_blank_title(title)?);
        }
        if let Some(description) = update.description.as_deref() {
            normalized = normalized.with_description(description.trim());
        }
        normalized.is_completed = update.is_completed;

        if normalized.is_empty() {
            debug!("Nothing to update for task {}", id);
            return Ok(true);
        }

        let updated = normalized.apply_to(&existing);
        self.repository.update(&updated).await
    }

    async fn require(&self, id: TaskId) -> Result<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| TaskerError::not_found(id))
    }
}

fn non_blank_title(title: &str) -> Result<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskerError::invalid_argument("Task title must not be empty"));
    }
    Ok(trimmed)
}
