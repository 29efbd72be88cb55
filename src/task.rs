//! Task data model.
//!
//! - [`TaskId`] - Positive identifier assigned by the store
//! - [`Task`] - A stored task record
//! - [`NewTask`] - Title and description handed to the store on creation
//! - [`TaskUpdate`] - Partial edit applied by the service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

// ============================================================================
// Task ID
// ============================================================================

/// Unique, strictly positive identifier of a task.
///
/// Ids are handed out by the store in increasing order and are never reused
/// while the store is open.
///
/// # Example
///
/// ```
/// use tasker::TaskId;
///
/// let id = TaskId::new(3).unwrap();
/// assert_eq!(id.get(), 3);
/// assert!(TaskId::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(NonZeroU32);

impl TaskId {
    /// The id given to the first task of an empty store.
    pub const FIRST: TaskId = TaskId(NonZeroU32::MIN);

    /// Create an id, returning `None` for zero.
    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Get the raw value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// The id that follows this one, or `None` on overflow.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Task
// ============================================================================

/// A stored task.
///
/// `id` and `created_at` are set once by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Marker shown in front of the task in listings.
    #[must_use]
    pub fn status_marker(&self) -> &'static str {
        if self.is_completed {
            "[✓]"
        } else {
            "[ ]"
        }
    }
}

// ============================================================================
// Drafts and edits
// ============================================================================

/// Fields supplied by the caller when creating a task.
///
/// The store fills in the id, the creation time and `is_completed = false`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

impl NewTask {
    /// Create a new draft.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Partial edit of an existing task. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

impl TaskUpdate {
    /// Create an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the completion flag.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.is_completed = Some(completed);
        self
    }

    /// Returns true if the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_completed.is_none()
    }

    /// Apply the update to a copy of `task`.
    #[must_use]
    pub fn apply_to(&self, task: &Task) -> Task {
        let mut updated = task.clone();
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(description) = &self.description {
            updated.description = description.clone();
        }
        if let Some(completed) = self.is_completed {
            updated.is_completed = completed;
        }
        updated
    }
}
