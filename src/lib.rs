//! Tasker - single-user task tracking
//!
//! Keeps a small list of tasks in a plain line-oriented file and rewrites the
//! whole file on every change.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`validation`] - Pure checks for user-supplied text
//! - [`task`] - The task data model
//! - [`store`] - Storage contract and the file-backed store
//! - [`service`] - Argument and existence checks in front of the store
//! - [`config`] - Configuration loading
//! - [`error`] - Custom error types and handling
//! - [`testing`] - In-memory repository for tests
//!
//! # Example
//!
//! ```rust,no_run
//! use tasker::{FileTaskStore, TaskService};
//!
//! # async fn run() -> tasker::Result<()> {
//! let store = FileTaskStore::open("tasks.txt").await;
//! let mut service = TaskService::new(store);
//!
//! let id = service.add_task("Buy milk", None).await?;
//! service.update_completion(id, true).await?;
//!
//! for task in service.get_all_tasks().await? {
//!     println!("{} {} {}", task.status_marker(), task.id, task.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod store;
pub mod task;
pub mod testing;
pub mod validation;

// Re-export commonly used types
pub use error::{Result, TaskerError};

pub use config::TaskerConfig;
pub use service::TaskService;
pub use store::{FileTaskStore, TaskRepository, DEFAULT_TASKS_FILE};
pub use task::{NewTask, Task, TaskId, TaskUpdate};
