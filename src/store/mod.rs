//! Task storage.
//!
//! [`TaskRepository`] is the storage contract the service talks to.
//! [`FileTaskStore`] implements it on top of a single line-oriented file
//! (see [`format`]) holding the whole collection.
//!
//! # Persistence
//!
//! Every mutation rewrites the entire file:
//! - The next collection is built off to the side
//! - It is written to `<file>.tmp`, synced, and renamed over `<file>`
//! - Only then does the in-memory collection change
//!
//! The id counter is kept next to the task file in `<file>.next`, so ids
//! stay unique across runs even after the newest task is deleted.
//!
//! A failed write therefore leaves both the file and the in-memory state as
//! they were before the call.

pub mod format;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::{Result, TaskerError};
use crate::task::{NewTask, Task, TaskId};

/// Default task file name.
pub const DEFAULT_TASKS_FILE: &str = "tasks.txt";

/// Temporary file suffix for atomic writes.
const TMP_SUFFIX: &str = ".tmp";

/// Suffix of the copy kept when a task file cannot be loaded.
const CORRUPT_SUFFIX: &str = ".corrupt";

/// Suffix of the file holding the id counter.
const NEXT_ID_SUFFIX: &str = ".next";

/// Storage contract for tasks.
///
/// Operations run one at a time against a single owner; mutating methods
/// take `&mut self` and nothing is locked internally.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Look a task up by id.
    async fn get_by_id(&self, id: TaskId) -> Result<Option<Task>>;

    /// All tasks, newest first.
    async fn get_all(&self) -> Result<Vec<Task>>;

    /// Store a new task and return the id assigned to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    async fn create(&mut self, task: NewTask) -> Result<TaskId>;

    /// Overwrite title, description and completion of the task with the same
    /// id. Returns `false` if there is no such task.
    async fn update(&mut self, task: &Task) -> Result<bool>;

    /// Remove a task. Returns `false` if there is no such task.
    async fn delete(&mut self, id: TaskId) -> Result<bool>;

    /// Set the completion flag. Returns `false` if there is no such task.
    async fn set_completion(&mut self, id: TaskId, completed: bool) -> Result<bool>;
}

/// Orders tasks newest first; equal timestamps put the higher id first.
pub(crate) fn sort_newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

// ============================================================================
// File-backed store
// ============================================================================

/// Task store backed by one flat file.
///
/// Owns the collection and the id counter exclusively; callers only ever get
/// clones of stored tasks.
#[derive(Debug)]
pub struct FileTaskStore {
    /// Location of the task file.
    path: PathBuf,

    /// Tasks in insertion order.
    tasks: Vec<Task>,

    /// Id handed to the next created task.
    next_id: TaskId,
}

impl FileTaskStore {
    /// Open the store at `path`, loading any tasks already saved there.
    ///
    /// Never fails. A missing file gives an empty store. An unreadable or
    /// malformed file also gives an empty store: a warning is logged and the
    /// file is copied to `<file>.corrupt` (or `<file>.corrupt.N` when an
    /// older, different backup exists) before anything overwrites it.
    ///
    /// The id counter resumes at the larger of the saved counter and the
    /// highest loaded id plus one.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tasks = match Self::load(&path).await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(
                    "Failed to load tasks from {}: {}. Starting with an empty list.",
                    path.display(),
                    e
                );
                Self::preserve_unreadable(&path).await;
                Vec::new()
            }
        };

        let after_loaded = tasks
            .iter()
            .map(|t| t.id)
            .max()
            .and_then(TaskId::next)
            .unwrap_or(TaskId::FIRST);
        let next_id = Self::load_next_id(&path)
            .await
            .map_or(after_loaded, |saved| saved.max(after_loaded));

        debug!(
            "Loaded {} tasks from {} (next id {})",
            tasks.len(),
            path.display(),
            next_id
        );

        Self {
            path,
            tasks,
            next_id,
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the temporary file used while saving.
    #[must_use]
    pub fn tmp_file_path(&self) -> PathBuf {
        suffixed(&self.path, TMP_SUFFIX)
    }

    /// Number of stored tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Path of the file holding the id counter.
    #[must_use]
    pub fn next_id_path(&self) -> PathBuf {
        suffixed(&self.path, NEXT_ID_SUFFIX)
    }

    /// Id the next created task will receive.
    #[must_use]
    pub fn next_id(&self) -> TaskId {
        self.next_id
    }

    // ------------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------------

    async fn load(path: &Path) -> Result<Vec<Task>> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        format::parse_tasks(&content)
    }

    async fn load_next_id(path: &Path) -> Option<TaskId> {
        let counter_path = suffixed(path, NEXT_ID_SUFFIX);
        let content = match tokio::fs::read_to_string(&counter_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read id counter {}: {}", counter_path.display(), e);
                return None;
            }
        };

        let parsed = content.trim().parse::<u32>().ok().and_then(TaskId::new);
        if parsed.is_none() {
            warn!(
                "Ignoring malformed id counter {}: '{}'",
                counter_path.display(),
                content.trim()
            );
        }
        parsed
    }

    /// Copy an unreadable task file aside, never overwriting an older backup.
    async fn preserve_unreadable(path: &Path) {
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                warn!("Could not back up {}: {}", path.display(), e);
                return;
            }
        };

        for n in 0u32.. {
            let backup = backup_path(path, n);
            match tokio::fs::read(&backup).await {
                Ok(existing) if existing == content => {
                    debug!("Unreadable file already backed up at {}", backup.display());
                    return;
                }
                Ok(_) => continue,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    if let Err(e) = tokio::fs::write(&backup, &content).await {
                        warn!("Could not back up {}: {}", path.display(), e);
                    } else {
                        warn!("Kept a copy of the unreadable file at {}", backup.display());
                    }
                    return;
                }
                Err(e) => {
                    warn!("Could not back up {}: {}", path.display(), e);
                    return;
                }
            }
        }
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Write `tasks` and the counter to disk and, once that succeeded, make
    /// them current.
    async fn commit(&mut self, tasks: Vec<Task>, next_id: TaskId) -> Result<()> {
        self.persist(&tasks, next_id)
            .await
            .map_err(|e| TaskerError::persist(&self.path, e))?;
        self.tasks = tasks;
        self.next_id = next_id;
        Ok(())
    }

    async fn persist(&self, tasks: &[Task], next_id: TaskId) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.tmp_file_path();
        let content = format::render_tasks(tasks);

        let mut tmp_file = tokio::fs::File::create(&tmp_path).await?;
        tmp_file.write_all(content.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        // Counter goes first: a crash in between only skips ids.
        let counter_path = self.next_id_path();
        let counter_tmp = suffixed(&counter_path, TMP_SUFFIX);
        tokio::fs::write(&counter_tmp, format!("{next_id}\n")).await?;
        tokio::fs::rename(&counter_tmp, &counter_path).await?;

        tokio::fs::rename(&tmp_path, &self.path).await?;
        debug!("Saved {} tasks to {}", tasks.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FileTaskStore {
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

        let mut tasks = self.tasks.clone();
        tasks.push(Task {
            id,
            title: task.title,
            description: task.description,
            is_completed: false,
            created_at: Utc::now(),
        });

        self.commit(tasks, following).await?;
        info!("Created task {}", id);
        Ok(id)
    }

    async fn update(&mut self, task: &Task) -> Result<bool> {
        let Some(idx) = self.position(task.id) else {
            return Ok(false);
        };

        let mut tasks = self.tasks.clone();
        let existing = &mut tasks[idx];
        existing.title = task.title.clone();
        existing.description = task.description.clone();
        existing.is_completed = task.is_completed;

        self.commit(tasks, self.next_id).await?;
        info!("Updated task {}", task.id);
        Ok(true)
    }

    async fn delete(&mut self, id: TaskId) -> Result<bool> {
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };

        let mut tasks = self.tasks.clone();
        tasks.remove(idx);

        self.commit(tasks, self.next_id).await?;
        info!("Deleted task {}", id);
        Ok(true)
    }

    async fn set_completion(&mut self, id: TaskId, completed: bool) -> Result<bool> {
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };

        let mut tasks = self.tasks.clone();
        tasks[idx].is_completed = completed;

        self.commit(tasks, self.next_id).await?;
        info!("Set task {} completed={}", id, completed);
        Ok(true)
    }
}

fn backup_path(path: &Path, n: u32) -> PathBuf {
    if n == 0 {
        suffixed(path, CORRUPT_SUFFIX)
    } else {
        suffixed(path, &format!("{CORRUPT_SUFFIX}.{n}"))
    }
}

fn suffixed(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
