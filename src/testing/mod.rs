//! Testing infrastructure for tasker.
//!
//! Provides test doubles for the storage layer so the service can be
//! exercised without touching the file system.
//!
//! # Example
//!
//! ```rust,ignore
//! use tasker::testing::MockTaskRepository;
//! use tasker::TaskService;
//!
//! let mut service = TaskService::new(MockTaskRepository::new());
//! let id = service.add_task("Buy milk", None).await?;
//! ```

pub mod mocks;

pub use mocks::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskRepository;
    use crate::task::{NewTask, TaskId};
    use chrono::TimeZone;
    use chrono::Utc;

    #[tokio::test]
    async fn test_mock_repository_counts_saves() {
        let mut repo = MockTaskRepository::new();
        let id = repo.create(NewTask::new("A", "")).await.unwrap();
        repo.set_completion(id, true).await.unwrap();
        assert_eq!(repo.save_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_repository_failing_saves_keep_state() {
        let mut repo = MockTaskRepository::new().with_failing_saves();
        assert!(repo.create(NewTask::new("A", "")).await.is_err());
        assert!(repo.is_empty());
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_repository_fixed_time() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let mut repo = MockTaskRepository::new().with_fixed_time(at);
        let id = repo.create(NewTask::new("A", "")).await.unwrap();
        let task = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(task.created_at, at);
        assert_eq!(id, TaskId::FIRST);
    }
}
