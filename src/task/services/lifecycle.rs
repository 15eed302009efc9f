//! Service layer for task creation, lookup, update and deletion.

use crate::task::{
    domain::{Task, TaskChanges, TaskDomainError, TaskDraft, TaskId, TaskQuery},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    completed: bool,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Creates a request without a title.
    ///
    /// Used by adapters whose input omitted the field; creation fails
    /// validation.
    #[must_use]
    pub fn untitled() -> Self {
        Self::default()
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

impl From<CreateTaskRequest> for TaskDraft {
    fn from(request: CreateTaskRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            completed: request.completed,
        }
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    changes: TaskChanges,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing but the update timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.changes.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.changes.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.changes.description = Some(None);
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.changes.completed = Some(completed);
        self
    }
}

impl From<TaskChanges> for UpdateTaskRequest {
    fn from(changes: TaskChanges) -> Self {
        Self { changes }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Input failed a field rule.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// No task has the referenced identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The backing store failed.
    #[error(transparent)]
    Storage(TaskRepositoryError),
}

impl From<TaskRepositoryError> for TaskLifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::Rejected(domain) => Self::Validation(domain),
            other => Self::Storage(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// The service is the single writer of task state: it validates input,
/// assigns identifiers and timestamps, and delegates storage to the
/// repository port.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Validation`] when the title is missing
    /// or invalid, or [`TaskLifecycleError::Storage`] when persistence fails.
    #[instrument(skip_all)]
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let task = Task::create(request.into(), &*self.clock)?;
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when no task has the
    /// identifier, or [`TaskLifecycleError::Storage`] when lookup fails.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            debug!("task lookup missed");
            TaskLifecycleError::NotFound(id)
        })
    }

    /// Lists tasks matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Storage`] when the listing fails.
    #[instrument(skip(self))]
    pub async fn list(&self, query: TaskQuery) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(&query).await?)
    }

    /// Applies a partial update to an existing task.
    ///
    /// The changes are applied to the stored task inside one repository
    /// update, so overlapping updates both take effect and `updated_at`
    /// never moves backwards. A task deleted first is reported as not found
    /// and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::Validation`] when the resulting task is invalid,
    /// or [`TaskLifecycleError::Storage`] when persistence fails.
    #[instrument(skip(self, request), fields(task_id = %id))]
    pub async fn update(&self, id: TaskId, request: UpdateTaskRequest) -> TaskLifecycleResult<Task>
    where
        C: 'static,
    {
        let clock = Arc::clone(&self.clock);
        let changes = request.changes;
        let task = self
            .repository
            .update(id, Box::new(move |task| task.apply(changes, &*clock)))
            .await?;
        info!(completed = task.is_completed(), "task updated");
        Ok(task)
    }

    /// Permanently deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// (including a repeated delete), or [`TaskLifecycleError::Storage`] when
    /// persistence fails.
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        self.repository.delete(id).await?;
        info!("task deleted");
        Ok(())
    }
}
