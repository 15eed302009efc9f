//! Task aggregate root and its mutation inputs.

use super::{TaskDomainError, TaskFields, TaskId, validate_fields};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Field values for a task that has not been created yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Requested title; `None` when the caller omitted it.
    pub title: Option<String>,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Initial completion flag.
    pub completed: bool,
}

/// Partial update to an existing task.
///
/// Each `None` leaves the corresponding field unchanged. For `description`,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description, or `Some(None)` to clear it.
    pub description: Option<Option<String>>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a fresh identifier.
    ///
    /// Both timestamps are taken from a single clock reading.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidField`] when the draft violates a
    /// field rule; the title is missing, blank, or too long.
    pub fn create(draft: TaskDraft, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        validate_fields(&TaskFields {
            title: draft.title.as_deref(),
            description: draft.description.as_deref(),
        })?;

        let TaskDraft {
            title,
            description,
            completed,
        } = draft;
        let timestamp = now(clock);

        Ok(Self {
            id: TaskId::new(),
            title: title.unwrap_or_default(),
            description,
            completed,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            completed: data.completed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update and re-stamps `updated_at`.
    ///
    /// The resulting field values are validated before anything is written,
    /// so a rejected update leaves the task unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidField`] when the resulting task
    /// would violate a field rule.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let TaskChanges {
            title,
            description,
            completed,
        } = changes;

        let next_title = title.unwrap_or_else(|| self.title.clone());
        let next_description = description.unwrap_or_else(|| self.description.clone());
        validate_fields(&TaskFields {
            title: Some(&next_title),
            description: next_description.as_deref(),
        })?;

        self.title = next_title;
        self.description = next_description;
        if let Some(flag) = completed {
            self.completed = flag;
        }
        self.touch(clock);
        Ok(())
    }

    /// Moves `updated_at` to the current clock time, never backwards.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = now(clock).max(self.updated_at);
    }
}

/// Reads the clock at the precision `timestamptz` columns preserve.
fn now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(6)
}
