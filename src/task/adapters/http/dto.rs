//! JSON request and response bodies for the task HTTP surface.

use crate::task::{
    domain::{SortDirection, Task, TaskId, TaskQuery, TaskSortKey},
    services::{CreateTaskRequest, UpdateTaskRequest},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt::Display;
use std::str::FromStr;

/// Task representation returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Task description, `null` when unset.
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp (RFC 3339).
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp (RFC 3339).
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            completed: task.is_completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Body of `POST /tasks`.
///
/// `title` is optional here so that a missing title surfaces as a
/// validation error rather than a deserialisation failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskBody {
    /// Requested title.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Initial completion flag, `false` when omitted.
    #[serde(default)]
    pub completed: Option<bool>,
}

impl From<CreateTaskBody> for CreateTaskRequest {
    fn from(body: CreateTaskBody) -> Self {
        let mut request = body
            .title
            .map_or_else(Self::untitled, Self::new)
            .with_completed(body.completed.unwrap_or(false));
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        request
    }
}

/// Body of `PUT`/`PATCH /tasks/{id}`.
///
/// Absent fields are left unchanged; `"description": null` clears the
/// description and `"title": null` is rejected as an empty title.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskBody {
    /// Replacement title.
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    /// Replacement description.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    /// Replacement completion flag.
    #[serde(default)]
    pub completed: Option<bool>,
}

impl From<UpdateTaskBody> for UpdateTaskRequest {
    fn from(body: UpdateTaskBody) -> Self {
        let mut request = Self::new();
        if let Some(title) = body.title {
            request = request.with_title(title.unwrap_or_default());
        }
        match body.description {
            Some(Some(description)) => request = request.with_description(description),
            Some(None) => request = request.without_description(),
            None => {}
        }
        if let Some(completed) = body.completed {
            request = request.with_completed(completed);
        }
        request
    }
}

/// Query string of `GET /tasks`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListTasksParams {
    /// Completion filter.
    pub completed: Option<bool>,
    /// Sort key; `createdAt` when only `order` is given.
    #[serde(default, deserialize_with = "parsed")]
    pub sort: Option<TaskSortKey>,
    /// Sort direction.
    #[serde(default, deserialize_with = "parsed")]
    pub order: Option<SortDirection>,
    /// Page size.
    pub limit: Option<usize>,
    /// Number of matching tasks to skip.
    pub offset: Option<usize>,
}

impl From<ListTasksParams> for TaskQuery {
    fn from(params: ListTasksParams) -> Self {
        let mut query = Self::new();
        if let Some(completed) = params.completed {
            query = query.with_completed(completed);
        }
        match (params.sort, params.order) {
            (Some(key), direction) => {
                query = query.sorted_by(key, direction.unwrap_or_default());
            }
            (None, Some(direction)) => {
                query = query.sorted_by(TaskSortKey::CreatedAt, direction);
            }
            (None, None) => {}
        }
        if let Some(limit) = params.limit {
            query = query.with_limit(limit);
        }
        query.with_offset(params.offset.unwrap_or(0))
    }
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Decodes an optional value through its [`FromStr`] grammar.
fn parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| raw.parse().map_err(de::Error::custom))
        .transpose()
}
