//! Request handlers for the task CRUD endpoints.

use super::{
    AppState,
    dto::{CreateTaskBody, ListTasksParams, TaskResponse, UpdateTaskBody},
    error::ApiError,
};
use crate::task::{domain::TaskId, ports::TaskRepository};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
};
use mockable::Clock;
use serde_json::{Value, json};

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(super) async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let task = state.service.create(body.into()).await?;
    let location = format!("/tasks/{}", task.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TaskResponse::from(&task)),
    ))
}

pub(super) async fn list_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    params: Result<Query<ListTasksParams>, QueryRejection>,
) -> Result<Json<Vec<TaskResponse>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(params) = params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let tasks = state.service.list(params.into()).await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

pub(super) async fn get_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_id(&raw_id)?;
    let task = state.service.get(id).await?;
    Ok(Json(TaskResponse::from(&task)))
}

pub(super) async fn update_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_id(&raw_id)?;
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let task = state.service.update(id, body.into()).await?;
    Ok(Json(TaskResponse::from(&task)))
}

pub(super) async fn delete_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_id(&raw_id)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Malformed identifiers cannot name a stored task, so they are reported as
/// not found.
fn parse_id(raw_id: &str) -> Result<TaskId, ApiError> {
    TaskId::parse(raw_id).ok_or_else(|| ApiError::NotFound(raw_id.to_owned()))
}
