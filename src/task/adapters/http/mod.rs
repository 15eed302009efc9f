//! HTTP adapter exposing the task CRUD surface.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | `POST` | `/tasks` | `201` with the created task |
//! | `GET` | `/tasks` | `200` with matching tasks |
//! | `GET` | `/tasks/{id}` | `200` with the task |
//! | `PUT`, `PATCH` | `/tasks/{id}` | `200` with the updated task |
//! | `DELETE` | `/tasks/{id}` | `204` |
//!
//! Validation failures map to `400`, unknown identifiers to `404`, and
//! storage failures to `500`.

mod dto;
mod error;
mod handlers;

pub use dto::{CreateTaskBody, ListTasksParams, TaskResponse, UpdateTaskBody};
pub use error::{ApiError, BAD_REQUEST_MESSAGE, NOT_FOUND_MESSAGE};

use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use axum::{Router, routing::get};
use mockable::Clock;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared handler state.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    service: Arc<TaskLifecycleService<R, C>>,
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Wraps a shared lifecycle service.
    #[must_use]
    pub const fn new(service: Arc<TaskLifecycleService<R, C>>) -> Self {
        Self { service }
    }
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Builds the task router with CORS and request tracing layers.
pub fn router<R, C>(service: Arc<TaskLifecycleService<R, C>>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/healthz", get(handlers::health))
        .route(
            "/tasks",
            get(handlers::list_tasks::<R, C>).post(handlers::create_task::<R, C>),
        )
        .route(
            "/tasks/:id",
            get(handlers::get_task::<R, C>)
                .put(handlers::update_task::<R, C>)
                .patch(handlers::update_task::<R, C>)
                .delete(handlers::delete_task::<R, C>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(service))
}
