//! `PostgreSQL` adapters for task persistence.

mod bootstrap;
mod models;
mod repository;
mod schema;

pub use bootstrap::{SCHEMA_SCRIPTS, apply_schema};
pub use repository::{PostgresTaskRepository, TaskPgPool, build_pool};
