//! Idempotent schema bootstrap for task storage.

use super::repository::TaskPgPool;
use crate::task::ports::{TaskRepositoryError, TaskRepositoryResult};
use diesel::connection::SimpleConnection;
use tracing::info;

/// Schema scripts applied in order on start-up.
///
/// Each script only creates objects that do not exist yet, so re-running
/// the bootstrap against an initialised database is a no-op.
pub const SCHEMA_SCRIPTS: [(&str, &str); 2] = [
    (
        "create_tasks",
        include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql"),
    ),
    (
        "add_task_indexes",
        include_str!("../../../../migrations/2026-10-01-000001_add_task_indexes/up.sql"),
    ),
];

/// Applies [`SCHEMA_SCRIPTS`] using a pooled connection.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when a connection cannot be
/// acquired or a script fails.
pub async fn apply_schema(pool: &TaskPgPool) -> TaskRepositoryResult<()> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
        for (name, script) in SCHEMA_SCRIPTS {
            connection
                .batch_execute(script)
                .map_err(TaskRepositoryError::persistence)?;
            info!(script = name, "schema script applied");
        }
        Ok(())
    })
    .await
    .map_err(TaskRepositoryError::persistence)?
}
