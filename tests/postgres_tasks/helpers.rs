//! Shared helpers for `PostgreSQL` task repository tests.

use diesel::connection::SimpleConnection;
use std::sync::LazyLock;
use std::time::Duration;
use taskboard::task::adapters::postgres::{
    PostgresTaskRepository, apply_schema, build_pool,
};
use tokio::sync::{Mutex, MutexGuard};

/// Environment variable naming the test database.
pub const DATABASE_URL_ENV: &str = "TASKBOARD_TEST_DATABASE_URL";

static DATABASE_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Repository bound to a freshly truncated `tasks` table.
///
/// Holds a lock so tests sharing the database run one at a time.
pub struct PreparedRepo {
    pub repo: PostgresTaskRepository,
    _guard: MutexGuard<'static, ()>,
}

/// Connects, bootstraps the schema and empties the table.
///
/// Returns `Ok(None)` when no test database is configured.
///
/// # Errors
///
/// Returns an error if connecting, bootstrapping or truncation fails.
pub async fn prepared_repo() -> Result<Option<PreparedRepo>, eyre::Report> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        return Ok(None);
    };
    let guard = DATABASE_LOCK.lock().await;

    let pool = tokio::task::spawn_blocking(move || build_pool(&url, 2, Duration::from_secs(10)))
        .await??;
    apply_schema(&pool).await?;
    // The bootstrap is idempotent, so applying it twice must succeed.
    apply_schema(&pool).await?;

    let truncate_pool = pool.clone();
    tokio::task::spawn_blocking(move || -> Result<(), eyre::Report> {
        let mut connection = truncate_pool.get()?;
        connection.batch_execute("TRUNCATE tasks")?;
        Ok(())
    })
    .await??;

    Ok(Some(PreparedRepo {
        repo: PostgresTaskRepository::new(pool),
        _guard: guard,
    }))
}
