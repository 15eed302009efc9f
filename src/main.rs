//! Taskboard HTTP server.
//!
//! Serves the task CRUD API backed by `PostgreSQL` when a database URL is
//! configured, or by process memory otherwise. See [`taskboard::config`] for
//! the available flags.

use clap::Parser;
use eyre::WrapErr;
use mockable::DefaultClock;
use std::net::SocketAddr;
use std::sync::Arc;
use taskboard::{
    config::{Config, StorageBackend},
    task::{
        adapters::{
            http::router,
            memory::InMemoryTaskRepository,
            postgres::{PostgresTaskRepository, apply_schema, build_pool},
        },
        ports::TaskRepository,
        services::TaskLifecycleService,
    },
    telemetry::init_tracing,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_format).wrap_err("failed to initialise logging")?;

    match config.storage_backend() {
        StorageBackend::Memory => {
            warn!("no database configured; tasks are kept in memory");
            serve(config.bind, InMemoryTaskRepository::new()).await
        }
        StorageBackend::Postgres {
            url,
            pool_size,
            connection_timeout,
        } => {
            let pool = tokio::task::spawn_blocking(move || {
                build_pool(&url, pool_size, connection_timeout)
            })
            .await
            .wrap_err("connection pool task panicked")?
            .wrap_err("failed to connect to the database")?;
            apply_schema(&pool)
                .await
                .wrap_err("failed to apply the task schema")?;
            info!(pool_size, "database ready");
            serve(config.bind, PostgresTaskRepository::new(pool)).await
        }
    }
}

async fn serve<R>(bind: SocketAddr, repository: R) -> eyre::Result<()>
where
    R: TaskRepository + 'static,
{
    let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock));
    let app = router(Arc::new(service));

    let listener = TcpListener::bind(bind)
        .await
        .wrap_err_with(|| format!("failed to bind {bind}"))?;
    info!(%bind, "taskboard listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .wrap_err("server error")?;
    info!("taskboard stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("signal handlers unavailable; falling back to ctrl-c");
                wait_for_ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        wait_for_ctrl_c().await;
    }
    info!("shutdown signal received");
}

async fn wait_for_ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl-c handler failed");
    }
}
