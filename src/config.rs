//! Process configuration for the `taskboard` binary.
//!
//! Every flag falls back to an environment variable, so the server can be
//! configured either way.

use crate::telemetry::LogFormat;
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Command-line configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "taskboard", version, about = "Task-tracking HTTP service")]
pub struct Config {
    /// Socket address the HTTP server listens on.
    #[arg(long, env = "TASKBOARD_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// `PostgreSQL` connection URL; tasks are kept in memory when unset.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(
        long,
        env = "TASKBOARD_POOL_SIZE",
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub pool_size: u32,

    /// Seconds to wait for a pooled connection before failing.
    #[arg(long, env = "TASKBOARD_POOL_TIMEOUT_SECS", default_value_t = 5)]
    pub pool_timeout_secs: u64,

    /// Log line format.
    #[arg(long, env = "TASKBOARD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Storage backend selected by the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local storage; contents are lost on exit.
    Memory,
    /// `PostgreSQL` storage through a connection pool.
    Postgres {
        /// Connection URL.
        url: String,
        /// Maximum pool size.
        pool_size: u32,
        /// Connection checkout timeout.
        connection_timeout: Duration,
    },
}

impl Config {
    /// Returns the storage backend implied by the configuration.
    ///
    /// A blank database URL selects the in-memory backend.
    #[must_use]
    pub fn storage_backend(&self) -> StorageBackend {
        match self.database_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => StorageBackend::Postgres {
                url: url.to_owned(),
                pool_size: self.pool_size,
                connection_timeout: Duration::from_secs(self.pool_timeout_secs),
            },
            _ => StorageBackend::Memory,
        }
    }
}
