//! Taskboard: a task-tracking service.
//!
//! This crate provides the task domain, its persistence adapters, and the
//! JSON HTTP surface served by the `taskboard` binary.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP)
//!
//! # Modules
//!
//! - [`task`]: Task records, validation and lifecycle operations
//! - [`config`]: Command-line and environment configuration
//! - [`telemetry`]: Logging set-up

pub mod config;
pub mod task;
pub mod telemetry;
