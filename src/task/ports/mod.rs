//! Port contracts for task tracking.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{TaskMutation, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
