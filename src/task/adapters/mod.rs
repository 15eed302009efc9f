//! Adapter implementations for task tracking ports.
//!
//! - [`memory`]: lock-guarded in-process storage
//! - [`postgres`]: Diesel-backed `PostgreSQL` storage
//! - [`http`]: axum router exposing the CRUD surface

pub mod http;
pub mod memory;
pub mod postgres;
