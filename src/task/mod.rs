//! Task tracking for Taskboard.
//!
//! A task is a titled to-do item with an optional description and a
//! completion flag. This module implements creating, reading, updating,
//! listing and deleting tasks, enforcing field rules and timestamp
//! bookkeeping on every write. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
