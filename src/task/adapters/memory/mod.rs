//! In-memory adapters for task tracking.
//!
//! Used as the default backend when no database is configured and as the
//! repository behind service and HTTP tests.

mod task;

pub use task::InMemoryTaskRepository;
