//! Domain model for task tracking.
//!
//! The task domain owns field validation, identifier generation, and
//! timestamp bookkeeping while keeping all infrastructure concerns outside of
//! the domain boundary.

mod error;
mod ids;
mod query;
mod task;
pub mod validation;

pub use error::{ParseSortError, TaskDomainError};
pub use ids::TaskId;
pub use query::{SortDirection, TaskQuery, TaskSortKey};
pub use task::{PersistedTaskData, Task, TaskChanges, TaskDraft};
pub use validation::{TaskField, TaskFields, validate_fields};
