//! List query parameters for task collections.

use super::ParseSortError;
use std::str::FromStr;

/// Field a task listing can be sorted by.
///
/// Parses from the camelCase wire name or its `snake_case` alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskSortKey {
    /// Sort by creation timestamp.
    CreatedAt,
    /// Sort by latest update timestamp.
    UpdatedAt,
    /// Sort lexicographically by title.
    Title,
}

impl TaskSortKey {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::Title => "title",
        }
    }
}

impl FromStr for TaskSortKey {
    type Err = ParseSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            "updatedAt" | "updated_at" => Ok(Self::UpdatedAt),
            "title" => Ok(Self::Title),
            _ => Err(ParseSortError(value.to_owned())),
        }
    }
}

/// Sort direction for task listings.
///
/// Parses from `asc` or `desc` in any letter case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl FromStr for SortDirection {
    type Err = ParseSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortError(value.to_owned())),
        }
    }
}

/// Filter, sort and pagination options for listing tasks.
///
/// The default query returns every task in insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskQuery {
    completed: Option<bool>,
    sort: Option<(TaskSortKey, SortDirection)>,
    limit: Option<usize>,
    offset: usize,
}

impl TaskQuery {
    /// Creates a query matching every task in insertion order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to tasks with the given completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Orders the listing by `key` in `direction`.
    ///
    /// Tasks with equal keys keep their insertion order.
    #[must_use]
    pub const fn sorted_by(mut self, key: TaskSortKey, direction: SortDirection) -> Self {
        self.sort = Some((key, direction));
        self
    }

    /// Caps the number of returned tasks.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips the first `offset` matching tasks.
    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the completion filter, if any.
    #[must_use]
    pub const fn completed(&self) -> Option<bool> {
        self.completed
    }

    /// Returns the requested ordering, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<(TaskSortKey, SortDirection)> {
        self.sort
    }

    /// Returns the page size, if any.
    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the number of matching tasks to skip.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }
}
