//! Declarative field rules for task records.
//!
//! Rules are evaluated in declared order and the first failing rule wins.
//! Both the create and update paths validate through [`validate_fields`], so
//! a persisted task always satisfies every rule in [`TASK_RULES`].

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 255;

/// Task fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// The task title.
    Title,
    /// The optional task description.
    Description,
}

impl TaskField {
    /// Returns the field name used in error payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of the user-editable fields of a candidate task.
///
/// `title` is `None` when the caller did not supply one at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskFields<'a> {
    /// Candidate title.
    pub title: Option<&'a str>,
    /// Candidate description.
    pub description: Option<&'a str>,
}

/// A single validation rule.
#[derive(Clone, Copy)]
pub struct FieldRule {
    /// Field the rule reports against.
    pub field: TaskField,
    /// Returns `true` when the candidate satisfies the rule.
    pub predicate: fn(&TaskFields<'_>) -> bool,
    /// Message reported when the predicate fails.
    pub message: &'static str,
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Rules applied to every task write, in evaluation order.
pub const TASK_RULES: [FieldRule; 2] = [
    FieldRule {
        field: TaskField::Title,
        predicate: title_is_present,
        message: "title must not be empty",
    },
    FieldRule {
        field: TaskField::Title,
        predicate: title_within_limit,
        message: "title must be at most 255 characters",
    },
];

/// Validates candidate fields against [`TASK_RULES`].
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidField`] for the first rule whose
/// predicate fails.
pub fn validate_fields(fields: &TaskFields<'_>) -> Result<(), TaskDomainError> {
    validate_with(&TASK_RULES, fields)
}

/// Validates candidate fields against an explicit rule list.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidField`] for the first rule whose
/// predicate fails.
pub fn validate_with(rules: &[FieldRule], fields: &TaskFields<'_>) -> Result<(), TaskDomainError> {
    match rules.iter().find(|rule| !(rule.predicate)(fields)) {
        Some(rule) => Err(TaskDomainError::InvalidField {
            field: rule.field,
            message: rule.message,
        }),
        None => Ok(()),
    }
}

fn title_is_present(fields: &TaskFields<'_>) -> bool {
    fields.title.is_some_and(|title| !title.trim().is_empty())
}

// A missing title is reported by `title_is_present`, so it passes here.
fn title_within_limit(fields: &TaskFields<'_>) -> bool {
    fields
        .title
        .is_none_or(|title| title.chars().count() <= TITLE_MAX_CHARS)
}
