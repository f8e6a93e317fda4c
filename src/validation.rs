//! Input validation for task lists.
//!
//! Checks structural integrity of tasks before scheduling. Detects:
//! - Empty task lists
//! - Duplicate task IDs
//! - The reserved task ID 0
//! - Zero processing times

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No tasks supplied.
    EmptyTaskList,
    /// Two tasks share the same ID.
    DuplicateId,
    /// Task IDs must be positive.
    ZeroId,
    /// Processing time must be positive.
    ZeroProcessingTime,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a task list.
///
/// Checks:
/// 1. At least one task
/// 2. No duplicate task IDs
/// 3. No task uses ID 0
/// 4. Every processing time is positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    if tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTaskList,
            "Task list is empty",
        ));
    }

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if task.id == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroId,
                "Task ID 0 is reserved",
            ));
        }

        if task.processing_time == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroProcessingTime,
                format!("Task {} has zero processing time", task.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
