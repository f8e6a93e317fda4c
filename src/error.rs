//! Error taxonomy.
//!
//! Only configuration and input problems are errors. Degenerate runs
//! (a FIFO pass that admits nothing) end early with a partial result,
//! and the evaluator and genetic operators are total over valid input.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised before any scheduling work begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// No tasks were supplied.
    #[error("task list is empty")]
    EmptyTaskList,

    /// Population size must be at least 1.
    #[error("population size must be positive, got {0}")]
    InvalidPopulationSize(usize),

    /// Generation bound must be at least 1.
    #[error("maximum generations must be positive, got {0}")]
    InvalidGenerationBound(usize),

    /// A probability outside `[0, 1]`.
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    /// A negative or non-finite objective weight.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    /// A negative or non-finite run parameter.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// Task list failed validation.
    #[error("invalid task list: {}", summarize(.0))]
    InvalidTasks(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display() {
        assert_eq!(ScheduleError::EmptyTaskList.to_string(), "task list is empty");
        assert_eq!(
            ScheduleError::InvalidRate {
                name: "mutation_rate",
                value: 1.5
            }
            .to_string(),
            "mutation_rate must be within [0, 1], got 1.5"
        );
        assert_eq!(
            ScheduleError::InvalidParameter {
                name: "early_stop_threshold",
                value: -1.0
            }
            .to_string(),
            "early_stop_threshold must be finite and non-negative, got -1"
        );
    }

    #[test]
    fn test_invalid_tasks_lists_messages() {
        let err = ScheduleError::InvalidTasks(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate task ID: 3"),
            ValidationError::new(ValidationErrorKind::ZeroId, "Task ID 0 is reserved"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid task list: Duplicate task ID: 3; Task ID 0 is reserved"
        );
    }
}
