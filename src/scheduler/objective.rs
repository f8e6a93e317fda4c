//! Objective evaluation by replaying a task sequence.
//!
//! # Algorithm
//!
//! Starting at the home position with `time = 0`:
//! 1. Travel to the task (`time += distance`).
//! 2. Delivery legs count as idle distance (the carrier is assumed empty
//!    while approaching a drop-off).
//! 3. Process the task (`time += processing_time`).
//!
//! The evaluator is feasibility-blind: any ordering is evaluable, including
//! ones the capacity grouping would reject.

use serde::{Deserialize, Serialize};

use crate::models::{HOME_POSITION, Position, Task, TaskKind};

/// Objective values of a task sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Objective {
    /// Total simulated completion time.
    pub makespan: f64,
    /// Distance travelled on delivery legs.
    pub idle_distance: f64,
}

/// Weights combining an [`Objective`] into a scalar fitness (lower = better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    /// Weight on makespan.
    pub makespan_weight: f64,
    /// Weight on idle distance.
    pub idle_distance_weight: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            makespan_weight: 0.5,
            idle_distance_weight: 0.5,
        }
    }
}

impl ObjectiveWeights {
    /// Creates weights.
    pub fn new(makespan_weight: f64, idle_distance_weight: f64) -> Self {
        Self {
            makespan_weight,
            idle_distance_weight,
        }
    }

    /// `makespan_weight * makespan + idle_distance_weight * idle_distance`.
    pub fn fitness(&self, objective: &Objective) -> f64 {
        self.makespan_weight * objective.makespan
            + self.idle_distance_weight * objective.idle_distance
    }
}

/// Evaluates a sequence starting from [`HOME_POSITION`].
pub fn evaluate(sequence: &[Task]) -> Objective {
    evaluate_from(HOME_POSITION, sequence)
}

/// Evaluates a sequence starting from `start`.
pub fn evaluate_from(start: Position, sequence: &[Task]) -> Objective {
    let mut current = start;
    let mut time = 0.0;
    let mut idle_distance = 0.0;

    for task in sequence {
        let distance = current.distance_to(&task.position);
        time += distance;
        if task.kind == TaskKind::Delivery {
            idle_distance += distance;
        }
        time += f64::from(task.processing_time);
        current = task.position;
    }

    Objective {
        makespan: time,
        idle_distance,
    }
}
