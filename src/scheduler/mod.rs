//! Baseline scheduling, objective evaluation and KPIs.
//!
//! # Algorithm
//!
//! `FifoScheduler` walks tasks in arrival order and closes capacity groups
//! as the carrier's four slots fill up. It is deterministic and provides
//! the baseline the GA is compared against.
//!
//! # Objective
//!
//! [`evaluate`] replays a sequence from the home position and returns
//! makespan and idle distance. Both schedulers are scored with it.
//!
//! # KPI
//!
//! [`ScheduleComparison`] contrasts the two schedules;
//! [`ConvergenceStats`] summarises a GA run's progress.

mod fifo;
mod kpi;
mod objective;

pub use fifo::{CapacityGroups, FifoScheduler, group_by_capacity, schedule_fifo};
pub use kpi::{ConvergenceStats, ScheduleComparison, improvement_pct};
pub use objective::{Objective, ObjectiveWeights, evaluate, evaluate_from};
