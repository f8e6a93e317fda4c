//! Schedule quality metrics (KPIs).
//!
//! Compares the FIFO baseline with a GA result and summarises how a GA
//! run converged.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan improvement | (FIFO − GA) / FIFO makespan, in % |
//! | Idle distance improvement | (FIFO − GA) / FIFO idle distance, in % |
//! | Fitness improvement | (FIFO − GA) / FIFO weighted fitness, in % |
//! | Total convergence | (first best − final best) / first best, in % |
//! | Avg improvement / generation | (first best − final best) / (generations − 1) |
//!
//! Every ratio returns 0 when its denominator is zero.

use serde::{Deserialize, Serialize};

use super::{Objective, ObjectiveWeights, evaluate};
use crate::ga::GenerationReport;
use crate::models::Task;

/// Percentage by which `candidate` improves on `baseline` (positive = lower).
///
/// Returns 0 for a zero baseline.
pub fn improvement_pct(baseline: f64, candidate: f64) -> f64 {
    if baseline.abs() < f64::EPSILON {
        0.0
    } else {
        (baseline - candidate) / baseline * 100.0
    }
}

/// Side-by-side objectives of the FIFO and GA schedules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleComparison {
    /// Baseline objective.
    pub fifo: Objective,
    /// GA objective.
    pub ga: Objective,
    /// Baseline weighted fitness.
    pub fifo_fitness: f64,
    /// GA weighted fitness.
    pub ga_fitness: f64,
    /// Makespan improvement of GA over FIFO (%).
    pub makespan_improvement_pct: f64,
    /// Idle distance improvement of GA over FIFO (%).
    pub idle_distance_improvement_pct: f64,
    /// Weighted fitness improvement of GA over FIFO (%).
    pub fitness_improvement_pct: f64,
}

impl ScheduleComparison {
    /// Evaluates both orderings and compares them.
    ///
    /// # Arguments
    /// * `fifo` - Baseline ordering.
    /// * `ga` - GA ordering.
    /// * `weights` - Weights used for the fitness comparison.
    pub fn new(fifo: &[Task], ga: &[Task], weights: ObjectiveWeights) -> Self {
        Self::from_objectives(evaluate(fifo), evaluate(ga), weights)
    }

    /// Compares already evaluated objectives.
    pub fn from_objectives(fifo: Objective, ga: Objective, weights: ObjectiveWeights) -> Self {
        let fifo_fitness = weights.fitness(&fifo);
        let ga_fitness = weights.fitness(&ga);
        Self {
            fifo,
            ga,
            fifo_fitness,
            ga_fitness,
            makespan_improvement_pct: improvement_pct(fifo.makespan, ga.makespan),
            idle_distance_improvement_pct: improvement_pct(fifo.idle_distance, ga.idle_distance),
            fitness_improvement_pct: improvement_pct(fifo_fitness, ga_fitness),
        }
    }

    /// Whether the GA schedule scores at least as well as the baseline.
    pub fn ga_is_no_worse(&self) -> bool {
        self.ga_fitness <= self.fifo_fitness
    }
}

/// Convergence summary of a GA run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConvergenceStats {
    /// Number of generations reported (including generation 0).
    pub generations: usize,
    /// Best fitness at generation 0.
    pub initial_best: f64,
    /// Best fitness at the last generation.
    pub final_best: f64,
    /// Total improvement relative to the initial best (%).
    pub total_improvement_pct: f64,
    /// Mean fitness improvement per generation step.
    pub avg_improvement_per_generation: f64,
    /// First generation that reached the final best.
    pub best_found_at: usize,
}

impl ConvergenceStats {
    /// Summarises reports in generation order. Empty input yields zeros.
    pub fn from_reports(reports: &[GenerationReport]) -> Self {
        let (Some(first), Some(last)) = (reports.first(), reports.last()) else {
            return Self::default();
        };

        let improvement = first.fitness - last.fitness;
        let steps = reports.len() - 1;
        let avg_improvement_per_generation = if steps == 0 {
            0.0
        } else {
            improvement / steps as f64
        };
        let best_found_at = reports
            .iter()
            .find(|r| r.fitness <= last.fitness)
            .map_or(last.generation, |r| r.generation);

        Self {
            generations: reports.len(),
            initial_best: first.fitness,
            final_best: last.fitness,
            total_improvement_pct: improvement_pct(first.fitness, last.fitness),
            avg_improvement_per_generation,
            best_found_at,
        }
    }
}
