//! Per-generation reports and run outcomes.

use serde::{Deserialize, Serialize};

use super::chromosome::TaskChromosome;

/// Fitness distribution of one population.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Lowest fitness in the population.
    pub best: f64,
    /// Mean fitness.
    pub mean: f64,
    /// Highest fitness in the population.
    pub worst: f64,
    /// Population standard deviation of fitness.
    pub std_dev: f64,
}

impl PopulationStats {
    /// Computes statistics over evaluated individuals.
    pub fn from_population(population: &[TaskChromosome]) -> Self {
        if population.is_empty() {
            return Self::default();
        }

        let n = population.len() as f64;
        let mut best = f64::INFINITY;
        let mut worst = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for ch in population {
            let f = ch.fitness();
            best = best.min(f);
            worst = worst.max(f);
            sum += f;
        }
        let mean = sum / n;
        let variance = population
            .iter()
            .map(|ch| (ch.fitness() - mean).powi(2))
            .sum::<f64>()
            / n;

        Self {
            best,
            mean,
            worst,
            std_dev: variance.sqrt(),
        }
    }
}

/// What the runner observed after one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation index; 0 is the initial population.
    pub generation: usize,
    /// Best chromosome found so far in the run.
    pub best: TaskChromosome,
    /// Fitness of `best`.
    pub fitness: f64,
    /// Makespan of `best`.
    pub makespan: f64,
    /// Idle distance of `best`.
    pub idle_distance: f64,
    /// Statistics of the current population.
    pub stats: PopulationStats,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Reached the generation bound.
    MaxGenerations,
    /// Best fitness stalled for the patience window.
    EarlyStop,
    /// Host stopped resuming before a natural stop.
    Cancelled,
}

/// Final result of a GA run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaOutcome {
    /// Best chromosome found.
    pub best: TaskChromosome,
    /// Index of the last completed generation.
    pub generations: usize,
    /// Why the run ended.
    pub stop_reason: StopReason,
    /// One report per completed generation, in order.
    pub history: Vec<GenerationReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::scheduler::Objective;

    #[test]
    fn test_population_stats() {
        let population: Vec<TaskChromosome> = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
            .iter()
            .map(|&f| {
                let mut ch = TaskChromosome::new(vec![Task::delivery(1, 0, 0)]);
                ch.set_evaluation(f, Objective::default());
                ch
            })
            .collect();

        let stats = PopulationStats::from_population(&population);
        assert_eq!(stats.best, 2.0);
        assert_eq!(stats.worst, 9.0);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_population_stats() {
        assert_eq!(PopulationStats::from_population(&[]), PopulationStats::default());
    }
}
