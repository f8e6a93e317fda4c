//! GA run configuration.
//!
//! # Usage
//!
//! ```
//! use amr_schedule::ga::GaConfig;
//!
//! let config = GaConfig::default()
//!     .with_population_size(30)
//!     .with_max_generations(200)
//!     .with_weights(0.7, 0.3)
//!     .with_seed(42);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::scheduler::ObjectiveWeights;

/// Minimum fitness improvement that resets the early-stop counter.
pub const DEFAULT_EARLY_STOP_THRESHOLD: f64 = 0.001;

/// Genetic algorithm parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Individuals per generation (default: 50).
    pub population_size: usize,
    /// Generation bound; generation 0 is the initial population (default: 100).
    pub max_generations: usize,
    /// Probability of PMX crossover per parent pair (default: 0.8).
    pub crossover_rate: f64,
    /// Probability of mutating each offspring (default: 0.1).
    pub mutation_rate: f64,
    /// Fitness weight on makespan (default: 0.5).
    pub makespan_weight: f64,
    /// Fitness weight on idle distance (default: 0.5).
    pub idle_distance_weight: f64,
    /// Improvement below which a generation counts as stagnant (default: 0.001).
    pub early_stop_threshold: f64,
    /// Stagnant generations before stopping. `None` adapts to task count.
    pub early_stop_generations: Option<usize>,
    /// Generations per cooperative chunk. `None` adapts to task count.
    pub chunk_size: Option<usize>,
    /// RNG seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_generations: 100,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            makespan_weight: 0.5,
            idle_distance_weight: 0.5,
            early_stop_threshold: DEFAULT_EARLY_STOP_THRESHOLD,
            early_stop_generations: None,
            chunk_size: None,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the generation bound.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets makespan and idle-distance weights.
    pub fn with_weights(mut self, makespan_weight: f64, idle_distance_weight: f64) -> Self {
        self.makespan_weight = makespan_weight;
        self.idle_distance_weight = idle_distance_weight;
        self
    }

    /// Sets the early-stop improvement threshold.
    pub fn with_early_stop_threshold(mut self, threshold: f64) -> Self {
        self.early_stop_threshold = threshold;
        self
    }

    /// Fixes the early-stop patience instead of adapting it.
    pub fn with_early_stop_generations(mut self, generations: usize) -> Self {
        self.early_stop_generations = Some(generations);
        self
    }

    /// Fixes the chunk size instead of adapting it.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Objective weights.
    pub fn weights(&self) -> ObjectiveWeights {
        ObjectiveWeights::new(self.makespan_weight, self.idle_distance_weight)
    }

    /// Chunk size and patience for a run over `task_count` tasks,
    /// honouring explicit overrides.
    pub fn pacing(&self, task_count: usize) -> Pacing {
        let adaptive = Pacing::for_task_count(task_count);
        Pacing {
            chunk_size: self.chunk_size.unwrap_or(adaptive.chunk_size).max(1),
            patience: self.early_stop_generations.unwrap_or(adaptive.patience).max(1),
        }
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.population_size == 0 {
            return Err(ScheduleError::InvalidPopulationSize(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(ScheduleError::InvalidGenerationBound(self.max_generations));
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        check_weight("makespan_weight", self.makespan_weight)?;
        check_weight("idle_distance_weight", self.idle_distance_weight)?;
        check_parameter("early_stop_threshold", self.early_stop_threshold)?;
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ScheduleError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScheduleError::InvalidRate { name, value })
    }
}

fn check_weight(name: &'static str, value: f64) -> Result<(), ScheduleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ScheduleError::InvalidWeight { name, value })
    }
}

fn check_parameter(name: &'static str, value: f64) -> Result<(), ScheduleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ScheduleError::InvalidParameter { name, value })
    }
}

/// Cooperative chunk size and early-stop patience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Generations processed before yielding to the host.
    pub chunk_size: usize,
    /// Stagnant generations tolerated before stopping.
    pub patience: usize,
}

impl Pacing {
    /// Larger task sets get smaller chunks and shorter patience.
    pub fn for_task_count(task_count: usize) -> Self {
        if task_count > 20 {
            Self {
                chunk_size: 3,
                patience: 5,
            }
        } else if task_count > 15 {
            Self {
                chunk_size: 4,
                patience: 8,
            }
        } else {
            Self {
                chunk_size: 5,
                patience: 10,
            }
        }
    }
}
