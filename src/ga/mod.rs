//! GA-based task sequencing.
//!
//! Searches permutations of the carrier's tasks for a lower weighted
//! objective of makespan and idle distance.
//!
//! # Encoding
//!
//! - **Chromosome**: permutation of the full task set. Initial individuals
//!   are shuffled and regrouped with the carrier capacity policy.
//! - **Fitness**: `makespan_weight * makespan + idle_distance_weight * idle_distance`
//!   (lower = better).
//!
//! # Operators
//!
//! - Tournament selection (size 3) and elitism (top 10%, at least one)
//! - PMX crossover
//! - Swap or inversion mutation, chosen 50/50
//!
//! # Submodules
//!
//! - [`operators`]: Selection and elitism
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

mod chromosome;
mod config;
pub mod operators;
mod problem;
mod report;
mod runner;

pub use chromosome::{TaskChromosome, invert_mutation, mutate, pmx_crossover, swap_mutation};
pub use config::{DEFAULT_EARLY_STOP_THRESHOLD, GaConfig, Pacing};
pub use problem::TaskSchedulingProblem;
pub use report::{GaOutcome, GenerationReport, PopulationStats, StopReason};
pub use runner::{ChunkStatus, GaPhase, GaRunner, GenerationObserver, NoopObserver, run_ga};
