//! Capacity-constrained task scheduling for a single mobile carrier (AMR).
//!
//! Computes and compares two schedules for one carrier executing pickup and
//! delivery tasks on a grid with four onboard storage slots:
//!
//! - a deterministic constrained-greedy baseline (FIFO with capacity grouping)
//! - a genetic algorithm searching task permutations for a lower weighted
//!   objective of makespan and idle (empty-travel) distance
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Position`, `Task`, `TaskKind`, `Carrier`,
//!   `StorageSlot`
//! - **`scheduler`**: Objective evaluator, FIFO capacity grouping, KPIs
//! - **`ga`**: Chromosome encoding, genetic operators, incremental GA runner
//! - **`replay`**: Step-by-step execution replay and the session recorder boundary
//! - **`validation`**: Input integrity checks (duplicate IDs, zero durations)
//! - **`error`**: Error taxonomy for configuration and input failures
//!
//! # Example
//!
//! ```
//! use amr_schedule::ga::{run_ga, GaConfig, NoopObserver};
//! use amr_schedule::models::Task;
//! use amr_schedule::scheduler::{evaluate, schedule_fifo};
//!
//! let tasks = vec![
//!     Task::delivery(1, 5, 5),
//!     Task::pickup(2, 6, 5).with_processing_time(3),
//!     Task::delivery(3, 7, 5).with_processing_time(4),
//! ];
//!
//! let baseline = evaluate(&schedule_fifo(&tasks));
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_max_generations(10)
//!     .with_seed(7);
//! let outcome = run_ga(config, &tasks, &mut NoopObserver).unwrap();
//! assert_eq!(outcome.best.len(), tasks.len());
//! assert!(baseline.makespan > 0.0);
//! ```
//!
//! # References
//!
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem" (PMX)

pub mod error;
pub mod ga;
pub mod models;
pub mod replay;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;
