//! Selection operators.
//!
//! Parent choice by tournament and survivor carry-over by elitism.
//! Both assume every individual in the population has been evaluated.
//!
//! # Usage
//!
//! ```
//! use amr_schedule::ga::operators::{ELITE_FRACTION, elite_count};
//!
//! assert_eq!(ELITE_FRACTION, 0.1);
//! assert_eq!(elite_count(25), 3);
//! assert_eq!(elite_count(4), 1);
//! ```

use std::cmp::Ordering;

use rand::Rng;

use super::chromosome::TaskChromosome;

/// Individuals sampled per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// Share of the population carried over unchanged.
pub const ELITE_FRACTION: f64 = 0.1;

/// Number of elites for a population: `ceil(0.1 * size)`, at least 1,
/// never more than the population.
pub fn elite_count(population_size: usize) -> usize {
    let count = (population_size as f64 * ELITE_FRACTION).ceil() as usize;
    count.max(1).min(population_size)
}

fn by_fitness(a: &TaskChromosome, b: &TaskChromosome) -> Ordering {
    a.fitness().total_cmp(&b.fitness())
}

/// Tournament selection: samples `size` individuals with replacement
/// and returns the one with the lowest fitness.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament_select<'a, R: Rng>(
    population: &'a [TaskChromosome],
    size: usize,
    rng: &mut R,
) -> &'a TaskChromosome {
    let mut best = &population[rng.random_range(0..population.len())];
    for _ in 1..size.max(1) {
        let candidate = &population[rng.random_range(0..population.len())];
        if by_fitness(candidate, best) == Ordering::Less {
            best = candidate;
        }
    }
    best
}

/// Clones the `count` fittest individuals in ascending fitness order.
pub fn select_elites(population: &[TaskChromosome], count: usize) -> Vec<TaskChromosome> {
    let mut ranked: Vec<&TaskChromosome> = population.iter().collect();
    ranked.sort_by(|a, b| by_fitness(a, b));
    ranked.into_iter().take(count).cloned().collect()
}

/// The fittest individual, if any.
pub fn fittest(population: &[TaskChromosome]) -> Option<&TaskChromosome> {
    population.iter().min_by(|a, b| by_fitness(a, b))
}
