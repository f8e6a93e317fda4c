//! Permutation chromosome for AMR task sequencing.
//!
//! # Encoding
//!
//! A chromosome is an ordering of the full input task set: every task
//! appears exactly once. Initial chromosomes are built by shuffling the
//! tasks and regrouping them with the carrier capacity policy; crossover
//! and mutation then operate on the flat permutation and may break those
//! groupings.
//!
//! # Reference
//! Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::models::Task;
use crate::scheduler::{Objective, group_by_capacity};

/// Task permutation with its evaluated fitness.
///
/// Lower fitness = better schedule (minimization convention). Fitness is
/// `0.0` and the objective is `None` until the chromosome is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskChromosome {
    tasks: Vec<Task>,
    fitness: f64,
    objective: Option<Objective>,
}

impl TaskChromosome {
    /// Wraps an ordering as an unevaluated chromosome.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            fitness: 0.0,
            objective: None,
        }
    }

    /// Creates a random chromosome that starts out capacity-grouped.
    pub fn random_grouped<R: Rng>(tasks: &[Task], rng: &mut R) -> Self {
        let mut shuffled = tasks.to_vec();
        shuffled.shuffle(rng);

        let groups = group_by_capacity(&shuffled);
        let mut ordering = groups.flatten();
        ordering.extend(groups.remainder);
        Self::new(ordering)
    }

    /// Tasks in execution order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Task IDs in execution order.
    pub fn ids(&self) -> Vec<u32> {
        self.tasks.iter().map(|t| t.id).collect()
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the chromosome holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Fitness value (lower = better).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Objective, once evaluated.
    pub fn objective(&self) -> Option<Objective> {
        self.objective
    }

    /// Whether fitness reflects the current ordering.
    pub fn is_evaluated(&self) -> bool {
        self.objective.is_some()
    }

    /// Stores evaluation results.
    pub fn set_evaluation(&mut self, fitness: f64, objective: Objective) {
        self.fitness = fitness;
        self.objective = Some(objective);
    }

    /// Marks the ordering as changed since the last evaluation.
    pub fn invalidate(&mut self) {
        self.fitness = 0.0;
        self.objective = None;
    }

    /// Whether this ordering contains exactly the IDs of `tasks`.
    pub fn is_permutation_of(&self, tasks: &[Task]) -> bool {
        if self.tasks.len() != tasks.len() {
            return false;
        }
        let mut ours = self.ids();
        let mut theirs: Vec<u32> = tasks.iter().map(|t| t.id).collect();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs
    }

    /// Consumes the chromosome, returning the ordering.
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

// ======================== Crossover operators ========================

/// Performs PMX (Partially Mapped Crossover).
///
/// Picks `start` in `[0, len-2]` and `end` in `[start, len-1]`. Child 1
/// takes parent 2's `[start, end]` segment in place, child 2 takes parent 1's.
/// Remaining positions are filled from the child's own parent, starting at
/// the same index and wrapping past genes already placed.
///
/// Parents must be permutations of the same task ids. Parents shorter
/// than two genes or of different lengths are returned as clones, as are
/// parents whose repeated ids leave a child gap unfillable.
pub fn pmx_crossover<R: Rng>(
    p1: &TaskChromosome,
    p2: &TaskChromosome,
    rng: &mut R,
) -> (TaskChromosome, TaskChromosome) {
    let len = p1.len();
    if len < 2 || p2.len() != len {
        return (p1.clone(), p2.clone());
    }

    let start = rng.random_range(0..=len - 2);
    let end = start + rng.random_range(0..=len - start - 1);

    match (
        pmx_build_child(&p1.tasks, &p2.tasks, start, end),
        pmx_build_child(&p2.tasks, &p1.tasks, start, end),
    ) {
        (Some(child1), Some(child2)) => (TaskChromosome::new(child1), TaskChromosome::new(child2)),
        _ => (p1.clone(), p2.clone()),
    }
}

/// Returns `None` when the gaps cannot be filled from `own`.
fn pmx_build_child(own: &[Task], donor: &[Task], start: usize, end: usize) -> Option<Vec<Task>> {
    let len = own.len();
    let mut child: Vec<Option<Task>> = vec![None; len];
    let mut placed: HashSet<u32> = HashSet::with_capacity(len);

    for i in start..=end {
        child[i] = Some(donor[i]);
        placed.insert(donor[i].id);
    }

    for (i, slot) in child.iter_mut().enumerate() {
        if slot.is_some() {
            continue;
        }
        let j = (0..len)
            .map(|step| (i + step) % len)
            .find(|&j| !placed.contains(&own[j].id))?;
        placed.insert(own[j].id);
        *slot = Some(own[j]);
    }

    Some(child.into_iter().flatten().collect())
}

// ======================== Mutation operators ========================

/// Swap mutation: exchanges two random positions.
pub fn swap_mutation<R: Rng>(chromosome: &mut TaskChromosome, rng: &mut R) {
    let len = chromosome.len();
    if len < 2 {
        return;
    }
    let i = rng.random_range(0..len);
    let j = rng.random_range(0..len);
    chromosome.tasks.swap(i, j);
    chromosome.invalidate();
}

/// Invert mutation: reverses a random contiguous segment.
pub fn invert_mutation<R: Rng>(chromosome: &mut TaskChromosome, rng: &mut R) {
    let len = chromosome.len();
    if len < 2 {
        return;
    }
    let mut i = rng.random_range(0..len);
    let mut j = rng.random_range(0..len);
    if i > j {
        std::mem::swap(&mut i, &mut j);
    }
    chromosome.tasks[i..=j].reverse();
    chromosome.invalidate();
}

/// Applies swap or inversion with equal probability.
pub fn mutate<R: Rng>(chromosome: &mut TaskChromosome, rng: &mut R) {
    if rng.random_bool(0.5) {
        swap_mutation(chromosome, rng);
    } else {
        invert_mutation(chromosome, rng);
    }
}
