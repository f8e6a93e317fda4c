//! AMR sequencing GA problem definition.
//!
//! Bridges the domain (tasks, objective weights) to the generic GA
//! operations: creating, evaluating, recombining and mutating chromosomes.
//!
//! Fitness is feasibility-blind: a permutation that breaks the capacity
//! grouping after crossover or mutation is scored like any other.

use rand::Rng;

use super::chromosome::{TaskChromosome, mutate, pmx_crossover};
use crate::models::Task;
use crate::scheduler::{ObjectiveWeights, evaluate};

/// GA problem for sequencing one carrier's tasks.
///
/// # Example
/// ```
/// use amr_schedule::ga::TaskSchedulingProblem;
/// use amr_schedule::models::Task;
/// use amr_schedule::scheduler::ObjectiveWeights;
/// use rand::SeedableRng;
///
/// let tasks = vec![Task::delivery(1, 5, 5), Task::pickup(2, 6, 5)];
/// let problem = TaskSchedulingProblem::new(&tasks, ObjectiveWeights::default());
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let mut individual = problem.create_individual(&mut rng);
/// problem.evaluate(&mut individual);
/// assert!(individual.is_evaluated());
/// ```
#[derive(Debug, Clone)]
pub struct TaskSchedulingProblem {
    /// Input tasks in arrival order.
    pub tasks: Vec<Task>,
    /// Objective weights.
    pub weights: ObjectiveWeights,
}

impl TaskSchedulingProblem {
    /// Creates a problem.
    pub fn new(tasks: &[Task], weights: ObjectiveWeights) -> Self {
        Self {
            tasks: tasks.to_vec(),
            weights,
        }
    }

    /// Creates a random capacity-grouped individual.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> TaskChromosome {
        TaskChromosome::random_grouped(&self.tasks, rng)
    }

    /// Evaluates an individual and stores its fitness and objective.
    pub fn evaluate(&self, individual: &mut TaskChromosome) {
        let objective = evaluate(individual.tasks());
        individual.set_evaluation(self.weights.fitness(&objective), objective);
    }

    /// PMX crossover.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &TaskChromosome,
        parent2: &TaskChromosome,
        rng: &mut R,
    ) -> (TaskChromosome, TaskChromosome) {
        pmx_crossover(parent1, parent2, rng)
    }

    /// Swap or inversion mutation, chosen 50/50.
    pub fn mutate<R: Rng>(&self, individual: &mut TaskChromosome, rng: &mut R) {
        mutate(individual, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn make_tasks() -> Vec<Task> {
        vec![
            Task::delivery(1, 5, 5),
            Task::pickup(2, 6, 5).with_processing_time(3),
            Task::delivery(3, 7, 5).with_processing_time(4),
            Task::pickup_delivery(4, 1, 9),
        ]
    }

    #[test]
    fn test_fitness_computation() {
        let tasks = make_tasks();
        let problem = TaskSchedulingProblem::new(&tasks, ObjectiveWeights::new(0.7, 0.3));
        let mut ch = TaskChromosome::new(tasks.clone());
        problem.evaluate(&mut ch);

        let obj = evaluate(&tasks);
        assert_eq!(ch.objective(), Some(obj));
        assert!((ch.fitness() - (0.7 * obj.makespan + 0.3 * obj.idle_distance)).abs() < 1e-12);
    }

    #[test]
    fn test_weights_change_fitness() {
        let tasks = make_tasks();
        let makespan_only = TaskSchedulingProblem::new(&tasks, ObjectiveWeights::new(1.0, 0.0));
        let idle_only = TaskSchedulingProblem::new(&tasks, ObjectiveWeights::new(0.0, 1.0));

        let mut a = TaskChromosome::new(tasks.clone());
        let mut b = a.clone();
        makespan_only.evaluate(&mut a);
        idle_only.evaluate(&mut b);
        assert!(a.fitness() != b.fitness());
    }

    #[test]
    fn test_crossover_and_mutation() {
        let tasks = make_tasks();
        let problem = TaskSchedulingProblem::new(&tasks, ObjectiveWeights::default());
        let mut rng = SmallRng::seed_from_u64(42);

        let p1 = problem.create_individual(&mut rng);
        let p2 = problem.create_individual(&mut rng);

        let (mut c1, c2) = problem.crossover(&p1, &p2, &mut rng);
        problem.mutate(&mut c1, &mut rng);
        assert!(c1.is_permutation_of(&tasks));
        assert!(c2.is_permutation_of(&tasks));
    }
}
