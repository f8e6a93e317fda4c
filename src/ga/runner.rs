//! Incremental GA execution.
//!
//! # Lifecycle
//!
//! `Idle → Initializing → Evaluating → (Reproducing → Evaluating)* → Terminated`
//!
//! The runner advances one generation per [`GaRunner::step`]. Hosts that
//! must stay responsive call [`GaRunner::run_chunk`], which processes a
//! bounded number of generations and then returns control. Cancelling a
//! run is simply not resuming it; there is no preemption inside a chunk.
//!
//! # Termination
//!
//! A run stops when `generation == max_generations`, or when the best
//! fitness has not improved by more than `early_stop_threshold` for
//! `patience` consecutive generations. A run therefore reports at most
//! `max_generations + 1` generations, counting generation 0.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::chromosome::TaskChromosome;
use super::config::{GaConfig, Pacing};
use super::operators::{TOURNAMENT_SIZE, elite_count, fittest, select_elites, tournament_select};
use super::problem::TaskSchedulingProblem;
use super::report::{GaOutcome, GenerationReport, PopulationStats, StopReason};
use crate::error::ScheduleError;
use crate::models::Task;
use crate::validation::validate_tasks;

/// Runner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GaPhase {
    /// Created, no population yet.
    Idle,
    /// Building the initial population.
    Initializing,
    /// Scoring unevaluated individuals.
    Evaluating,
    /// Building the next population.
    Reproducing,
    /// Finished; no further generations.
    Terminated,
}

/// Result of one cooperative chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStatus {
    /// Chunk finished and the run can be resumed.
    Yielded,
    /// Run terminated; completion has been signalled.
    Completed,
}

/// Receives run progress synchronously, in generation order.
pub trait GenerationObserver {
    /// Called once per generation, including generation 0.
    fn on_generation(&mut self, report: &GenerationReport);

    /// Called exactly once when the run terminates.
    fn on_complete(&mut self, _outcome: &GaOutcome) {}

    /// Called between chunks when driven by [`run_ga`].
    fn on_yield(&mut self) {}
}

impl<F: FnMut(&GenerationReport)> GenerationObserver for F {
    fn on_generation(&mut self, report: &GenerationReport) {
        self(report);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl GenerationObserver for NoopObserver {
    fn on_generation(&mut self, _report: &GenerationReport) {}
}

/// Step-wise GA engine owning its population and RNG.
///
/// Also an [`Iterator`] of [`GenerationReport`]s: finite, one item per
/// completed generation, not restartable.
///
/// # Example
///
/// ```
/// use amr_schedule::ga::{ChunkStatus, GaConfig, GaRunner};
/// use amr_schedule::models::Task;
///
/// let tasks: Vec<Task> = (1..=6).map(|id| Task::delivery(id, id as i32, 3)).collect();
/// let config = GaConfig::default().with_population_size(10).with_max_generations(20).with_seed(3);
/// let mut runner = GaRunner::new(config, &tasks).unwrap();
///
/// let mut reports = Vec::new();
/// while runner.run_chunk(&mut |r: &amr_schedule::ga::GenerationReport| reports.push(r.fitness))
///     == ChunkStatus::Yielded
/// {
///     // host work between chunks
/// }
/// assert!(reports.len() <= 21);
/// ```
#[derive(Debug)]
pub struct GaRunner {
    config: GaConfig,
    problem: TaskSchedulingProblem,
    pacing: Pacing,
    rng: StdRng,
    phase: GaPhase,
    population: Vec<TaskChromosome>,
    generation: usize,
    best: Option<TaskChromosome>,
    stagnant_generations: usize,
    stop_reason: Option<StopReason>,
    history: Vec<GenerationReport>,
    completion_signalled: bool,
}

impl GaRunner {
    /// Validates input and prepares a run. No population work happens here.
    pub fn new(config: GaConfig, tasks: &[Task]) -> Result<Self, ScheduleError> {
        if tasks.is_empty() {
            return Err(ScheduleError::EmptyTaskList);
        }
        config.validate()?;
        validate_tasks(tasks).map_err(ScheduleError::InvalidTasks)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let pacing = config.pacing(tasks.len());
        let problem = TaskSchedulingProblem::new(tasks, config.weights());

        Ok(Self {
            config,
            problem,
            pacing,
            rng,
            phase: GaPhase::Idle,
            population: Vec::new(),
            generation: 0,
            best: None,
            stagnant_generations: 0,
            stop_reason: None,
            history: Vec::new(),
            completion_signalled: false,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> GaPhase {
        self.phase
    }

    /// Index of the last completed generation.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Chunk size and patience in effect.
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Current population.
    pub fn population(&self) -> &[TaskChromosome] {
        &self.population
    }

    /// Best chromosome found so far.
    pub fn best(&self) -> Option<&TaskChromosome> {
        self.best.as_ref()
    }

    /// Reports of all completed generations.
    pub fn history(&self) -> &[GenerationReport] {
        &self.history
    }

    /// Whether the run has terminated.
    pub fn is_terminated(&self) -> bool {
        self.phase == GaPhase::Terminated
    }

    /// Advances one generation and returns its report.
    ///
    /// The first call builds and evaluates generation 0. Returns `None`
    /// once the run has terminated.
    pub fn step(&mut self) -> Option<GenerationReport> {
        match self.phase {
            GaPhase::Terminated => return None,
            GaPhase::Idle => {
                info!(
                    tasks = self.problem.tasks.len(),
                    population = self.config.population_size,
                    max_generations = self.config.max_generations,
                    chunk_size = self.pacing.chunk_size,
                    patience = self.pacing.patience,
                    "starting GA run"
                );
                self.initialize();
            }
            _ => {
                self.reproduce();
                self.generation += 1;
            }
        }

        self.evaluate_population();
        let report = self.record_generation();
        self.check_termination();
        Some(report)
    }

    /// Runs up to one chunk of generations, reporting each, then yields.
    ///
    /// Signals completion exactly once, on the call that observes
    /// termination.
    pub fn run_chunk<O: GenerationObserver + ?Sized>(&mut self, observer: &mut O) -> ChunkStatus {
        for _ in 0..self.pacing.chunk_size {
            match self.step() {
                Some(report) => observer.on_generation(&report),
                None => break,
            }
            if self.is_terminated() {
                break;
            }
        }

        if self.is_terminated() {
            if !self.completion_signalled {
                self.completion_signalled = true;
                observer.on_complete(&self.outcome());
            }
            ChunkStatus::Completed
        } else {
            trace!(generation = self.generation, "yielding to host");
            ChunkStatus::Yielded
        }
    }

    /// Snapshot of the run result so far.
    ///
    /// A run that has not terminated is reported as cancelled.
    pub fn outcome(&self) -> GaOutcome {
        GaOutcome {
            best: self.best_or_input(),
            generations: self.generation,
            stop_reason: self.stop_reason.unwrap_or(StopReason::Cancelled),
            history: self.history.clone(),
        }
    }

    /// Consumes the runner, returning the run result.
    pub fn into_outcome(self) -> GaOutcome {
        let best = self.best_or_input();
        GaOutcome {
            best,
            generations: self.generation,
            stop_reason: self.stop_reason.unwrap_or(StopReason::Cancelled),
            history: self.history,
        }
    }

    fn best_or_input(&self) -> TaskChromosome {
        self.best
            .clone()
            .unwrap_or_else(|| TaskChromosome::new(self.problem.tasks.clone()))
    }

    fn initialize(&mut self) {
        self.phase = GaPhase::Initializing;
        self.population = (0..self.config.population_size)
            .map(|_| self.problem.create_individual(&mut self.rng))
            .collect();
    }

    fn evaluate_population(&mut self) {
        self.phase = GaPhase::Evaluating;
        for individual in self.population.iter_mut().filter(|c| !c.is_evaluated()) {
            self.problem.evaluate(individual);
        }
    }

    fn reproduce(&mut self) {
        self.phase = GaPhase::Reproducing;
        let size = self.config.population_size;
        let mut next = select_elites(&self.population, elite_count(size));

        while next.len() < size {
            let p1 = tournament_select(&self.population, TOURNAMENT_SIZE, &mut self.rng);
            let p2 = tournament_select(&self.population, TOURNAMENT_SIZE, &mut self.rng);

            let (mut c1, mut c2) = if self.rng.random_bool(self.config.crossover_rate) {
                self.problem.crossover(p1, p2, &mut self.rng)
            } else {
                (p1.clone(), p2.clone())
            };

            if self.rng.random_bool(self.config.mutation_rate) {
                self.problem.mutate(&mut c1, &mut self.rng);
            }
            if self.rng.random_bool(self.config.mutation_rate) {
                self.problem.mutate(&mut c2, &mut self.rng);
            }

            next.push(c1);
            if next.len() < size {
                next.push(c2);
            }
        }

        self.population = next;
    }

    fn record_generation(&mut self) -> GenerationReport {
        let stats = PopulationStats::from_population(&self.population);
        let previous_best = self.best.as_ref().map(TaskChromosome::fitness);

        if let Some(candidate) = fittest(&self.population) {
            if previous_best.map_or(true, |best| candidate.fitness() < best) {
                self.best = Some(candidate.clone());
            }
        }

        let best = self.best_or_input();
        if let Some(previous) = previous_best {
            if previous - best.fitness() > self.config.early_stop_threshold {
                self.stagnant_generations = 0;
            } else {
                self.stagnant_generations += 1;
            }
        }

        let objective = best.objective().unwrap_or_default();
        debug!(
            generation = self.generation,
            best = best.fitness(),
            mean = stats.mean,
            worst = stats.worst,
            stagnant = self.stagnant_generations,
            "generation evaluated"
        );

        let report = GenerationReport {
            generation: self.generation,
            fitness: best.fitness(),
            makespan: objective.makespan,
            idle_distance: objective.idle_distance,
            best,
            stats,
        };
        self.history.push(report.clone());
        report
    }

    fn check_termination(&mut self) {
        let reason = if self.generation >= self.config.max_generations {
            Some(StopReason::MaxGenerations)
        } else if self.stagnant_generations >= self.pacing.patience {
            Some(StopReason::EarlyStop)
        } else {
            None
        };

        if let Some(reason) = reason {
            self.phase = GaPhase::Terminated;
            self.stop_reason = Some(reason);
            info!(
                generation = self.generation,
                best = self.best.as_ref().map(TaskChromosome::fitness),
                reason = ?reason,
                "GA run terminated"
            );
        }
    }
}

impl Iterator for GaRunner {
    type Item = GenerationReport;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

/// Runs the GA to termination, yielding to `observer` between chunks.
///
/// Fails fast on an empty task list or invalid configuration before any
/// population work begins.
pub fn run_ga<O: GenerationObserver + ?Sized>(
    config: GaConfig,
    tasks: &[Task],
    observer: &mut O,
) -> Result<GaOutcome, ScheduleError> {
    let mut runner = GaRunner::new(config, tasks)?;
    while runner.run_chunk(observer) == ChunkStatus::Yielded {
        observer.on_yield();
    }
    Ok(runner.into_outcome())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{evaluate, schedule_fifo};

    fn sample_tasks(count: u32) -> Vec<Task> {
        (1..=count)
            .map(|id| {
                let x = ((id * 7) % 13) as i32;
                let y = ((id * 5) % 11) as i32;
                let task = match id % 3 {
                    0 => Task::delivery(id, x, y),
                    1 => Task::pickup(id, x, y),
                    _ => Task::pickup_delivery(id, x, y),
                };
                task.with_processing_time(1 + id % 4)
            })
            .collect()
    }

    fn config() -> GaConfig {
        GaConfig::default()
            .with_population_size(20)
            .with_max_generations(30)
            .with_seed(42)
    }

    #[derive(Default)]
    struct CountingObserver {
        generations: Vec<usize>,
        best: Vec<f64>,
        completions: usize,
        yields: usize,
    }

    impl GenerationObserver for CountingObserver {
        fn on_generation(&mut self, report: &GenerationReport) {
            self.generations.push(report.generation);
            self.best.push(report.fitness);
        }

        fn on_complete(&mut self, _outcome: &GaOutcome) {
            self.completions += 1;
        }

        fn on_yield(&mut self) {
            self.yields += 1;
        }
    }

    #[test]
    fn test_empty_tasks_fail_fast() {
        let err = GaRunner::new(config(), &[]).unwrap_err();
        assert_eq!(err, ScheduleError::EmptyTaskList);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let tasks = sample_tasks(5);
        assert_eq!(
            GaRunner::new(config().with_population_size(0), &tasks).unwrap_err(),
            ScheduleError::InvalidPopulationSize(0)
        );
        assert_eq!(
            GaRunner::new(config().with_max_generations(0), &tasks).unwrap_err(),
            ScheduleError::InvalidGenerationBound(0)
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let tasks = vec![Task::delivery(1, 0, 0), Task::pickup(1, 1, 1)];
        assert!(matches!(
            GaRunner::new(config(), &tasks),
            Err(ScheduleError::InvalidTasks(_))
        ));
    }

    #[test]
    fn test_phase_transitions() {
        let tasks = sample_tasks(6);
        let mut runner = GaRunner::new(config(), &tasks).unwrap();
        assert_eq!(runner.phase(), GaPhase::Idle);
        assert!(runner.population().is_empty());

        let first = runner.step().unwrap();
        assert_eq!(first.generation, 0);
        assert_eq!(runner.phase(), GaPhase::Evaluating);
        assert_eq!(runner.population().len(), 20);

        let second = runner.step().unwrap();
        assert_eq!(second.generation, 1);
    }

    #[test]
    fn test_permutation_invariant_every_generation() {
        let tasks = sample_tasks(12);
        let mut runner = GaRunner::new(config().with_mutation_rate(0.5), &tasks).unwrap();

        while let Some(report) = runner.step() {
            assert!(report.best.is_permutation_of(&tasks));
            for individual in runner.population() {
                assert!(individual.is_permutation_of(&tasks));
                assert!(individual.is_evaluated());
            }
        }
    }

    #[test]
    fn test_best_fitness_is_monotone() {
        let tasks = sample_tasks(14);
        let runner = GaRunner::new(config().with_max_generations(50), &tasks).unwrap();
        let best: Vec<f64> = runner.map(|r| r.fitness).collect();

        assert!(!best.is_empty());
        for pair in best.windows(2) {
            assert!(pair[1] <= pair[0], "best regressed: {} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_report_matches_best_chromosome() {
        let tasks = sample_tasks(8);
        let mut runner = GaRunner::new(config(), &tasks).unwrap();
        let report = runner.step().unwrap();

        let obj = evaluate(report.best.tasks());
        assert!((report.makespan - obj.makespan).abs() < 1e-9);
        assert!((report.idle_distance - obj.idle_distance).abs() < 1e-9);
        assert!((report.fitness - config().weights().fitness(&obj)).abs() < 1e-9);
        assert!(report.stats.best <= report.stats.mean);
        assert!(report.stats.mean <= report.stats.worst);
        assert!(report.stats.std_dev >= 0.0);
    }

    #[test]
    fn test_termination_bound_and_single_completion() {
        let tasks = sample_tasks(10);
        let mut observer = CountingObserver::default();
        let outcome = run_ga(config().with_max_generations(12), &tasks, &mut observer).unwrap();

        assert!(observer.generations.len() <= 13);
        assert_eq!(observer.completions, 1);
        assert_eq!(
            observer.generations,
            (0..observer.generations.len()).collect::<Vec<_>>()
        );
        assert_eq!(outcome.history.len(), observer.generations.len());
        assert_eq!(outcome.generations + 1, observer.generations.len());
        assert!(outcome.stop_reason != StopReason::Cancelled);
    }

    #[test]
    fn test_runs_to_max_without_early_stop() {
        let tasks = sample_tasks(10);
        let cfg = config()
            .with_max_generations(7)
            .with_early_stop_generations(1000);
        let outcome = run_ga(cfg, &tasks, &mut NoopObserver).unwrap();

        assert_eq!(outcome.stop_reason, StopReason::MaxGenerations);
        assert_eq!(outcome.history.len(), 8);
    }

    #[test]
    fn test_early_stop_fires_on_stagnation() {
        // A single task cannot improve after generation 0.
        let tasks = vec![Task::delivery(1, 9, 9)];
        let cfg = config()
            .with_max_generations(100)
            .with_early_stop_generations(4);
        let outcome = run_ga(cfg, &tasks, &mut NoopObserver).unwrap();

        assert_eq!(outcome.stop_reason, StopReason::EarlyStop);
        assert_eq!(outcome.generations, 4);
    }

    #[test]
    fn test_chunks_yield_between_generations() {
        let tasks = sample_tasks(6);
        let cfg = config()
            .with_max_generations(9)
            .with_chunk_size(3)
            .with_early_stop_generations(1000);
        let mut runner = GaRunner::new(cfg, &tasks).unwrap();
        let mut observer = CountingObserver::default();

        // 10 generations (0..=9) in chunks of 3: 3, 3, 3, 1
        assert_eq!(runner.run_chunk(&mut observer), ChunkStatus::Yielded);
        assert_eq!(observer.generations, vec![0, 1, 2]);
        assert_eq!(runner.run_chunk(&mut observer), ChunkStatus::Yielded);
        assert_eq!(runner.run_chunk(&mut observer), ChunkStatus::Yielded);
        assert_eq!(runner.run_chunk(&mut observer), ChunkStatus::Completed);
        assert_eq!(observer.generations.len(), 10);
        assert_eq!(observer.completions, 1);

        // Resuming a finished run does nothing and does not re-signal
        assert_eq!(runner.run_chunk(&mut observer), ChunkStatus::Completed);
        assert_eq!(observer.completions, 1);
        assert_eq!(observer.generations.len(), 10);
    }

    #[test]
    fn test_run_ga_yields_between_chunks() {
        let tasks = sample_tasks(6);
        let cfg = config()
            .with_max_generations(9)
            .with_chunk_size(3)
            .with_early_stop_generations(1000);
        let mut observer = CountingObserver::default();
        run_ga(cfg, &tasks, &mut observer).unwrap();
        assert_eq!(observer.yields, 3);
    }

    #[test]
    fn test_cancelled_run_outcome() {
        let tasks = sample_tasks(6);
        let mut runner = GaRunner::new(config().with_chunk_size(2), &tasks).unwrap();
        runner.run_chunk(&mut NoopObserver);

        let outcome = runner.into_outcome();
        assert_eq!(outcome.stop_reason, StopReason::Cancelled);
        assert_eq!(outcome.history.len(), 2);
        assert!(outcome.best.is_permutation_of(&tasks));
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let tasks = sample_tasks(10);
        let a = run_ga(config(), &tasks, &mut NoopObserver).unwrap();
        let b = run_ga(config(), &tasks, &mut NoopObserver).unwrap();
        assert_eq!(a.best.ids(), b.best.ids());
        assert_eq!(a.generations, b.generations);
    }

    #[test]
    fn test_closure_observer() {
        let tasks = sample_tasks(5);
        let mut seen = 0usize;
        run_ga(config().with_max_generations(3), &tasks, &mut |_: &GenerationReport| {
            seen += 1
        })
        .unwrap();
        assert!((1..=4).contains(&seen));
    }

    #[test]
    fn test_ga_not_worse_than_fifo() {
        for count in [5, 9, 12, 18, 25] {
            let tasks = sample_tasks(count);
            let weights = GaConfig::default().weights();
            let fifo = weights.fitness(&evaluate(&schedule_fifo(&tasks)));

            for seed in [1, 7, 42] {
                let cfg = GaConfig::default().with_seed(seed);
                let outcome = run_ga(cfg, &tasks, &mut NoopObserver).unwrap();
                assert!(
                    outcome.best.fitness() <= fifo + 1e-9,
                    "{count} tasks, seed {seed}: GA {} worse than FIFO {fifo}",
                    outcome.best.fitness()
                );
                assert!(outcome.best.is_permutation_of(&tasks));
            }
        }
    }
}
