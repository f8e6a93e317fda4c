//! Execution replay and the session recorder boundary.
//!
//! The core never renders or persists anything. Hosts that animate a run
//! or export statistics implement [`SessionRecorder`] and receive:
//!
//! - one [`GenerationReport`] per GA generation, via [`RecordingObserver`]
//! - one [`StepRecord`] per executed task, via [`replay`]
//!
//! Recorders are owned by the caller and passed in explicitly.

use serde::{Deserialize, Serialize};

use crate::ga::{GaOutcome, GenerationObserver, GenerationReport};
use crate::models::{Carrier, StorageEffect, Task};

/// Carrier state around one executed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Zero-based position in the executed ordering.
    pub step: usize,
    /// Task executed.
    pub task: Task,
    /// Carrier before the task.
    pub before: Carrier,
    /// Carrier after the task.
    pub after: Carrier,
    /// Slots touched.
    pub effect: StorageEffect,
    /// Simulated time once the task is processed.
    pub elapsed: f64,
}

/// Sink for run progress and execution steps.
pub trait SessionRecorder {
    /// Records one GA generation.
    fn record_generation(&mut self, report: &GenerationReport);

    /// Records one executed task.
    fn record_step(&mut self, step: &StepRecord);
}

/// Recorder that keeps everything in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecorder {
    /// Recorded generations.
    pub generations: Vec<GenerationReport>,
    /// Recorded steps.
    pub steps: Vec<StepRecord>,
}

impl MemoryRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRecorder for MemoryRecorder {
    fn record_generation(&mut self, report: &GenerationReport) {
        self.generations.push(report.clone());
    }

    fn record_step(&mut self, step: &StepRecord) {
        self.steps.push(step.clone());
    }
}

/// Forwards GA generations to a recorder.
#[derive(Debug)]
pub struct RecordingObserver<'a, R: SessionRecorder + ?Sized> {
    recorder: &'a mut R,
    completed: bool,
}

impl<'a, R: SessionRecorder + ?Sized> RecordingObserver<'a, R> {
    /// Wraps a recorder.
    pub fn new(recorder: &'a mut R) -> Self {
        Self {
            recorder,
            completed: false,
        }
    }

    /// Whether the run has signalled completion.
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

impl<R: SessionRecorder + ?Sized> GenerationObserver for RecordingObserver<'_, R> {
    fn on_generation(&mut self, report: &GenerationReport) {
        self.recorder.record_generation(report);
    }

    fn on_complete(&mut self, _outcome: &GaOutcome) {
        self.completed = true;
    }
}

/// Executes `sequence` on a fresh carrier, recording every step.
///
/// Returns the final carrier state. Storage transitions follow
/// [`Carrier::execute_task`]; infeasible steps leave storage unchanged.
pub fn replay<R: SessionRecorder + ?Sized>(sequence: &[Task], recorder: &mut R) -> Carrier {
    let mut carrier = Carrier::new();
    let mut elapsed = 0.0;

    for (step, task) in sequence.iter().enumerate() {
        let before = carrier.clone();
        elapsed += before.position().distance_to(&task.position) + f64::from(task.processing_time);
        let effect = carrier.execute_task(task);

        recorder.record_step(&StepRecord {
            step,
            task: *task,
            before,
            after: carrier.clone(),
            effect,
            elapsed,
        });
    }

    carrier
}
