//! Task model.
//!
//! A task is a single stop on the carrier's route: drop off cargo,
//! collect cargo, or both at once.

use serde::{Deserialize, Serialize};

use super::Position;

/// Processing time applied when none is given.
pub const DEFAULT_PROCESSING_TIME: u32 = 5;

/// What the carrier does at a task's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskKind {
    /// Drop cargo at the station; occupies a storage slot.
    Delivery,
    /// Collect cargo from the station; frees a storage slot.
    Pickup,
    /// Collect and drop in one stop; needs a free slot to swap through.
    PickupDelivery,
}

impl TaskKind {
    /// Slot usage after admitting a task of this kind into a capacity group.
    ///
    /// Delivery adds one, Pickup removes one (never below zero),
    /// PickupDelivery leaves the count unchanged.
    pub fn apply_to_slots(self, slots_used: usize) -> usize {
        match self {
            TaskKind::Delivery => slots_used + 1,
            TaskKind::Pickup => slots_used.saturating_sub(1),
            TaskKind::PickupDelivery => slots_used,
        }
    }
}

/// A task to be scheduled.
///
/// Tasks are immutable values; schedulers only reorder them.
///
/// # Time Representation
/// Processing time is in abstract duration units, the same units as one
/// grid cell of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (positive).
    pub id: u32,
    /// Task kind.
    pub kind: TaskKind,
    /// Where the task is performed.
    pub position: Position,
    /// Time spent at the position once arrived.
    #[serde(default = "default_processing_time")]
    pub processing_time: u32,
}

fn default_processing_time() -> u32 {
    DEFAULT_PROCESSING_TIME
}

impl Task {
    /// Creates a task with the default processing time.
    pub fn new(id: u32, kind: TaskKind, position: impl Into<Position>) -> Self {
        Self {
            id,
            kind,
            position: position.into(),
            processing_time: DEFAULT_PROCESSING_TIME,
        }
    }

    /// Creates a delivery task at `(x, y)`.
    pub fn delivery(id: u32, x: i32, y: i32) -> Self {
        Self::new(id, TaskKind::Delivery, (x, y))
    }

    /// Creates a pickup task at `(x, y)`.
    pub fn pickup(id: u32, x: i32, y: i32) -> Self {
        Self::new(id, TaskKind::Pickup, (x, y))
    }

    /// Creates a combined pickup-delivery task at `(x, y)`.
    pub fn pickup_delivery(id: u32, x: i32, y: i32) -> Self {
        Self::new(id, TaskKind::PickupDelivery, (x, y))
    }

    /// Sets the processing time.
    pub fn with_processing_time(mut self, processing_time: u32) -> Self {
        self.processing_time = processing_time;
        self
    }
}
