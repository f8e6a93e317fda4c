//! Carrier (AMR) state and storage transitions.
//!
//! # Storage Model
//!
//! The carrier has a fixed row of [`SLOT_COUNT`] storage slots. Slots are
//! always scanned in index order: deliveries fill the first empty slot,
//! pickups free the first occupied slot. Pickups are matched by slot order,
//! not by which task originally loaded the cargo.

use serde::{Deserialize, Serialize};

use super::{HOME_POSITION, Position, Task, TaskKind};

/// Number of onboard storage slots.
pub const SLOT_COUNT: usize = 4;

/// Cargo held in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOccupant {
    /// Task that loaded the cargo.
    pub task_id: u32,
    /// Kind of that task.
    pub kind: TaskKind,
}

/// One storage slot; empty when `occupant` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageSlot {
    /// Cargo in the slot, if any.
    pub occupant: Option<SlotOccupant>,
}

impl StorageSlot {
    /// Whether the slot holds cargo.
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Slot indices touched by a single task execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageEffect {
    /// Slot emptied by the task.
    pub freed: Option<usize>,
    /// Slot filled by the task.
    pub occupied: Option<usize>,
}

impl StorageEffect {
    /// Whether the task left storage untouched.
    pub fn is_noop(&self) -> bool {
        self.freed.is_none() && self.occupied.is_none()
    }
}

/// Mutable carrier state: position plus storage.
///
/// Owned exclusively by one execution context. Cloning yields an
/// independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    position: Position,
    slots: [StorageSlot; SLOT_COUNT],
}

impl Carrier {
    /// Creates a carrier at the home position with empty storage.
    pub fn new() -> Self {
        Self::at(HOME_POSITION)
    }

    /// Creates a carrier at `position` with empty storage.
    pub fn at(position: Position) -> Self {
        Self {
            position,
            slots: [StorageSlot::default(); SLOT_COUNT],
        }
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Storage slots in scan order.
    pub fn slots(&self) -> &[StorageSlot; SLOT_COUNT] {
        &self.slots
    }

    /// Number of occupied slots (0..=4).
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    /// Number of empty slots.
    pub fn free_count(&self) -> usize {
        SLOT_COUNT - self.occupied_count()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.occupied_count() == SLOT_COUNT
    }

    /// Whether the carrier has room for the task.
    ///
    /// Delivery and Pickup need fewer than 4 occupied slots;
    /// PickupDelivery needs fewer than 3. Advisory only: the GA fitness
    /// evaluation never consults it.
    pub fn can_handle_task(&self, task: &Task) -> bool {
        let occupied = self.occupied_count();
        match task.kind {
            TaskKind::Delivery | TaskKind::Pickup => occupied < SLOT_COUNT,
            TaskKind::PickupDelivery => occupied < SLOT_COUNT - 1,
        }
    }

    /// Moves to the task and applies its storage transition.
    ///
    /// Never fails; when no eligible slot exists the storage is left as is.
    /// A PickupDelivery on an empty carrier frees nothing and therefore
    /// loads nothing.
    pub fn execute_task(&mut self, task: &Task) -> StorageEffect {
        self.position = task.position;

        match task.kind {
            TaskKind::Delivery => StorageEffect {
                freed: None,
                occupied: self.occupy_first_empty(task),
            },
            TaskKind::Pickup => StorageEffect {
                freed: self.free_first_occupied(),
                occupied: None,
            },
            TaskKind::PickupDelivery => {
                let freed = self.free_first_occupied();
                let occupied = match freed {
                    Some(_) => self.occupy_first_empty(task),
                    None => None,
                };
                StorageEffect { freed, occupied }
            }
        }
    }

    /// Returns to home with empty storage.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn occupy_first_empty(&mut self, task: &Task) -> Option<usize> {
        let idx = self.slots.iter().position(|s| !s.is_occupied())?;
        self.slots[idx].occupant = Some(SlotOccupant {
            task_id: task.id,
            kind: task.kind,
        });
        Some(idx)
    }

    fn free_first_occupied(&mut self) -> Option<usize> {
        let idx = self.slots.iter().position(|s| s.is_occupied())?;
        self.slots[idx].occupant = None;
        Some(idx)
    }
}

impl Default for Carrier {
    fn default() -> Self {
        Self::new()
    }
}
