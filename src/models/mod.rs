//! AMR scheduling domain models.
//!
//! Provides the core data types for a single carrier executing
//! pickup and delivery tasks on a grid under a fixed storage capacity.
//!
//! # Domain Mappings
//!
//! | amr-schedule | Factory floor | Warehouse |
//! |--------------|---------------|-----------|
//! | Task | Work order at a station | Pick/put request |
//! | Position | Station cell | Rack location |
//! | Carrier | AMR | Tote robot |
//! | StorageSlot | Onboard bay | Tote slot |

mod carrier;
mod position;
mod task;

pub use carrier::{Carrier, SLOT_COUNT, SlotOccupant, StorageEffect, StorageSlot};
pub use position::{HOME_POSITION, Position};
pub use task::{DEFAULT_PROCESSING_TIME, Task, TaskKind};
