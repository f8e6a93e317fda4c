//! Constrained-greedy FIFO baseline.
//!
//! # Algorithm
//!
//! Builds capacity groups from the remaining tasks, one pass per group:
//!
//! 1. Start the group with `slots_used = 0` and scan remaining tasks front to back.
//! 2. A PickupDelivery seen at `slots_used >= 3` is skipped; it stays in the
//!    remainder and scanning continues with later tasks.
//! 3. Any other task seen at `slots_used >= 4` closes the group.
//! 4. Otherwise the task joins the group and `slots_used` is updated
//!    (Delivery +1, Pickup -1 floored at 0, PickupDelivery unchanged).
//! 5. A pass that admits nothing ends grouping; unadmitted tasks are the remainder.
//!
//! This is not plain FIFO: the skip/stop asymmetry lets later feasible tasks
//! overtake a blocked PickupDelivery within the same pass.
//!
//! # Complexity
//! O(n²) in the worst case (one pass over the remainder per group).

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{SLOT_COUNT, Task, TaskKind};

/// Slot count at which a PickupDelivery is skipped.
const PICKUP_DELIVERY_LIMIT: usize = SLOT_COUNT - 1;

/// Output of capacity grouping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CapacityGroups {
    /// Groups in execution order.
    pub groups: Vec<Vec<Task>>,
    /// Tasks left over when a pass made no progress.
    pub remainder: Vec<Task>,
}

impl CapacityGroups {
    /// Groups concatenated into one ordering (remainder excluded).
    pub fn flatten(&self) -> Vec<Task> {
        self.groups.iter().flatten().copied().collect()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Whether every input task was placed in a group.
    pub fn is_complete(&self) -> bool {
        self.remainder.is_empty()
    }
}

/// Groups tasks by the carrier capacity policy, preserving arrival order
/// except where a PickupDelivery is skipped.
///
/// Shared by the FIFO baseline and GA chromosome construction.
pub fn group_by_capacity(tasks: &[Task]) -> CapacityGroups {
    let mut remaining: Vec<Task> = tasks.to_vec();
    let mut groups = Vec::new();

    while !remaining.is_empty() {
        let mut group = Vec::new();
        let mut slots_used = 0usize;
        let mut skipped = Vec::new();
        let mut rest = remaining.into_iter();

        for task in rest.by_ref() {
            if task.kind == TaskKind::PickupDelivery && slots_used >= PICKUP_DELIVERY_LIMIT {
                skipped.push(task);
                continue;
            }
            if slots_used >= SLOT_COUNT {
                skipped.push(task);
                break;
            }
            slots_used = task.kind.apply_to_slots(slots_used);
            group.push(task);
        }
        skipped.extend(rest);
        remaining = skipped;

        if group.is_empty() {
            warn!(
                remaining = remaining.len(),
                "capacity grouping made no progress; leaving tasks unscheduled"
            );
            break;
        }
        groups.push(group);
    }

    CapacityGroups {
        groups,
        remainder: remaining,
    }
}

/// Deterministic FIFO baseline scheduler.
///
/// # Example
///
/// ```
/// use amr_schedule::models::Task;
/// use amr_schedule::scheduler::FifoScheduler;
///
/// let tasks = vec![
///     Task::delivery(1, 5, 5),
///     Task::delivery(2, 6, 5),
///     Task::delivery(3, 7, 5),
///     Task::delivery(4, 8, 5),
///     Task::delivery(5, 9, 5),
/// ];
/// let groups = FifoScheduler::new().group(&tasks);
/// assert_eq!(groups.group_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FifoScheduler;

impl FifoScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Groups tasks by capacity.
    pub fn group(&self, tasks: &[Task]) -> CapacityGroups {
        group_by_capacity(tasks)
    }

    /// Returns the flattened grouped ordering.
    pub fn schedule(&self, tasks: &[Task]) -> Vec<Task> {
        self.group(tasks).flatten()
    }
}

/// Schedules tasks with the FIFO baseline.
pub fn schedule_fifo(tasks: &[Task]) -> Vec<Task> {
    FifoScheduler::new().schedule(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tasks: &[Task]) -> Vec<u32> {
        tasks.iter().map(|t| t.id).collect()
    }

    /// Replays the admission rule and checks capacity at every step.
    fn assert_group_respects_capacity(group: &[Task]) {
        let mut slots_used = 0usize;
        for task in group {
            if task.kind == TaskKind::PickupDelivery {
                assert!(slots_used < 3, "PickupDelivery admitted at {slots_used}");
            }
            assert!(slots_used < 4, "task admitted with full storage");
            slots_used = task.kind.apply_to_slots(slots_used);
            assert!(slots_used <= 4);
        }
    }

    #[test]
    fn test_deliveries_split_at_four() {
        let tasks: Vec<Task> = (1..=5).map(|id| Task::delivery(id, id as i32, 0)).collect();
        let groups = group_by_capacity(&tasks);

        assert_eq!(groups.group_count(), 2);
        assert_eq!(ids(&groups.groups[0]), vec![1, 2, 3, 4]);
        assert_eq!(ids(&groups.groups[1]), vec![5]);
        assert!(groups.is_complete());
    }

    #[test]
    fn test_pickup_delivery_only_list_is_one_group() {
        // PickupDelivery never changes slots_used, so nothing ever blocks.
        let tasks: Vec<Task> = (1..=5).map(|id| Task::pickup_delivery(id, 0, id as i32)).collect();
        let groups = group_by_capacity(&tasks);

        assert_eq!(groups.group_count(), 1);
        assert_eq!(ids(&groups.groups[0]), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_pickup_delivery_skipped_then_overtaken() {
        let tasks = vec![
            Task::delivery(1, 1, 0),
            Task::delivery(2, 2, 0),
            Task::delivery(3, 3, 0),
            Task::pickup_delivery(4, 4, 0), // skipped at 3
            Task::pickup(5, 5, 0),          // 3 -> 2
            Task::pickup_delivery(6, 6, 0), // admitted at 2
        ];
        let groups = group_by_capacity(&tasks);

        assert_eq!(ids(&groups.groups[0]), vec![1, 2, 3, 5, 6]);
        assert_eq!(ids(&groups.groups[1]), vec![4]);
        assert_eq!(ids(&schedule_fifo(&tasks)), vec![1, 2, 3, 5, 6, 4]);
    }

    #[test]
    fn test_skip_does_not_close_group_but_full_does() {
        let tasks = vec![
            Task::delivery(1, 0, 0),
            Task::delivery(2, 0, 0),
            Task::delivery(3, 0, 0),
            Task::delivery(4, 0, 0),
            Task::pickup_delivery(5, 0, 0), // skipped at 4, scanning continues
            Task::pickup(6, 0, 0),          // closes group at 4
            Task::delivery(7, 0, 0),
        ];
        let groups = group_by_capacity(&tasks);

        assert_eq!(groups.group_count(), 2);
        assert_eq!(ids(&groups.groups[0]), vec![1, 2, 3, 4]);
        assert_eq!(ids(&groups.groups[1]), vec![5, 6, 7]);
    }

    #[test]
    fn test_pickup_relieves_capacity() {
        let tasks = vec![
            Task::delivery(1, 0, 0),
            Task::delivery(2, 0, 0),
            Task::delivery(3, 0, 0),
            Task::delivery(4, 0, 0),
            Task::pickup(5, 0, 0),
        ];
        // At 4 the pickup is blocked by the full-storage stop rule.
        let groups = group_by_capacity(&tasks);
        assert_eq!(ids(&groups.groups[1]), vec![5]);

        let mixed = vec![
            Task::delivery(1, 0, 0),
            Task::pickup(2, 0, 0),
            Task::delivery(3, 0, 0),
            Task::delivery(4, 0, 0),
            Task::delivery(5, 0, 0),
            Task::delivery(6, 0, 0),
        ];
        let groups = group_by_capacity(&mixed);
        assert_eq!(groups.group_count(), 1);
    }

    #[test]
    fn test_groups_respect_capacity() {
        let tasks = vec![
            Task::pickup_delivery(1, 0, 0),
            Task::delivery(2, 0, 0),
            Task::delivery(3, 0, 0),
            Task::delivery(4, 0, 0),
            Task::pickup_delivery(5, 0, 0),
            Task::delivery(6, 0, 0),
            Task::pickup(7, 0, 0),
            Task::pickup_delivery(8, 0, 0),
            Task::delivery(9, 0, 0),
            Task::delivery(10, 0, 0),
        ];
        let groups = group_by_capacity(&tasks);

        for group in &groups.groups {
            assert_group_respects_capacity(group);
        }
        let mut all = ids(&groups.flatten());
        all.sort_unstable();
        assert_eq!(all, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_fifo_deterministic() {
        let tasks = vec![
            Task::delivery(3, 1, 1),
            Task::pickup_delivery(1, 2, 2),
            Task::delivery(2, 3, 3),
            Task::delivery(5, 4, 4),
            Task::pickup(4, 5, 5),
        ];
        assert_eq!(schedule_fifo(&tasks), schedule_fifo(&tasks));
    }

    #[test]
    fn test_empty_input() {
        let groups = group_by_capacity(&[]);
        assert_eq!(groups.group_count(), 0);
        assert!(schedule_fifo(&[]).is_empty());
    }
}
