use serde::Serialize;

use crate::models::{Priority, Task};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PriorityShare {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

/// Aggregates over the entire collection, ignoring any active view filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TaskStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    /// `round(100 * completed / total)`, 0 for an empty collection.
    pub percent_complete: u8,
    /// Percentage of the collection at each priority, 0.0 when empty.
    pub share: PriorityShare,
}

/// Recomputed wholesale after every mutation rather than patched
/// incrementally, so the numbers can never drift from the collection.
pub fn stats(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let percent_complete = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    };
    let share_of = |priority: Priority| {
        if total == 0 {
            return 0.0;
        }
        let count = tasks.iter().filter(|t| t.priority == priority).count();
        count as f64 / total as f64 * 100.0
    };
    TaskStats {
        total,
        active: total - completed,
        completed,
        percent_complete,
        share: PriorityShare {
            high: share_of(Priority::High),
            medium: share_of(Priority::Medium),
            low: share_of(Priority::Low),
        },
    }
}
