//! Aggregates over habit and task logs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::habit::HabitEntry;
use crate::model::task::{TaskEntry, TaskPriority};

/// Completed and open task counts for one priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub completed: usize,
    pub open: usize,
}

/// Share of completed habit entries, as a percentage of all entries.
///
/// `None` for an empty log; an empty log has no rate, not a rate of zero.
pub fn completion_rate(entries: &[HabitEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let completed = entries.iter().filter(|entry| entry.completed).count();
    Some(completed as f64 * 100.0 / entries.len() as f64)
}

/// How many entries carry each streak value, keyed by streak ascending.
pub fn streak_distribution(entries: &[HabitEntry]) -> BTreeMap<u32, usize> {
    let mut distribution = BTreeMap::new();
    for entry in entries {
        *distribution.entry(entry.streak).or_insert(0) += 1;
    }
    distribution
}

/// Completed and open task counts per priority, keyed most urgent first.
pub fn priority_breakdown(tasks: &[TaskEntry]) -> BTreeMap<TaskPriority, PriorityCounts> {
    let mut breakdown: BTreeMap<TaskPriority, PriorityCounts> = BTreeMap::new();
    for task in tasks {
        let counts = breakdown.entry(task.priority).or_default();
        if task.completed {
            counts.completed += 1;
        } else {
            counts.open += 1;
        }
    }
    breakdown
}
