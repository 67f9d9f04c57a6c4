//! Habit log entry records.
//!
//! # Responsibility
//! - Shape a single habit observation: which habit, on what date, done or
//!   missed, and the streak attached when the entry was recorded.
//!
//! # Invariants
//! - Entries are immutable history. The streak on a stored entry is the value
//!   computed at append time and is never revised afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::account::AccountId;
use crate::model::EntryId;

/// One stored habit observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitEntry {
    pub id: EntryId,
    pub owner: AccountId,
    /// Habit name as entered, trimmed but case-preserved.
    pub habit: String,
    pub date: NaiveDate,
    pub completed: bool,
    /// Streak attached when this entry was appended.
    pub streak: u32,
}

/// A habit observation about to be appended, before storage assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabitEntry {
    pub owner: AccountId,
    pub habit: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub streak: u32,
}

impl NewHabitEntry {
    /// Builds a draft entry with streak 0; callers that want streak
    /// bookkeeping go through the recording path that computes it.
    pub fn new(
        owner: AccountId,
        habit: impl Into<String>,
        date: NaiveDate,
        completed: bool,
    ) -> Self {
        NewHabitEntry {
            owner,
            habit: habit.into(),
            date,
            completed,
            streak: 0,
        }
    }
}
