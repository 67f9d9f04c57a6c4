//! Task log entry records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::account::AccountId;
use crate::model::EntryId;

/// Task priority, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// One stored task observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub id: EntryId,
    pub owner: AccountId,
    pub description: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub priority: TaskPriority,
    /// Optional free-form reflection attached when the task was logged.
    pub feedback: Option<String>,
}

/// A task observation about to be appended, before storage assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskEntry {
    pub owner: AccountId,
    pub description: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub priority: TaskPriority,
    pub feedback: Option<String>,
}

impl NewTaskEntry {
    /// Builds an open, medium-priority draft with no feedback. Callers adjust
    /// the public fields for anything else.
    pub fn new(owner: AccountId, description: impl Into<String>, date: NaiveDate) -> Self {
        NewTaskEntry {
            owner,
            description: description.into(),
            date,
            completed: false,
            priority: TaskPriority::default(),
            feedback: None,
        }
    }
}
