//! Task recording and daily seeding workflow.
//!
//! # Responsibility
//! - Validate task input and append entries through the task repository.
//! - Seed the fixed daily system task once per owner and day.
//!
//! # Invariants
//! - Descriptions are trimmed before storage; blank descriptions are
//!   rejected.
//! - Feedback is trimmed, and all-whitespace feedback collapses to none.
//! - Seeding matches on the exact description text, so a user entry with the
//!   same wording on the same date counts as already seeded.

use chrono::NaiveDate;
use log::info;

use crate::model::account::AccountId;
use crate::model::task::{NewTaskEntry, TaskEntry, TaskPriority};
use crate::repo::{task_repo::TaskRepository, RepoError};

/// Description of the task seeded for every account each day.
pub const DAILY_TASK_DESCRIPTION: &str = "Review your top 3 priorities for today";

/// Errors surfaced by the task workflow.
#[derive(Debug)]
pub enum TaskServiceError {
    /// The description was empty after trimming. Carries the raw input.
    InvalidDescription(String),
    /// Storage-layer failure.
    Repo(RepoError),
}

impl std::fmt::Display for TaskServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskServiceError::InvalidDescription(description) => {
                write!(f, "invalid task description: `{description}`")
            }
            TaskServiceError::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TaskServiceError::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        TaskServiceError::Repo(value)
    }
}

/// A user-authored task observation to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTaskRequest {
    pub owner: AccountId,
    pub description: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub priority: TaskPriority,
    pub feedback: Option<String>,
}

impl RecordTaskRequest {
    /// Builds an open, medium-priority request with no feedback.
    pub fn new(owner: AccountId, description: impl Into<String>, date: NaiveDate) -> Self {
        RecordTaskRequest {
            owner,
            description: description.into(),
            date,
            completed: false,
            priority: TaskPriority::default(),
            feedback: None,
        }
    }
}

/// Task recording and seeding over any [`TaskRepository`].
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        TaskService { repo }
    }

    /// Seeds the daily system task for `owner` on `today` if it is not there
    /// yet. Returns whether an entry was inserted.
    pub fn ensure_daily_task(
        &mut self,
        owner: AccountId,
        today: NaiveDate,
    ) -> Result<bool, TaskServiceError> {
        let seeded = self
            .repo
            .seed_daily_task(owner, today, DAILY_TASK_DESCRIPTION)?;
        if seeded {
            info!("event=daily_task_seeded module=task status=ok account_id={owner} date={today}");
        }
        Ok(seeded)
    }

    /// Records one user-authored task entry. Returns the stored entry.
    pub fn record_task(
        &self,
        request: &RecordTaskRequest,
    ) -> Result<TaskEntry, TaskServiceError> {
        let description = request.description.trim();
        if description.is_empty() {
            return Err(TaskServiceError::InvalidDescription(
                request.description.clone(),
            ));
        }
        let entry = NewTaskEntry {
            owner: request.owner,
            description: description.to_string(),
            date: request.date,
            completed: request.completed,
            priority: request.priority,
            feedback: normalize_feedback(request.feedback.as_deref()),
        };
        let id = self.repo.append_task_entry(&entry)?;
        Ok(TaskEntry {
            id,
            owner: entry.owner,
            description: entry.description,
            date: entry.date,
            completed: entry.completed,
            priority: entry.priority,
            feedback: entry.feedback,
        })
    }

    /// Full task log for an owner, in insertion order.
    pub fn task_log(&self, owner: AccountId) -> Result<Vec<TaskEntry>, TaskServiceError> {
        Ok(self.repo.task_log(owner)?)
    }
}

fn normalize_feedback(feedback: Option<&str>) -> Option<String> {
    let trimmed = feedback?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
