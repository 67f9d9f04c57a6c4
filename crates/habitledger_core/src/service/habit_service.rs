//! Habit recording workflow.
//!
//! # Responsibility
//! - Validate habit names and drive streak-carrying appends through the
//!   habit repository.
//!
//! # Invariants
//! - Habit names are trimmed before storage and matching; case is preserved,
//!   so `Run` and `run` are distinct habits.
//! - The streak rule is fixed per service instance.

use chrono::NaiveDate;
use log::debug;

use crate::model::account::AccountId;
use crate::model::habit::HabitEntry;
use crate::model::streak::StreakRule;
use crate::repo::{habit_repo::HabitRepository, RepoError};

/// Errors surfaced by the habit workflow.
#[derive(Debug)]
pub enum HabitServiceError {
    /// The habit name was empty after trimming. Carries the raw input.
    InvalidHabitName(String),
    /// Storage-layer failure.
    Repo(RepoError),
}

impl std::fmt::Display for HabitServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HabitServiceError::InvalidHabitName(name) => {
                write!(f, "invalid habit name: `{name}`")
            }
            HabitServiceError::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for HabitServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HabitServiceError::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for HabitServiceError {
    fn from(value: RepoError) -> Self {
        HabitServiceError::Repo(value)
    }
}

/// Habit recording over any [`HabitRepository`].
pub struct HabitService<R: HabitRepository> {
    repo: R,
    rule: StreakRule,
}

impl<R: HabitRepository> HabitService<R> {
    /// Builds a service using the default streak rule.
    pub fn new(repo: R) -> Self {
        HabitService {
            repo,
            rule: StreakRule::default(),
        }
    }

    /// Builds a service with an explicit streak rule.
    pub fn with_rule(repo: R, rule: StreakRule) -> Self {
        HabitService { repo, rule }
    }

    pub fn rule(&self) -> StreakRule {
        self.rule
    }

    /// Records one habit observation, attaching the streak computed from the
    /// habit's latest entry. Returns the stored entry.
    pub fn record_habit(
        &mut self,
        owner: AccountId,
        habit: &str,
        date: NaiveDate,
        completed: bool,
    ) -> Result<HabitEntry, HabitServiceError> {
        let name = habit.trim();
        if name.is_empty() {
            return Err(HabitServiceError::InvalidHabitName(habit.to_string()));
        }
        let entry = self
            .repo
            .record_with_streak(owner, name, date, completed, self.rule)?;
        debug!(
            "event=habit_recorded module=habit status=ok account_id={} entry_id={} streak={}",
            entry.owner, entry.id, entry.streak
        );
        Ok(entry)
    }

    /// Latest stored entry for a habit, if any.
    pub fn latest_entry(
        &self,
        owner: AccountId,
        habit: &str,
    ) -> Result<Option<HabitEntry>, HabitServiceError> {
        Ok(self.repo.latest_habit_entry(owner, habit.trim())?)
    }

    /// Full habit log for an owner, in insertion order.
    pub fn habit_log(&self, owner: AccountId) -> Result<Vec<HabitEntry>, HabitServiceError> {
        Ok(self.repo.habit_log(owner)?)
    }
}
