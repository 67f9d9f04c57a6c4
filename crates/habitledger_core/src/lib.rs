//! Core library for the habit ledger.
//!
//! # Responsibility
//! - Own the ledger domain: accounts, habit and task logs, streak
//!   bookkeeping, activity counters, and summary projections.
//! - Expose the storage, repository, and service layers behind one facade.
//!
//! # Invariants
//! - Habit and task logs are append-only history.
//! - All user-facing frontends go through the service layer; nothing outside
//!   this crate touches SQL.
//!
//! # See also
//! - docs/architecture/data-model.md
//! - docs/architecture/logging.md

pub mod db;
pub mod logging;
pub mod model;
pub mod quotes;
pub mod repo;
pub mod service;
pub mod stats;

pub use db::{open_ledger, open_ledger_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{Account, AccountId};
pub use model::activity::ActivityCounters;
pub use model::credential::{CredentialError, CredentialHash};
pub use model::habit::{HabitEntry, NewHabitEntry};
pub use model::streak::{next_streak, StreakRule};
pub use model::task::{NewTaskEntry, TaskEntry, TaskPriority};
pub use model::EntryId;
pub use quotes::motivational_quote;
pub use repo::account_repo::{AccountRepository, SqliteAccountRepository};
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::habit_repo::{HabitRepository, SqliteHabitRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::account_service::{normalize_email, AccountService, AccountServiceError};
pub use service::activity_service::ActivityService;
pub use service::habit_service::{HabitService, HabitServiceError};
pub use service::task_service::{
    RecordTaskRequest, TaskService, TaskServiceError, DAILY_TASK_DESCRIPTION,
};
pub use stats::summary::{completion_rate, priority_breakdown, streak_distribution, PriorityCounts};

/// Returns the crate version baked in at compile time.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn fresh_ledger_opens_with_latest_schema() {
        let conn = open_ledger_in_memory().expect("in-memory ledger should open");
        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .expect("user_version should be readable");
        assert_eq!(version, db::migrations::latest_version());
    }
}
