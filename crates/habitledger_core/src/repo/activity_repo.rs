//! Activity counter persistence.
//!
//! # Responsibility
//! - Bump and read the ledger-wide activity counters.
//!
//! # Invariants
//! - The counters live in a single row seeded by migration; a missing row is
//!   reported as corrupt data rather than silently ignored.
//! - Increments are single `UPDATE` statements, atomic on their own.

use rusqlite::{Connection, OptionalExtension};

use crate::model::activity::ActivityCounters;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};

const REQUIRED_TABLES: &[(&str, &[&str])] = &[(
    "activity_counters",
    &["id", "total_accounts", "active_accounts"],
)];

/// Storage contract for the activity counters.
pub trait ActivityRepository {
    /// Adds one to the signup tally.
    fn increment_total_accounts(&self) -> RepoResult<()>;

    /// Adds one to the login tally.
    fn increment_active_accounts(&self) -> RepoResult<()>;

    /// Zeroes the login tally, leaving the signup tally untouched.
    ///
    /// No workflow calls this; it exists for operators running a fresh
    /// activity period over an existing ledger.
    fn reset_active_accounts(&self) -> RepoResult<()>;

    /// Reads both tallies.
    fn counters(&self) -> RepoResult<ActivityCounters>;
}

/// SQLite-backed [`ActivityRepository`].
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    /// Wraps `conn` after verifying schema version and required tables.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(SqliteActivityRepository { conn })
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn increment_total_accounts(&self) -> RepoResult<()> {
        bump_counter(self.conn, "total_accounts")
    }

    fn increment_active_accounts(&self) -> RepoResult<()> {
        bump_counter(self.conn, "active_accounts")
    }

    fn reset_active_accounts(&self) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE activity_counters SET active_accounts = 0 WHERE id = 1;",
            [],
        )?;
        ensure_singleton_touched(changed)
    }

    fn counters(&self) -> RepoResult<ActivityCounters> {
        let row = self
            .conn
            .query_row(
                "SELECT total_accounts, active_accounts FROM activity_counters WHERE id = 1;",
                [],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;
        let Some((total, active)) = row else {
            return Err(missing_singleton());
        };
        Ok(ActivityCounters {
            total_accounts: counter_value(total, "total_accounts")?,
            active_accounts: counter_value(active, "active_accounts")?,
        })
    }
}

// Column names here come from the two increment methods above, never from
// caller input.
fn bump_counter(conn: &Connection, column: &str) -> RepoResult<()> {
    let changed = conn.execute(
        &format!("UPDATE activity_counters SET {column} = {column} + 1 WHERE id = 1;"),
        [],
    )?;
    ensure_singleton_touched(changed)
}

fn ensure_singleton_touched(changed: usize) -> RepoResult<()> {
    if changed == 0 {
        return Err(missing_singleton());
    }
    Ok(())
}

fn missing_singleton() -> RepoError {
    RepoError::InvalidData("activity_counters singleton row is missing".to_string())
}

fn counter_value(raw: i64, column: &'static str) -> RepoResult<u64> {
    u64::try_from(raw).map_err(|_| {
        RepoError::InvalidData(format!(
            "negative value `{raw}` in activity_counters.{column}"
        ))
    })
}
