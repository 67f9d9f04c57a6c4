//! Habit entry persistence.
//!
//! # Responsibility
//! - Append habit entries and read them back per owner.
//! - Resolve the latest entry of a habit and record new entries with their
//!   streak inside one transaction.
//!
//! # Invariants
//! - Entries are append-only; no update or delete path exists.
//! - "Latest" means newest date, then highest id among equal dates, so
//!   same-date duplicates resolve to the most recently inserted row.
//! - [`HabitRepository::record_with_streak`] reads the prior entry and writes
//!   the new one under an immediate transaction, so no other writer can slip
//!   an entry between the read and the append.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, TransactionBehavior};

use crate::model::account::AccountId;
use crate::model::habit::{HabitEntry, NewHabitEntry};
use crate::model::streak::{next_streak, StreakRule};
use crate::model::EntryId;
use crate::repo::{bool_to_int, ensure_connection_ready, int_to_bool, RepoError, RepoResult};

const REQUIRED_TABLES: &[(&str, &[&str])] = &[(
    "habit_entries",
    &["id", "owner", "habit", "date", "completed", "streak"],
)];

const HABIT_COLUMNS: &str = "id, owner, habit, date, completed, streak";

/// Storage contract for the append-only habit log.
pub trait HabitRepository {
    /// Appends `entry` as given, trusting its streak, and returns the new id.
    fn append_habit_entry(&self, entry: &NewHabitEntry) -> RepoResult<EntryId>;

    /// Computes the streak from the habit's latest entry and appends a new
    /// entry carrying it, atomically. Returns the stored entry.
    fn record_with_streak(
        &mut self,
        owner: AccountId,
        habit: &str,
        date: NaiveDate,
        completed: bool,
        rule: StreakRule,
    ) -> RepoResult<HabitEntry>;

    /// Latest entry of `habit` for `owner`: newest date, highest id winning
    /// ties. `None` when the habit has never been recorded.
    fn latest_habit_entry(&self, owner: AccountId, habit: &str) -> RepoResult<Option<HabitEntry>>;

    /// Every habit entry of `owner` in insertion order.
    fn habit_log(&self, owner: AccountId) -> RepoResult<Vec<HabitEntry>>;
}

/// SQLite-backed [`HabitRepository`].
pub struct SqliteHabitRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteHabitRepository<'conn> {
    /// Wraps `conn` after verifying schema version and required tables.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(SqliteHabitRepository { conn })
    }
}

impl HabitRepository for SqliteHabitRepository<'_> {
    fn append_habit_entry(&self, entry: &NewHabitEntry) -> RepoResult<EntryId> {
        insert_entry(
            self.conn,
            entry.owner,
            &entry.habit,
            entry.date,
            entry.completed,
            entry.streak,
        )
    }

    fn record_with_streak(
        &mut self,
        owner: AccountId,
        habit: &str,
        date: NaiveDate,
        completed: bool,
        rule: StreakRule,
    ) -> RepoResult<HabitEntry> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let prior = latest_entry(&tx, owner, habit)?;
        let streak = next_streak(prior.as_ref(), completed, rule);
        let id = insert_entry(&tx, owner, habit, date, completed, streak)?;
        tx.commit()?;
        Ok(HabitEntry {
            id,
            owner,
            habit: habit.to_string(),
            date,
            completed,
            streak,
        })
    }

    fn latest_habit_entry(&self, owner: AccountId, habit: &str) -> RepoResult<Option<HabitEntry>> {
        latest_entry(self.conn, owner, habit)
    }

    fn habit_log(&self, owner: AccountId) -> RepoResult<Vec<HabitEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {HABIT_COLUMNS} FROM habit_entries WHERE owner = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([owner])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_habit_row(row)?);
        }
        Ok(entries)
    }
}

fn insert_entry(
    conn: &Connection,
    owner: AccountId,
    habit: &str,
    date: NaiveDate,
    completed: bool,
    streak: u32,
) -> RepoResult<EntryId> {
    conn.execute(
        "INSERT INTO habit_entries (owner, habit, date, completed, streak) \
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            owner,
            habit,
            date.to_string(),
            bool_to_int(completed),
            i64::from(streak)
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn latest_entry(
    conn: &Connection,
    owner: AccountId,
    habit: &str,
) -> RepoResult<Option<HabitEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {HABIT_COLUMNS} FROM habit_entries \
         WHERE owner = ?1 AND habit = ?2 \
         ORDER BY date DESC, id DESC LIMIT 1;"
    ))?;
    let mut rows = stmt.query(params![owner, habit])?;
    let Some(row) = rows.next()? else {
        return Ok(None);
    };
    Ok(Some(parse_habit_row(row)?))
}

fn parse_habit_row(row: &Row<'_>) -> RepoResult<HabitEntry> {
    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in habit_entries.date"))
    })?;
    let completed = int_to_bool(row.get("completed")?, "habit_entries.completed")?;
    let streak_raw: i64 = row.get("streak")?;
    let streak = u32::try_from(streak_raw).map_err(|_| {
        RepoError::InvalidData(format!("invalid streak `{streak_raw}` in habit_entries.streak"))
    })?;
    Ok(HabitEntry {
        id: row.get("id")?,
        owner: row.get("owner")?,
        habit: row.get("habit")?,
        date,
        completed,
        streak,
    })
}
