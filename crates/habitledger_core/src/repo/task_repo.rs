//! Task entry persistence.
//!
//! # Responsibility
//! - Append task entries and read them back per owner.
//! - Seed the daily system task exactly once per owner and date.
//!
//! # Invariants
//! - Entries are append-only; no update or delete path exists.
//! - [`TaskRepository::seed_daily_task`] checks for an existing match and
//!   inserts under one immediate transaction, so concurrent seeders cannot
//!   both insert.

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, TransactionBehavior};

use crate::model::account::AccountId;
use crate::model::task::{NewTaskEntry, TaskEntry, TaskPriority};
use crate::model::EntryId;
use crate::repo::{bool_to_int, ensure_connection_ready, int_to_bool, RepoError, RepoResult};

const REQUIRED_TABLES: &[(&str, &[&str])] = &[(
    "task_entries",
    &[
        "id",
        "owner",
        "description",
        "date",
        "completed",
        "priority",
        "feedback",
    ],
)];

const TASK_COLUMNS: &str = "id, owner, description, date, completed, priority, feedback";

/// Storage contract for the append-only task log.
pub trait TaskRepository {
    /// Appends `entry` as given and returns the new id.
    fn append_task_entry(&self, entry: &NewTaskEntry) -> RepoResult<EntryId>;

    /// Inserts an open, medium-priority task with `description` for `owner`
    /// on `date` unless one with that exact description and date already
    /// exists. Returns whether a row was inserted.
    fn seed_daily_task(
        &mut self,
        owner: AccountId,
        date: NaiveDate,
        description: &str,
    ) -> RepoResult<bool>;

    /// Whether `owner` already has a task with `description` on `date`.
    fn daily_task_exists(
        &self,
        owner: AccountId,
        date: NaiveDate,
        description: &str,
    ) -> RepoResult<bool>;

    /// Every task entry of `owner` in insertion order.
    fn task_log(&self, owner: AccountId) -> RepoResult<Vec<TaskEntry>>;
}

/// SQLite-backed [`TaskRepository`].
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps `conn` after verifying schema version and required tables.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(SqliteTaskRepository { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn append_task_entry(&self, entry: &NewTaskEntry) -> RepoResult<EntryId> {
        self.conn.execute(
            "INSERT INTO task_entries (owner, description, date, completed, priority, feedback) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                entry.owner,
                entry.description,
                entry.date.to_string(),
                bool_to_int(entry.completed),
                priority_to_db(entry.priority),
                entry.feedback.as_deref()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn seed_daily_task(
        &mut self,
        owner: AccountId,
        date: NaiveDate,
        description: &str,
    ) -> RepoResult<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if task_exists(&tx, owner, date, description)? {
            return Ok(false);
        }
        tx.execute(
            "INSERT INTO task_entries (owner, description, date, completed, priority) \
             VALUES (?1, ?2, ?3, 0, ?4);",
            params![
                owner,
                description,
                date.to_string(),
                priority_to_db(TaskPriority::Medium)
            ],
        )?;
        tx.commit()?;
        Ok(true)
    }

    fn daily_task_exists(
        &self,
        owner: AccountId,
        date: NaiveDate,
        description: &str,
    ) -> RepoResult<bool> {
        task_exists(self.conn, owner, date, description)
    }

    fn task_log(&self, owner: AccountId) -> RepoResult<Vec<TaskEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM task_entries WHERE owner = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([owner])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_task_row(row)?);
        }
        Ok(entries)
    }
}

fn task_exists(
    conn: &Connection,
    owner: AccountId,
    date: NaiveDate,
    description: &str,
) -> RepoResult<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM task_entries \
         WHERE owner = ?1 AND date = ?2 AND description = ?3 LIMIT 1;",
    )?;
    let mut rows = stmt.query(params![owner, date.to_string(), description])?;
    Ok(rows.next()?.is_some())
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<TaskEntry> {
    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in task_entries.date"))
    })?;
    let completed = int_to_bool(row.get("completed")?, "task_entries.completed")?;
    let priority_text: String = row.get("priority")?;
    let priority = parse_priority(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid priority `{priority_text}` in task_entries.priority"
        ))
    })?;
    Ok(TaskEntry {
        id: row.get("id")?,
        owner: row.get("owner")?,
        description: row.get("description")?,
        date,
        completed,
        priority,
        feedback: row.get("feedback")?,
    })
}

fn priority_to_db(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "high",
        TaskPriority::Medium => "medium",
        TaskPriority::Low => "low",
    }
}

fn parse_priority(text: &str) -> Option<TaskPriority> {
    match text {
        "high" => Some(TaskPriority::High),
        "medium" => Some(TaskPriority::Medium),
        "low" => Some(TaskPriority::Low),
        _ => None,
    }
}
