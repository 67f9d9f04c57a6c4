//! Repository layer over the ledger database.
//!
//! # Responsibility
//! - Translate between domain records and SQLite rows.
//! - Gate every repository behind a connection-readiness check so a stale or
//!   foreign database fails fast instead of mid-operation.
//!
//! # Invariants
//! - Repositories never mutate history; habit and task entries are
//!   append-only.
//! - Check-then-write sequences run inside immediate transactions.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod account_repo;
pub mod activity_repo;
pub mod habit_repo;
pub mod task_repo;

use rusqlite::Connection;

use crate::db::{migrations, DbError};

/// Errors surfaced by the repository layer.
#[derive(Debug)]
pub enum RepoError {
    /// Storage-layer failure.
    Db(DbError),
    /// An account with this normalized email already exists.
    DuplicateAccount(String),
    /// A stored row failed to map back into a domain record.
    InvalidData(String),
    /// The connection's schema version does not match this build.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A table this repository depends on is absent.
    MissingRequiredTable(&'static str),
    /// A column this repository depends on is absent.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::Db(err) => write!(f, "{err}"),
            RepoError::DuplicateAccount(email) => {
                write!(f, "an account already exists for `{email}`")
            }
            RepoError::InvalidData(detail) => write!(f, "invalid stored data: {detail}"),
            RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not ready: schema version {actual_version}, expected {expected_version}"
            ),
            RepoError::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            RepoError::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepoError::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        RepoError::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        RepoError::Db(DbError::Sqlite(value))
    }
}

/// Result alias for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

/// Verifies the connection carries the latest schema and every listed table
/// and column before a repository accepts it.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[(&'static str, &'static [&'static str])],
) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = migrations::latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    for (table, columns) in tables.iter().copied() {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for column in columns.iter().copied() {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }
    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

pub(crate) fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get("name")?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &'static str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
