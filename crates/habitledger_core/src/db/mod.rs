//! SQLite storage layer for the habit ledger.
//!
//! # Responsibility
//! - Own connection opening and bootstrap for the embedded ledger database.
//! - Apply schema migrations and keep `PRAGMA user_version` in sync.
//!
//! # Invariants
//! - Every connection handed out has foreign keys enabled and the latest
//!   supported schema applied.
//! - A database written by a newer schema is refused, never downgraded.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod migrations;
pub mod open;

pub use open::{open_ledger, open_ledger_in_memory};

/// Errors surfaced while opening or migrating the ledger database.
#[derive(Debug)]
pub enum DbError {
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// The database was created by a newer schema than this build supports.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl std::fmt::Display for DbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            DbError::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "unsupported schema version {db_version}, latest supported is {latest_supported}"
            ),
        }
    }
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DbError::Sqlite(err) => Some(err),
            DbError::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        DbError::Sqlite(value)
    }
}

/// Result alias for storage-layer operations.
pub type DbResult<T> = Result<T, DbError>;
