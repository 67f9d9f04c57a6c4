//! Ordered schema migrations for the ledger database.
//!
//! # Responsibility
//! - Hold the ordered list of schema migrations as embedded SQL.
//! - Bring any older database forward to the latest supported version.
//!
//! # Invariants
//! - Migration versions are contiguous and ascending, starting at 1.
//! - Each migration runs in its own transaction together with the
//!   `PRAGMA user_version` bump, so a crash never leaves a half-applied step.

use rusqlite::Connection;

use crate::db::{DbError, DbResult};

struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_init.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_activity_counters.sql"),
    },
    Migration {
        version: 3,
        sql: include_str!("0003_entry_indexes.sql"),
    },
];

/// Newest schema version this build understands.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|migration| migration.version).unwrap_or(0)
}

/// Applies every migration newer than the database's current version.
///
/// Refuses databases whose `user_version` is ahead of this build instead of
/// guessing at a downgrade.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = current_user_version(conn)?;
    let latest = latest_version();
    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        tx.commit()?;
    }

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}
