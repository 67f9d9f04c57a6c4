//! Ledger database opening and bootstrap.
//!
//! # Responsibility
//! - Open (or create) the ledger database, on disk or in memory.
//! - Run the bootstrap sequence on every new connection: foreign keys on,
//!   busy timeout set, migrations applied.
//!
//! # Invariants
//! - Callers never see a connection that skipped bootstrap.

use std::path::Path;
use std::time::{Duration, Instant};

use log::{error, info};
use rusqlite::Connection;

use crate::db::{migrations, DbError, DbResult};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (and creates if needed) the ledger database file at `path`.
pub fn open_ledger(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=ledger_open module=db status=start mode=file");
    let opened = Connection::open(path)
        .map_err(DbError::from)
        .and_then(bootstrap_connection);
    report_open(opened, "file", started_at)
}

/// Opens a fresh in-memory ledger, used by tests and smoke probes.
pub fn open_ledger_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=ledger_open module=db status=start mode=memory");
    let opened = Connection::open_in_memory()
        .map_err(DbError::from)
        .and_then(bootstrap_connection);
    report_open(opened, "memory", started_at)
}

fn bootstrap_connection(mut conn: Connection) -> DbResult<Connection> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    migrations::apply_migrations(&mut conn)?;
    Ok(conn)
}

fn report_open(
    result: DbResult<Connection>,
    mode: &str,
    started_at: Instant,
) -> DbResult<Connection> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => {
            info!("event=ledger_open module=db status=ok mode={mode} duration_ms={duration_ms}");
        }
        Err(err) => {
            error!(
                "event=ledger_open module=db status=error mode={mode} duration_ms={duration_ms} error={err}"
            );
        }
    }
    result
}
