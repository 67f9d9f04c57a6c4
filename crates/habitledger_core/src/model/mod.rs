//! Domain records for the habit ledger.
//!
//! # Responsibility
//! - Define the plain data types stored in the ledger: accounts, habit and
//!   task entries, activity counters.
//! - Keep streak arithmetic and credential encoding pure and storage-free.
//!
//! # Invariants
//! - Records here carry no connection handles and perform no I/O.

pub mod account;
pub mod activity;
pub mod credential;
pub mod habit;
pub mod streak;
pub mod task;

/// Insertion-ordered row id shared by habit and task entries.
///
/// Ids are assigned by storage and strictly increase in insertion order,
/// which makes them the tie-break when two entries share a date.
pub type EntryId = i64;
