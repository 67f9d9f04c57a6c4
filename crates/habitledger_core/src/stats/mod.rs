//! Read-only projections over ledger logs.
//!
//! # Responsibility
//! - Summarize habit and task logs into display-ready aggregates.
//!
//! # Invariants
//! - Projections are pure functions over slices; they never touch storage.

pub mod summary;
