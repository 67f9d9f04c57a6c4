//! Service layer: validation and workflows over the repositories.
//!
//! # Responsibility
//! - Normalize and validate user input before it reaches storage.
//! - Run the ledger workflows: signup, login, habit recording, daily task
//!   seeding, activity bookkeeping.
//!
//! # Invariants
//! - Services are generic over repository traits and hold no global state.
//! - Log lines carry ids and counts only, never emails, secrets, or entry
//!   text.
//!
//! # See also
//! - docs/architecture/logging.md

pub mod account_service;
pub mod activity_service;
pub mod habit_service;
pub mod task_service;
