//! Aggregate activity counters.

use serde::{Deserialize, Serialize};

/// Ledger-wide activity tallies.
///
/// `total_accounts` counts successful signups; `active_accounts` counts
/// successful logins. Both only ever grow during normal operation; a repeat
/// login is counted again rather than deduplicated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCounters {
    pub total_accounts: u64,
    pub active_accounts: u64,
}
