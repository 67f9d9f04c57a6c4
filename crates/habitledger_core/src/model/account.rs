//! Account record.

use serde::{Deserialize, Serialize};

/// Stable account identifier assigned by storage.
pub type AccountId = i64;

/// A registered account, identified by its normalized email address.
///
/// The stored credential hash is deliberately not part of this record; it
/// never leaves the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
}
