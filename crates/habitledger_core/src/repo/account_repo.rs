//! Account persistence.
//!
//! # Responsibility
//! - Create accounts with their encoded credential hash.
//! - Verify offered secrets against stored hashes.
//!
//! # Invariants
//! - Emails arrive already normalized from the service layer; this repository
//!   treats them as opaque unique keys.
//! - Only credential encodings touch storage, never plaintext secrets.

use rusqlite::{params, Connection};

use crate::model::account::{Account, AccountId};
use crate::model::credential::CredentialHash;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};

const REQUIRED_TABLES: &[(&str, &[&str])] = &[("accounts", &["id", "email", "credential"])];

/// Storage contract for account creation and credential checks.
pub trait AccountRepository {
    /// Inserts a new account and returns its assigned id.
    ///
    /// Fails with [`RepoError::DuplicateAccount`] when the email is taken.
    fn create_account(&self, email: &str, credential: &CredentialHash) -> RepoResult<AccountId>;

    /// Checks `secret` against the stored credential for `email`.
    ///
    /// Returns `Ok(None)` both for an unknown email and for a wrong secret,
    /// so callers cannot tell the two apart.
    fn verify_credential(&self, email: &str, secret: &str) -> RepoResult<Option<AccountId>>;

    /// Looks up an account by its normalized email.
    fn account_by_email(&self, email: &str) -> RepoResult<Option<Account>>;
}

/// SQLite-backed [`AccountRepository`].
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    /// Wraps `conn` after verifying schema version and required tables.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, REQUIRED_TABLES)?;
        Ok(SqliteAccountRepository { conn })
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn create_account(&self, email: &str, credential: &CredentialHash) -> RepoResult<AccountId> {
        let insert = self.conn.execute(
            "INSERT INTO accounts (email, credential) VALUES (?1, ?2);",
            params![email, credential.encode()],
        );
        match insert {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::DuplicateAccount(email.to_string()))
            }
            Err(other) => Err(other.into()),
        }
    }

    fn verify_credential(&self, email: &str, secret: &str) -> RepoResult<Option<AccountId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, credential FROM accounts WHERE email = ?1;")?;
        let mut rows = stmt.query([email])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let id: AccountId = row.get("id")?;
        let encoded: String = row.get("credential")?;
        let stored = CredentialHash::parse(&encoded).map_err(|err| {
            RepoError::InvalidData(format!("credential encoding for account {id}: {err}"))
        })?;
        if stored.verify(secret) {
            Ok(Some(id))
        } else {
            Ok(None)
        }
    }

    fn account_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, email FROM accounts WHERE email = ?1;")?;
        let mut rows = stmt.query([email])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        Ok(Some(Account {
            id: row.get("id")?,
            email: row.get("email")?,
        }))
    }
}
