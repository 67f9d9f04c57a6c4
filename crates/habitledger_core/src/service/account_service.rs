//! Account signup and login workflows.
//!
//! # Responsibility
//! - Normalize and validate emails, derive credential hashes, and drive the
//!   account repository.
//!
//! # Invariants
//! - Emails are trimmed and lowercased before validation and storage, so
//!   lookups are case-insensitive.
//! - Login failures collapse to one [`AccountServiceError::InvalidCredential`]
//!   answer; unknown email and wrong secret are indistinguishable.
//! - Emails and secrets never appear in log lines.

use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::account::AccountId;
use crate::model::credential::{CredentialError, CredentialHash};
use crate::repo::{account_repo::AccountRepository, RepoError};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Errors surfaced by account workflows.
#[derive(Debug)]
pub enum AccountServiceError {
    /// The offered email does not look like an address. Carries the trimmed
    /// input so callers can echo it back to the user.
    InvalidEmail(String),
    /// The offered secret was rejected before hashing.
    Credential(CredentialError),
    /// Signup hit an existing account with the same normalized email.
    DuplicateAccount(String),
    /// Login failed; deliberately silent about which part was wrong.
    InvalidCredential,
    /// Storage-layer failure.
    Repo(RepoError),
}

impl std::fmt::Display for AccountServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountServiceError::InvalidEmail(email) => {
                write!(f, "invalid email address: `{email}`")
            }
            AccountServiceError::Credential(err) => write!(f, "{err}"),
            AccountServiceError::DuplicateAccount(email) => {
                write!(f, "an account already exists for `{email}`")
            }
            AccountServiceError::InvalidCredential => write!(f, "invalid email or credential"),
            AccountServiceError::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for AccountServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccountServiceError::Credential(err) => Some(err),
            AccountServiceError::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AccountServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateAccount(email) => AccountServiceError::DuplicateAccount(email),
            other => AccountServiceError::Repo(other),
        }
    }
}

impl From<CredentialError> for AccountServiceError {
    fn from(value: CredentialError) -> Self {
        AccountServiceError::Credential(value)
    }
}

/// Signup and login over any [`AccountRepository`].
pub struct AccountService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        AccountService { repo }
    }

    /// Registers a new account and returns its id.
    ///
    /// The email is normalized first; the secret is hashed and only the
    /// encoding is stored.
    pub fn signup(&self, email: &str, secret: &str) -> Result<AccountId, AccountServiceError> {
        let Some(email) = normalize_email(email) else {
            return Err(AccountServiceError::InvalidEmail(email.trim().to_string()));
        };
        let credential = CredentialHash::derive(secret)?;
        let account_id = self.repo.create_account(&email, &credential)?;
        info!("event=signup module=account status=ok account_id={account_id}");
        Ok(account_id)
    }

    /// Verifies the email and secret pair and returns the account id.
    ///
    /// A malformed email fails the same way as a wrong secret; the caller
    /// learns nothing about which check tripped.
    pub fn login(&self, email: &str, secret: &str) -> Result<AccountId, AccountServiceError> {
        let Some(email) = normalize_email(email) else {
            return Err(AccountServiceError::InvalidCredential);
        };
        match self.repo.verify_credential(&email, secret)? {
            Some(account_id) => {
                info!("event=login module=account status=ok account_id={account_id}");
                Ok(account_id)
            }
            None => {
                warn!("event=login module=account status=rejected");
                Err(AccountServiceError::InvalidCredential)
            }
        }
    }
}

/// Trims and lowercases `email`, returning `None` when the result does not
/// match the address shape (one `@`, no whitespace, dotted domain).
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_lowercase();
    if EMAIL_RE.is_match(&normalized) {
        Some(normalized)
    } else {
        None
    }
}
