//! Activity counter bookkeeping.
//!
//! # Responsibility
//! - Bump the ledger-wide tallies when signup and login succeed, and expose
//!   a read of both.
//!
//! # Invariants
//! - Callers invoke the hooks only after the underlying workflow succeeded;
//!   failed signups and logins leave the tallies untouched.

use log::debug;

use crate::model::activity::ActivityCounters;
use crate::repo::{activity_repo::ActivityRepository, RepoResult};

/// Counter bookkeeping over any [`ActivityRepository`].
pub struct ActivityService<R: ActivityRepository> {
    repo: R,
}

impl<R: ActivityRepository> ActivityService<R> {
    pub fn new(repo: R) -> Self {
        ActivityService { repo }
    }

    /// Counts one successful signup.
    pub fn on_signup_succeeded(&self) -> RepoResult<()> {
        self.repo.increment_total_accounts()?;
        debug!("event=counter_bumped module=activity status=ok counter=total_accounts");
        Ok(())
    }

    /// Counts one successful login. Repeat logins count again.
    pub fn on_login_succeeded(&self) -> RepoResult<()> {
        self.repo.increment_active_accounts()?;
        debug!("event=counter_bumped module=activity status=ok counter=active_accounts");
        Ok(())
    }

    /// Current tallies.
    pub fn counters(&self) -> RepoResult<ActivityCounters> {
        self.repo.counters()
    }

    /// Starts a fresh activity period by zeroing the login tally. Never
    /// called by the workflows themselves.
    pub fn reset_active_accounts(&self) -> RepoResult<()> {
        self.repo.reset_active_accounts()?;
        debug!("event=counter_reset module=activity status=ok counter=active_accounts");
        Ok(())
    }
}
