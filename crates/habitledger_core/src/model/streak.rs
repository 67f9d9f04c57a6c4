//! Streak arithmetic for habit entries.
//!
//! # Responsibility
//! - Compute the streak to attach to a habit entry from the prior entry of
//!   the same habit, with no storage access.
//!
//! # Invariants
//! - Streaks are non-negative and depend only on the inputs given here.
//! - Under [`StreakRule::PriorEntryDriven`] the flag being recorded today does
//!   not influence today's streak; only the prior entry does.

use serde::{Deserialize, Serialize};

use crate::model::habit::HabitEntry;

/// Which inputs drive the streak attached to a new entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakRule {
    /// The ledger's native rule: a new entry extends the chain whenever the
    /// prior entry was completed, and restarts at 1 otherwise. The completion
    /// flag being recorded right now is deliberately ignored, so an entry that
    /// records a miss after a run still carries the lengthened count, and the
    /// restart to 1 lands on the next entry after the miss.
    PriorEntryDriven,
    /// Alternative rule for callers that want the streak to reflect today:
    /// recording a miss yields 0, recording a completion extends the chain
    /// only when the prior entry was also completed.
    CompletionDriven,
}

impl Default for StreakRule {
    fn default() -> Self {
        StreakRule::PriorEntryDriven
    }
}

/// Computes the streak for the entry being appended.
///
/// `prior` is the latest stored entry of the same habit for the same owner,
/// or `None` for a first observation. `completed_today` is the flag being
/// recorded now; it only matters under [`StreakRule::CompletionDriven`].
pub fn next_streak(prior: Option<&HabitEntry>, completed_today: bool, rule: StreakRule) -> u32 {
    match rule {
        StreakRule::PriorEntryDriven => match prior {
            Some(entry) if entry.completed => entry.streak.saturating_add(1),
            _ => 1,
        },
        StreakRule::CompletionDriven => {
            if !completed_today {
                return 0;
            }
            match prior {
                Some(entry) if entry.completed => entry.streak.saturating_add(1),
                _ => 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn prior_entry(completed: bool, streak: u32) -> HabitEntry {
        HabitEntry {
            id: 1,
            owner: 1,
            habit: "run".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            completed,
            streak,
        }
    }

    #[test]
    fn first_entry_starts_at_one_regardless_of_flag() {
        assert_eq!(next_streak(None, true, StreakRule::PriorEntryDriven), 1);
        assert_eq!(next_streak(None, false, StreakRule::PriorEntryDriven), 1);
    }

    #[test]
    fn completed_prior_extends_even_when_today_is_a_miss() {
        let prior = prior_entry(true, 4);
        assert_eq!(
            next_streak(Some(&prior), false, StreakRule::PriorEntryDriven),
            5
        );
        assert_eq!(
            next_streak(Some(&prior), true, StreakRule::PriorEntryDriven),
            5
        );
    }

    #[test]
    fn missed_prior_restarts_at_one() {
        let prior = prior_entry(false, 5);
        assert_eq!(
            next_streak(Some(&prior), true, StreakRule::PriorEntryDriven),
            1
        );
        assert_eq!(
            next_streak(Some(&prior), false, StreakRule::PriorEntryDriven),
            1
        );
    }

    #[test]
    fn completion_driven_miss_today_yields_zero() {
        let prior = prior_entry(true, 4);
        assert_eq!(
            next_streak(Some(&prior), false, StreakRule::CompletionDriven),
            0
        );
        assert_eq!(next_streak(None, false, StreakRule::CompletionDriven), 0);
    }

    #[test]
    fn completion_driven_extends_only_through_completed_prior() {
        let completed_prior = prior_entry(true, 2);
        let missed_prior = prior_entry(false, 2);
        assert_eq!(
            next_streak(Some(&completed_prior), true, StreakRule::CompletionDriven),
            3
        );
        assert_eq!(
            next_streak(Some(&missed_prior), true, StreakRule::CompletionDriven),
            1
        );
        assert_eq!(next_streak(None, true, StreakRule::CompletionDriven), 1);
    }

    #[test]
    fn default_rule_is_prior_entry_driven() {
        assert_eq!(StreakRule::default(), StreakRule::PriorEntryDriven);
    }
}
