use chrono::NaiveDate;
use habitledger_core::db::open_ledger_in_memory;
use habitledger_core::{
    AccountService, HabitRepository, HabitService, HabitServiceError, NewHabitEntry,
    SqliteAccountRepository, SqliteHabitRepository, StreakRule,
};
use rusqlite::Connection;

#[test]
fn streaks_follow_the_prior_entry_chain() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = HabitService::new(SqliteHabitRepository::try_new(&mut conn).unwrap());

    let first = service
        .record_habit(owner, "run", day(2024, 3, 1), true)
        .unwrap();
    assert_eq!(first.streak, 1);

    let second = service
        .record_habit(owner, "run", day(2024, 3, 2), true)
        .unwrap();
    assert_eq!(second.streak, 2);

    // A recorded miss still extends the chain; the restart lands on the
    // entry after the miss.
    let third = service
        .record_habit(owner, "run", day(2024, 3, 3), false)
        .unwrap();
    assert_eq!(third.streak, 3);

    let fourth = service
        .record_habit(owner, "run", day(2024, 3, 4), true)
        .unwrap();
    assert_eq!(fourth.streak, 1);
}

#[test]
fn first_entry_starts_at_one_even_for_a_miss() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = HabitService::new(SqliteHabitRepository::try_new(&mut conn).unwrap());

    let entry = service
        .record_habit(owner, "stretch", day(2024, 3, 1), false)
        .unwrap();
    assert_eq!(entry.streak, 1);
    assert!(!entry.completed);
}

#[test]
fn same_day_duplicates_chain_through_the_newest_row() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = HabitService::new(SqliteHabitRepository::try_new(&mut conn).unwrap());

    let first = service
        .record_habit(owner, "run", day(2024, 3, 1), true)
        .unwrap();
    let second = service
        .record_habit(owner, "run", day(2024, 3, 1), true)
        .unwrap();
    assert_eq!(first.streak, 1);
    assert_eq!(second.streak, 2);

    let latest = service.latest_entry(owner, "run").unwrap().unwrap();
    assert_eq!(latest.id, second.id);
    assert_eq!(latest.streak, 2);
}

#[test]
fn habits_are_tracked_independently() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = HabitService::new(SqliteHabitRepository::try_new(&mut conn).unwrap());

    service
        .record_habit(owner, "run", day(2024, 3, 1), true)
        .unwrap();
    service
        .record_habit(owner, "run", day(2024, 3, 2), true)
        .unwrap();

    let read_first = service
        .record_habit(owner, "read", day(2024, 3, 2), true)
        .unwrap();
    assert_eq!(read_first.streak, 1);
}

#[test]
fn habit_names_are_trimmed_but_case_sensitive() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = HabitService::new(SqliteHabitRepository::try_new(&mut conn).unwrap());

    service
        .record_habit(owner, "run", day(2024, 3, 1), true)
        .unwrap();
    let padded = service
        .record_habit(owner, "  run  ", day(2024, 3, 2), true)
        .unwrap();
    assert_eq!(padded.habit, "run");
    assert_eq!(padded.streak, 2);

    let capitalized = service
        .record_habit(owner, "Run", day(2024, 3, 3), true)
        .unwrap();
    assert_eq!(capitalized.streak, 1);
}

#[test]
fn blank_habit_name_is_rejected() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = HabitService::new(SqliteHabitRepository::try_new(&mut conn).unwrap());

    let err = service
        .record_habit(owner, "   ", day(2024, 3, 1), true)
        .unwrap_err();
    assert!(matches!(err, HabitServiceError::InvalidHabitName(_)));
}

#[test]
fn owners_streaks_are_isolated() {
    let mut conn = open_ledger_in_memory().unwrap();
    let (casey, drew) = {
        let service = AccountService::new(SqliteAccountRepository::try_new(&conn).unwrap());
        (
            service.signup("casey@example.com", "secret-1").unwrap(),
            service.signup("drew@example.com", "secret-2").unwrap(),
        )
    };
    let mut service = HabitService::new(SqliteHabitRepository::try_new(&mut conn).unwrap());

    service
        .record_habit(casey, "run", day(2024, 3, 1), true)
        .unwrap();
    service
        .record_habit(casey, "run", day(2024, 3, 2), true)
        .unwrap();

    let drew_first = service
        .record_habit(drew, "run", day(2024, 3, 2), true)
        .unwrap();
    assert_eq!(drew_first.streak, 1);
}

#[test]
fn completion_driven_rule_tracks_todays_flag() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = HabitService::with_rule(
        SqliteHabitRepository::try_new(&mut conn).unwrap(),
        StreakRule::CompletionDriven,
    );

    let first = service
        .record_habit(owner, "run", day(2024, 3, 1), true)
        .unwrap();
    assert_eq!(first.streak, 1);

    let miss = service
        .record_habit(owner, "run", day(2024, 3, 2), false)
        .unwrap();
    assert_eq!(miss.streak, 0);

    let restart = service
        .record_habit(owner, "run", day(2024, 3, 3), true)
        .unwrap();
    assert_eq!(restart.streak, 1);

    let extended = service
        .record_habit(owner, "run", day(2024, 3, 4), true)
        .unwrap();
    assert_eq!(extended.streak, 2);
}

#[test]
fn latest_entry_prefers_newest_date_over_insertion_order() {
    let (mut conn, owner) = ledger_with_account();
    let repo = SqliteHabitRepository::try_new(&mut conn).unwrap();

    // Backfill: the later date lands in the table first.
    let newer = NewHabitEntry::new(owner, "run", day(2024, 3, 5), true);
    let older = NewHabitEntry::new(owner, "run", day(2024, 3, 2), false);
    let newer_id = repo.append_habit_entry(&newer).unwrap();
    repo.append_habit_entry(&older).unwrap();

    let latest = repo.latest_habit_entry(owner, "run").unwrap().unwrap();
    assert_eq!(latest.id, newer_id);
    assert_eq!(latest.date, day(2024, 3, 5));
}

fn ledger_with_account() -> (Connection, i64) {
    let conn = open_ledger_in_memory().unwrap();
    let id = {
        let service = AccountService::new(SqliteAccountRepository::try_new(&conn).unwrap());
        service.signup("casey@example.com", "secret-1").unwrap()
    };
    (conn, id)
}

fn day(year: i32, month: u32, date: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, date).unwrap()
}
