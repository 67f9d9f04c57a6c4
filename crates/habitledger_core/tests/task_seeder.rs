use chrono::NaiveDate;
use habitledger_core::db::open_ledger_in_memory;
use habitledger_core::{
    AccountService, RecordTaskRequest, SqliteAccountRepository, SqliteTaskRepository, TaskPriority,
    TaskService, TaskServiceError, DAILY_TASK_DESCRIPTION,
};
use rusqlite::Connection;

#[test]
fn daily_task_is_seeded_once_per_owner_and_date() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = TaskService::new(SqliteTaskRepository::try_new(&mut conn).unwrap());

    assert!(service.ensure_daily_task(owner, day(2024, 3, 1)).unwrap());
    assert!(!service.ensure_daily_task(owner, day(2024, 3, 1)).unwrap());

    let log = service.task_log(owner).unwrap();
    assert_eq!(log.len(), 1);
}

#[test]
fn seeded_task_has_the_fixed_shape() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = TaskService::new(SqliteTaskRepository::try_new(&mut conn).unwrap());

    service.ensure_daily_task(owner, day(2024, 3, 1)).unwrap();

    let log = service.task_log(owner).unwrap();
    let seeded = &log[0];
    assert_eq!(seeded.description, DAILY_TASK_DESCRIPTION);
    assert_eq!(seeded.date, day(2024, 3, 1));
    assert!(!seeded.completed);
    assert_eq!(seeded.priority, TaskPriority::Medium);
    assert_eq!(seeded.feedback, None);
}

#[test]
fn new_day_seeds_again() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = TaskService::new(SqliteTaskRepository::try_new(&mut conn).unwrap());

    assert!(service.ensure_daily_task(owner, day(2024, 3, 1)).unwrap());
    assert!(service.ensure_daily_task(owner, day(2024, 3, 2)).unwrap());

    let log = service.task_log(owner).unwrap();
    assert_eq!(log.len(), 2);
}

#[test]
fn each_owner_gets_their_own_seed() {
    let mut conn = open_ledger_in_memory().unwrap();
    let (casey, drew) = {
        let service = AccountService::new(SqliteAccountRepository::try_new(&conn).unwrap());
        (
            service.signup("casey@example.com", "secret-1").unwrap(),
            service.signup("drew@example.com", "secret-2").unwrap(),
        )
    };
    let mut service = TaskService::new(SqliteTaskRepository::try_new(&mut conn).unwrap());

    assert!(service.ensure_daily_task(casey, day(2024, 3, 1)).unwrap());
    assert!(service.ensure_daily_task(drew, day(2024, 3, 1)).unwrap());

    assert_eq!(service.task_log(casey).unwrap().len(), 1);
    assert_eq!(service.task_log(drew).unwrap().len(), 1);
}

#[test]
fn a_user_entry_with_the_same_wording_counts_as_seeded() {
    let (mut conn, owner) = ledger_with_account();
    let mut service = TaskService::new(SqliteTaskRepository::try_new(&mut conn).unwrap());

    let request = RecordTaskRequest::new(owner, DAILY_TASK_DESCRIPTION, day(2024, 3, 1));
    service.record_task(&request).unwrap();

    assert!(!service.ensure_daily_task(owner, day(2024, 3, 1)).unwrap());
    assert_eq!(service.task_log(owner).unwrap().len(), 1);
}

#[test]
fn recorded_task_is_trimmed_and_returned_as_stored() {
    let (mut conn, owner) = ledger_with_account();
    let service = TaskService::new(SqliteTaskRepository::try_new(&mut conn).unwrap());

    let mut request = RecordTaskRequest::new(owner, "  plan sprint  ", day(2024, 3, 1));
    request.completed = true;
    request.priority = TaskPriority::High;
    request.feedback = Some("  solid start  ".to_string());

    let entry = service.record_task(&request).unwrap();
    assert_eq!(entry.description, "plan sprint");
    assert!(entry.completed);
    assert_eq!(entry.priority, TaskPriority::High);
    assert_eq!(entry.feedback.as_deref(), Some("solid start"));

    let log = service.task_log(owner).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0], entry);
}

#[test]
fn blank_feedback_collapses_to_none() {
    let (mut conn, owner) = ledger_with_account();
    let service = TaskService::new(SqliteTaskRepository::try_new(&mut conn).unwrap());

    let mut request = RecordTaskRequest::new(owner, "tidy desk", day(2024, 3, 1));
    request.feedback = Some("   ".to_string());

    let entry = service.record_task(&request).unwrap();
    assert_eq!(entry.feedback, None);
}

#[test]
fn blank_description_is_rejected() {
    let (mut conn, owner) = ledger_with_account();
    let service = TaskService::new(SqliteTaskRepository::try_new(&mut conn).unwrap());

    let request = RecordTaskRequest::new(owner, "   ", day(2024, 3, 1));
    let err = service.record_task(&request).unwrap_err();
    assert!(matches!(err, TaskServiceError::InvalidDescription(_)));
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
