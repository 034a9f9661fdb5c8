use attlog::core::dispatcher::Notifier;
use attlog::core::notify::NotifyLogic;
use attlog::core::scheduler;
use attlog::core::session::SessionLogic;
use attlog::core::template;
use attlog::errors::{AppError, AppResult};
use chrono::NaiveTime;
use std::collections::HashMap;

mod common;
use common::{day, dt, open_pool, seed_user, setup_test_db};

const REQUIRED: i64 = 480;
const SUBJECT: &str = "Daily working hours below the required minimum";

/// Captures every dispatched message instead of delivering it.
#[derive(Default)]
struct RecordingNotifier {
    sent: Vec<(String, String, String)>,
}

impl Notifier for RecordingNotifier {
    fn send(&mut self, recipient: &str, subject: &str, body: &str) -> AppResult<()> {
        self.sent
            .push((recipient.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Fails for one recipient, records the rest.
#[derive(Default)]
struct FlakyNotifier {
    fail_for: String,
    sent: Vec<String>,
}

impl Notifier for FlakyNotifier {
    fn send(&mut self, recipient: &str, _subject: &str, _body: &str) -> AppResult<()> {
        if recipient == self.fail_for {
            return Err(AppError::Dispatch(
                recipient.to_string(),
                "relay unavailable".to_string(),
            ));
        }
        self.sent.push(recipient.to_string());
        Ok(())
    }
}

#[test]
fn short_day_triggers_one_notification_with_missing_minutes() {
    let db_path = setup_test_db("notify_short_day");
    let mut pool = open_pool(&db_path);
    seed_user(&pool, "alice", "pw");

    // 09:00 → 16:45 = 465 minutes, 15 short of 480
    SessionLogic::login_at(&mut pool, "alice", "pw", dt(2025, 3, 10, 9, 0, 0)).unwrap();
    SessionLogic::logout_at(&mut pool, "alice", dt(2025, 3, 10, 16, 45, 0)).unwrap();

    let mut notifier = RecordingNotifier::default();
    let outcome = NotifyLogic::run_for_day(
        &mut pool,
        &mut notifier,
        day(2025, 3, 10),
        REQUIRED,
        SUBJECT,
        template::DEFAULT_TEMPLATE,
    )
    .unwrap();

    assert_eq!(outcome.evaluated, 1);
    assert_eq!(outcome.notified, vec!["alice".to_string()]);
    assert!(outcome.failed.is_empty());

    assert_eq!(notifier.sent.len(), 1);
    let (to, subject, body) = &notifier.sent[0];
    assert_eq!(to, "alice");
    assert_eq!(subject, SUBJECT);
    assert!(body.contains("alice"));
    assert!(body.contains("7.75"));
    assert!(body.contains("15 minutes"));
}

#[test]
fn meeting_the_threshold_is_not_notified() {
    let db_path = setup_test_db("notify_full_day");
    let mut pool = open_pool(&db_path);
    seed_user(&pool, "bob", "pw");

    // exactly 480 minutes
    SessionLogic::login_at(&mut pool, "bob", "pw", dt(2025, 3, 10, 9, 0, 0)).unwrap();
    SessionLogic::logout_at(&mut pool, "bob", dt(2025, 3, 10, 17, 0, 0)).unwrap();

    let mut notifier = RecordingNotifier::default();
    let outcome = NotifyLogic::run_for_day(
        &mut pool,
        &mut notifier,
        day(2025, 3, 10),
        REQUIRED,
        SUBJECT,
        template::DEFAULT_TEMPLATE,
    )
    .unwrap();

    assert_eq!(outcome.evaluated, 1);
    assert!(outcome.notified.is_empty());
    assert!(notifier.sent.is_empty());
}

#[test]
fn users_without_sessions_that_day_are_not_evaluated() {
    let db_path = setup_test_db("notify_no_sessions");
    let mut pool = open_pool(&db_path);
    seed_user(&pool, "alice", "pw");
    seed_user(&pool, "carol", "pw");

    SessionLogic::login_at(&mut pool, "alice", "pw", dt(2025, 3, 10, 9, 0, 0)).unwrap();
    SessionLogic::logout_at(&mut pool, "alice", dt(2025, 3, 10, 10, 0, 0)).unwrap();

    let mut notifier = RecordingNotifier::default();
    let outcome = NotifyLogic::run_for_day(
        &mut pool,
        &mut notifier,
        day(2025, 3, 10),
        REQUIRED,
        SUBJECT,
        template::DEFAULT_TEMPLATE,
    )
    .unwrap();

    // carol (and the seeded admin) had no sessions → never evaluated
    assert_eq!(outcome.evaluated, 1);
    assert_eq!(outcome.notified, vec!["alice".to_string()]);
}

#[test]
fn still_open_sessions_count_as_zero_minutes() {
    let db_path = setup_test_db("notify_open_session");
    let mut pool = open_pool(&db_path);
    seed_user(&pool, "dave", "pw");

    SessionLogic::login_at(&mut pool, "dave", "pw", dt(2025, 3, 10, 9, 0, 0)).unwrap();

    let mut notifier = RecordingNotifier::default();
    let outcome = NotifyLogic::run_for_day(
        &mut pool,
        &mut notifier,
        day(2025, 3, 10),
        REQUIRED,
        SUBJECT,
        template::DEFAULT_TEMPLATE,
    )
    .unwrap();

    assert_eq!(outcome.notified, vec!["dave".to_string()]);
    let (_, _, body) = &notifier.sent[0];
    assert!(body.contains("0.00"));
    assert!(body.contains("480 minutes"));
}

#[test]
fn one_failing_recipient_does_not_block_the_others() {
    let db_path = setup_test_db("notify_failure_isolation");
    let mut pool = open_pool(&db_path);
    seed_user(&pool, "alice", "pw");
    seed_user(&pool, "bob", "pw");

    for name in ["alice", "bob"] {
        SessionLogic::login_at(&mut pool, name, "pw", dt(2025, 3, 10, 9, 0, 0)).unwrap();
        SessionLogic::logout_at(&mut pool, name, dt(2025, 3, 10, 10, 0, 0)).unwrap();
    }

    let mut notifier = FlakyNotifier {
        fail_for: "alice".to_string(),
        ..Default::default()
    };

    let outcome = NotifyLogic::run_for_day(
        &mut pool,
        &mut notifier,
        day(2025, 3, 10),
        REQUIRED,
        SUBJECT,
        template::DEFAULT_TEMPLATE,
    )
    .unwrap();

    assert_eq!(outcome.evaluated, 2);
    assert_eq!(outcome.failed, vec!["alice".to_string()]);
    assert_eq!(outcome.notified, vec!["bob".to_string()]);
    assert_eq!(notifier.sent, vec!["bob".to_string()]);
}

#[test]
fn rerunning_the_job_produces_the_identical_notification_set() {
    let db_path = setup_test_db("notify_idempotent");
    let mut pool = open_pool(&db_path);
    seed_user(&pool, "alice", "pw");
    seed_user(&pool, "bob", "pw");

    SessionLogic::login_at(&mut pool, "alice", "pw", dt(2025, 3, 10, 9, 0, 0)).unwrap();
    SessionLogic::logout_at(&mut pool, "alice", dt(2025, 3, 10, 16, 45, 0)).unwrap();
    SessionLogic::login_at(&mut pool, "bob", "pw", dt(2025, 3, 10, 8, 0, 0)).unwrap();
    SessionLogic::logout_at(&mut pool, "bob", dt(2025, 3, 10, 12, 0, 0)).unwrap();

    let mut first = RecordingNotifier::default();
    let mut second = RecordingNotifier::default();

    for notifier in [&mut first, &mut second] {
        NotifyLogic::run_for_day(
            &mut pool,
            notifier,
            day(2025, 3, 10),
            REQUIRED,
            SUBJECT,
            template::DEFAULT_TEMPLATE,
        )
        .unwrap();
    }

    assert_eq!(first.sent, second.sent);
    assert_eq!(first.sent.len(), 2);
}

#[test]
fn template_renders_variables_and_blanks_unknown_tokens() {
    let mut vars = HashMap::new();
    vars.insert("name".to_string(), "alice".to_string());

    let out = template::render("Hi ${name}, missing ${missingMinutes}!", &vars);
    assert_eq!(out, "Hi alice, missing !");

    let untouched = template::render("no tokens here", &vars);
    assert_eq!(untouched, "no tokens here");
}

#[test]
fn scheduler_picks_today_before_the_run_time_and_tomorrow_after() {
    let at = NaiveTime::from_hms_opt(21, 0, 0).unwrap();

    let before = dt(2025, 3, 10, 14, 30, 0);
    assert_eq!(scheduler::next_run_after(before, at), dt(2025, 3, 10, 21, 0, 0));

    let after = dt(2025, 3, 10, 21, 0, 0);
    assert_eq!(scheduler::next_run_after(after, at), dt(2025, 3, 11, 21, 0, 0));
}
