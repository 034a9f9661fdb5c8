use predicates::str::contains;

mod common;
use common::{atl, init_db_with_user, setup_test_db};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init");

    atl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    atl()
        .args(["--db", &db_path, "--test", "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_default_admin_is_seeded() {
    let db_path = setup_test_db("admin_seed");

    atl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "--test", "login", "admin", "admin123"])
        .assert()
        .success()
        .stdout(contains("'admin' logged in"));
}

#[test]
fn test_login_logout_flow() {
    let db_path = setup_test_db("login_logout");
    init_db_with_user(&db_path, "alice", "pw");

    atl()
        .args(["--db", &db_path, "--test", "login", "alice", "pw"])
        .assert()
        .success()
        .stdout(contains("'alice' logged in"));

    atl()
        .args(["--db", &db_path, "--test", "status", "alice"])
        .assert()
        .success()
        .stdout(contains("is logged in"));

    atl()
        .args(["--db", &db_path, "--test", "logout", "alice"])
        .assert()
        .success()
        .stdout(contains("'alice' logged out"));

    atl()
        .args(["--db", &db_path, "--test", "status", "alice"])
        .assert()
        .success()
        .stdout(contains("is not logged in"));
}

#[test]
fn test_second_login_is_rejected() {
    let db_path = setup_test_db("second_login");
    init_db_with_user(&db_path, "alice", "pw");

    atl()
        .args(["--db", &db_path, "--test", "login", "alice", "pw"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "--test", "login", "alice", "pw"])
        .assert()
        .failure()
        .stderr(contains("already has an active session"));
}

#[test]
fn test_logout_without_session_fails() {
    let db_path = setup_test_db("logout_no_session");
    init_db_with_user(&db_path, "alice", "pw");

    atl()
        .args(["--db", &db_path, "--test", "logout", "alice"])
        .assert()
        .failure()
        .stderr(contains("No active session"));
}

#[test]
fn test_wrong_password_fails() {
    let db_path = setup_test_db("wrong_password");
    init_db_with_user(&db_path, "alice", "pw");

    atl()
        .args(["--db", &db_path, "--test", "login", "alice", "nope"])
        .assert()
        .failure()
        .stderr(contains("Invalid credentials"));
}

#[test]
fn test_unknown_user_fails() {
    let db_path = setup_test_db("unknown_user_cli");

    atl()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "--test", "login", "ghost", "pw"])
        .assert()
        .failure()
        .stderr(contains("Unknown user"));
}

#[test]
fn test_locked_account_cannot_login() {
    let db_path = setup_test_db("locked_account");
    init_db_with_user(&db_path, "alice", "pw");

    atl()
        .args(["--db", &db_path, "--test", "user", "--lock", "alice"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "--test", "login", "alice", "pw"])
        .assert()
        .failure()
        .stderr(contains("is locked"));

    atl()
        .args(["--db", &db_path, "--test", "user", "--unlock", "alice"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "--test", "login", "alice", "pw"])
        .assert()
        .success();
}

#[test]
fn test_today_is_zero_without_sessions() {
    let db_path = setup_test_db("today_zero");
    init_db_with_user(&db_path, "alice", "pw");

    atl()
        .args(["--db", &db_path, "--test", "today", "alice"])
        .assert()
        .success()
        .stdout(contains("00h 00m"));
}

#[test]
fn test_status_json_output() {
    let db_path = setup_test_db("status_json");
    init_db_with_user(&db_path, "alice", "pw");

    atl()
        .args(["--db", &db_path, "--test", "status", "alice", "--json"])
        .assert()
        .success()
        .stdout(contains("\"logged_in\": false"));
}

#[test]
fn test_user_list_shows_accounts() {
    let db_path = setup_test_db("user_list");
    init_db_with_user(&db_path, "alice", "pw");

    atl()
        .args(["--db", &db_path, "--test", "user", "--list"])
        .assert()
        .success()
        .stdout(contains("alice"))
        .stdout(contains("admin"));
}

#[test]
fn test_notify_dry_run_reports_shortfall() {
    let db_path = setup_test_db("notify_dry_run");
    init_db_with_user(&db_path, "alice", "pw");

    // a zero-minute day: log in and straight back out
    atl()
        .args(["--db", &db_path, "--test", "login", "alice", "pw"])
        .assert()
        .success();
    atl()
        .args(["--db", &db_path, "--test", "logout", "alice"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "--test", "notify", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("alice"))
        .stdout(contains("Subject:"))
        .stdout(contains("1 evaluated"));
}

#[test]
fn test_report_lists_missing_minutes() {
    let db_path = setup_test_db("report");
    init_db_with_user(&db_path, "alice", "pw");

    atl()
        .args(["--db", &db_path, "--test", "login", "alice", "pw"])
        .assert()
        .success();
    atl()
        .args(["--db", &db_path, "--test", "logout", "alice"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "--test", "report"])
        .assert()
        .success()
        .stdout(contains("alice"))
        .stdout(contains("missing"));
}

#[test]
fn test_log_print_records_operations() {
    let db_path = setup_test_db("log_print");
    init_db_with_user(&db_path, "alice", "pw");

    atl()
        .args(["--db", &db_path, "--test", "login", "alice", "pw"])
        .assert()
        .success();

    atl()
        .args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("login"))
        .stdout(contains("alice"));
}
