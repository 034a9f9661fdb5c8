#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use attlog::db::pool::DbPool;
use chrono::{NaiveDate, NaiveDateTime};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn atl() -> Command {
    cargo_bin_cmd!("attlog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_attlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Initialize the DB via the CLI and provision one account
pub fn init_db_with_user(db_path: &str, username: &str, password: &str) {
    atl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    atl()
        .args([
            "--db",
            db_path,
            "--test",
            "user",
            "--add",
            username,
            "--password",
            password,
        ])
        .assert()
        .success();
}

/// Open a pool on a fresh DB via the library API (schema + admin seed)
pub fn open_pool(db_path: &str) -> DbPool {
    let pool = DbPool::new(db_path).expect("open db");
    attlog::db::initialize::init_db(&pool.conn).expect("init db");
    pool
}

pub fn seed_user(pool: &DbPool, username: &str, password: &str) {
    attlog::db::queries::insert_user(
        &pool.conn,
        username,
        password,
        "",
        "",
        "2025-01-01T00:00:00+00:00",
    )
    .expect("insert user");
}

pub fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
