use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) USERS
    //
    let users: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    let locked: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users WHERE active = 0", [], |row| {
            row.get(0)
        })?;
    println!(
        "{}• Users:{} {}{}{} ({} locked)",
        CYAN, RESET, GREEN, users, RESET, locked
    );

    //
    // 3) SESSIONS
    //
    let sessions: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
    let open: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE logout_time IS NULL",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Sessions:{} {}{}{} ({} still open)",
        CYAN, RESET, GREEN, sessions, RESET, open
    );

    //
    // 4) LOGIN DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row(
            "SELECT login_time FROM sessions ORDER BY login_time ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last: Option<String> = pool
        .conn
        .query_row(
            "SELECT login_time FROM sessions ORDER BY login_time DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first.unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Login range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    println!();
    Ok(())
}
