use crate::errors::AppResult;
use crate::models::session::{DT_FORMAT, Session};
use crate::models::user::User;
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------------------------------------------------------
// User directory
// ---------------------------------------------------------------------------

pub fn map_user_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        password: row.get("password")?,
        email: row.get("email")?,
        full_name: row.get("full_name")?,
        active: row.get::<_, i64>("active")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn find_user_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM users WHERE username = ?1")?;
    let user = stmt.query_row([username], map_user_row).optional()?;
    Ok(user)
}

pub fn list_active_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt =
        conn.prepare("SELECT * FROM users WHERE active = 1 ORDER BY username ASC")?;

    let rows = stmt.query_map([], map_user_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_all_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users ORDER BY username ASC")?;

    let rows = stmt.query_map([], map_user_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_user(
    conn: &Connection,
    username: &str,
    password: &str,
    email: &str,
    full_name: &str,
    created_at: &str,
) -> AppResult<User> {
    conn.execute(
        "INSERT INTO users (username, password, email, full_name, active, created_at)
         VALUES (?1, ?2, ?3, ?4, 1, ?5)",
        params![username, password, email, full_name, created_at],
    )?;

    Ok(User {
        id: conn.last_insert_rowid(),
        username: username.to_string(),
        password: password.to_string(),
        email: email.to_string(),
        full_name: full_name.to_string(),
        active: true,
        created_at: created_at.to_string(),
    })
}

/// Toggle the `active` flag. Returns true when a row was updated.
pub fn set_user_active(conn: &Connection, username: &str, active: bool) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE users SET active = ?1 WHERE username = ?2",
        params![if active { 1 } else { 0 }, username],
    )?;
    Ok(changed > 0)
}

// ---------------------------------------------------------------------------
// Session store
// ---------------------------------------------------------------------------

fn parse_dt(field: &str, value: String) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&value, DT_FORMAT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(crate::errors::AppError::InvalidDate(format!(
                "{}: {}",
                field, value
            ))),
        )
    })
}

pub fn map_session_row(row: &Row) -> Result<Session> {
    let login_raw: String = row.get("login_time")?;
    let logout_raw: Option<String> = row.get("logout_time")?;

    let login_time = parse_dt("login_time", login_raw)?;
    let logout_time = match logout_raw {
        Some(v) => Some(parse_dt("logout_time", v)?),
        None => None,
    };

    Ok(Session {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        login_time,
        logout_time,
        working_minutes: row.get("working_minutes")?,
        active: row.get::<_, i64>("active")? == 1,
    })
}

/// The open session for a user, if any. "Open" means logout_time IS NULL;
/// there is at most one such row per user.
pub fn find_active_session(conn: &Connection, user_id: i64) -> AppResult<Option<Session>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM sessions WHERE user_id = ?1 AND logout_time IS NULL",
    )?;
    let session = stmt.query_row([user_id], map_session_row).optional()?;
    Ok(session)
}

pub fn insert_session(conn: &Connection, session: &Session) -> AppResult<Session> {
    conn.execute(
        "INSERT INTO sessions (user_id, login_time, logout_time, working_minutes, active)
         VALUES (?1, ?2, NULL, NULL, 1)",
        params![session.user_id, session.login_str()],
    )?;

    let mut stored = session.clone();
    stored.id = conn.last_insert_rowid();
    Ok(stored)
}

/// Persist the one-time close mutation of a session.
pub fn close_session(conn: &Connection, session: &Session) -> AppResult<()> {
    conn.execute(
        "UPDATE sessions
         SET logout_time = ?1, working_minutes = ?2, active = 0
         WHERE id = ?3",
        params![session.logout_str(), session.working_minutes, session.id],
    )?;
    Ok(())
}

/// All sessions with login_time in [start, end), joined with the username.
/// The notifier groups on the username, so the join happens here instead of
/// navigating from session to user row by row.
pub fn find_sessions_in_range(
    conn: &Connection,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> AppResult<Vec<(Session, String)>> {
    let mut stmt = conn.prepare(
        "SELECT s.*, u.username FROM sessions s
         JOIN users u ON u.id = s.user_id
         WHERE s.login_time >= ?1 AND s.login_time < ?2
         ORDER BY s.login_time ASC",
    )?;

    let rows = stmt.query_map(
        params![
            start.format(DT_FORMAT).to_string(),
            end.format(DT_FORMAT).to_string()
        ],
        |row| {
            let session = map_session_row(row)?;
            let username: String = row.get("username")?;
            Ok((session, username))
        },
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Sum of working_minutes for one user over [start, end).
/// Open sessions (working_minutes NULL) contribute 0 via COALESCE.
pub fn sum_working_minutes(
    conn: &Connection,
    user_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "SELECT COALESCE(SUM(working_minutes), 0) FROM sessions
         WHERE user_id = ?1 AND login_time >= ?2 AND login_time < ?3",
    )?;

    let total: i64 = stmt.query_row(
        params![
            user_id,
            start.format(DT_FORMAT).to_string(),
            end.format(DT_FORMAT).to_string()
        ],
        |row| row.get(0),
    )?;

    Ok(total)
}

/// Sessions of a single user for a day window, newest first.
/// Used by the `today` command detail listing.
pub fn find_user_sessions_in_range(
    conn: &Connection,
    user_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> AppResult<Vec<Session>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM sessions
         WHERE user_id = ?1 AND login_time >= ?2 AND login_time < ?3
         ORDER BY login_time ASC",
    )?;

    let rows = stmt.query_map(
        params![
            user_id,
            start.format(DT_FORMAT).to_string(),
            end.format(DT_FORMAT).to_string()
        ],
        map_session_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
