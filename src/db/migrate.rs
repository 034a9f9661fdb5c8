use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `users` table.
fn create_users_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            username   TEXT NOT NULL UNIQUE,
            password   TEXT NOT NULL,
            email      TEXT NOT NULL DEFAULT '',
            full_name  TEXT NOT NULL DEFAULT '',
            active     INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `sessions` table.
///
/// The partial unique index is the store-level backstop for the
/// one-active-session-per-user invariant: a second open row for the same
/// user cannot be inserted even by a buggy caller.
fn create_sessions_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id         INTEGER NOT NULL REFERENCES users(id),
            login_time      TEXT NOT NULL,
            logout_time     TEXT,
            working_minutes INTEGER,
            active          INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_login_time ON sessions(login_time);
        CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_one_active
            ON sessions(user_id) WHERE logout_time IS NULL;
        "#,
    )?;
    Ok(())
}

/// Has a versioned migration already been applied?
fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_migration_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Older databases predate the partial unique index on open sessions;
/// add it and record the migration.
fn migrate_add_active_session_index(conn: &Connection) -> Result<()> {
    let version = "20250601_0001_one_active_session_index";

    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_one_active
            ON sessions(user_id) WHERE logout_time IS NULL;
        "#,
    )?;

    mark_migration_applied(conn, version, "Added unique index on open sessions")?;

    success(format!(
        "Migration applied: {} → unique open-session index",
        version
    ));

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Base schema
    let users_existed = table_exists(conn, "users")?;
    let sessions_existed = table_exists(conn, "sessions")?;

    if !users_existed {
        create_users_table(conn)?;
        success("Created users table.");
    }

    if !sessions_existed {
        create_sessions_table(conn)?;
        success("Created sessions table.");
    }

    // 3) Versioned migrations for databases created before the index existed
    if sessions_existed {
        migrate_add_active_session_index(conn)?;
    }

    Ok(())
}
