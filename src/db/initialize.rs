use crate::db::log::ttlog;
use crate::db::migrate::run_pending_migrations;
use crate::db::queries;
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine, then
/// seeds the bootstrap admin account if it does not exist yet.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    // NO direct CREATE TABLE here.
    // All schema is guaranteed by migrations.

    run_pending_migrations(conn)?;
    seed_default_admin(conn)?;
    Ok(())
}

/// One-time bootstrap account, created only when missing.
fn seed_default_admin(conn: &Connection) -> AppResult<()> {
    if queries::find_user_by_username(conn, "admin")?.is_some() {
        return Ok(());
    }

    queries::insert_user(
        conn,
        "admin",
        "admin123",
        "admin@example.com",
        "Admin User",
        &Local::now().to_rfc3339(),
    )?;

    ttlog(conn, "init", "admin", "Seeded default admin account")?;

    Ok(())
}
