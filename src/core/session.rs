//! The session state machine: login opens a session, logout closes it and
//! fixes the worked minutes. Per user the states are {NoActiveSession,
//! ActiveSession}; a login while active is rejected, never queued.

use crate::core::aggregate::AggregateLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::session::Session;
use crate::utils::date;
use chrono::NaiveDateTime;
use rusqlite::TransactionBehavior;

pub struct SessionLogic;

impl SessionLogic {
    /// Open a session for `username` at the current local time.
    pub fn login(pool: &mut DbPool, username: &str, password: &str) -> AppResult<Session> {
        Self::login_at(pool, username, password, date::now_local())
    }

    /// Open a session at an explicit timestamp.
    ///
    /// The user lookup, the credential/lock checks, the open-session check
    /// and the insert all run inside one IMMEDIATE transaction: two
    /// concurrent logins for the same user serialize on the write lock, and
    /// the loser sees the winner's row.
    pub fn login_at(
        pool: &mut DbPool,
        username: &str,
        password: &str,
        now: NaiveDateTime,
    ) -> AppResult<Session> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let user = queries::find_user_by_username(&tx, username)?
            .ok_or_else(|| AppError::NotFound(username.to_string()))?;

        // Exact, case-sensitive string equality. Intentionally weak,
        // preserved behavior of the system this replaces.
        if user.password != password {
            return Err(AppError::InvalidCredentials(username.to_string()));
        }

        if user.is_locked() {
            return Err(AppError::AccountLocked(username.to_string()));
        }

        if queries::find_active_session(&tx, user.id)?.is_some() {
            return Err(AppError::AlreadyLoggedIn(username.to_string()));
        }

        let session = queries::insert_session(&tx, &Session::open(user.id, now))?;
        tx.commit()?;

        // Audit trail, non-blocking
        let _ = ttlog(
            &pool.conn,
            "login",
            username,
            &format!("Session {} opened at {}", session.id, session.login_str()),
        );

        Ok(session)
    }

    /// Close the open session for `username` at the current local time.
    pub fn logout(pool: &mut DbPool, username: &str) -> AppResult<Session> {
        Self::logout_at(pool, username, date::now_local())
    }

    /// Close the open session at an explicit timestamp. Sets logout_time,
    /// working_minutes = floor(whole minutes since login) and active = false
    /// in a single update.
    pub fn logout_at(
        pool: &mut DbPool,
        username: &str,
        now: NaiveDateTime,
    ) -> AppResult<Session> {
        let tx = pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let user = queries::find_user_by_username(&tx, username)?
            .ok_or_else(|| AppError::NotFound(username.to_string()))?;

        let mut session = queries::find_active_session(&tx, user.id)?
            .ok_or_else(|| AppError::NoActiveSession(username.to_string()))?;

        session.close(now);
        queries::close_session(&tx, &session)?;
        tx.commit()?;

        let _ = ttlog(
            &pool.conn,
            "logout",
            username,
            &format!(
                "Session {} closed, {} working minutes",
                session.id,
                session.working_minutes.unwrap_or(0)
            ),
        );

        Ok(session)
    }

    /// The open session for `username`, or None. A query, never a mutation.
    pub fn is_logged_in(pool: &mut DbPool, username: &str) -> AppResult<Option<Session>> {
        let user = queries::find_user_by_username(&pool.conn, username)?
            .ok_or_else(|| AppError::NotFound(username.to_string()))?;

        queries::find_active_session(&pool.conn, user.id)
    }

    /// Total worked minutes for `username` over today's window.
    /// 0 when nothing falls in range.
    pub fn working_minutes_today(pool: &mut DbPool, username: &str) -> AppResult<i64> {
        Self::working_minutes_on(pool, username, date::today())
    }

    pub fn working_minutes_on(
        pool: &mut DbPool,
        username: &str,
        day: chrono::NaiveDate,
    ) -> AppResult<i64> {
        let user = queries::find_user_by_username(&pool.conn, username)?
            .ok_or_else(|| AppError::NotFound(username.to_string()))?;

        let (start, end) = date::day_window(day);
        AggregateLogic::sum_working_minutes(pool, user.id, start, end)
    }
}
