use chrono::NaiveDateTime;
use serde::Serialize;

/// Storage format for session timestamps (local clock, TEXT column).
pub const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One login-to-logout interval for a user.
///
/// Invariant: per user at most one row has `logout_time` = NULL. A session is
/// created open (logout_time/working_minutes absent, active) and is mutated
/// exactly once, on logout. Rows are never deleted.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,                        // ⇔ sessions.user_id (FK, non-owning)
    pub login_time: NaiveDateTime,           // ⇔ sessions.login_time (TEXT)
    pub logout_time: Option<NaiveDateTime>,  // ⇔ sessions.logout_time (TEXT, NULL while open)
    pub working_minutes: Option<i64>,        // ⇔ sessions.working_minutes (INT, NULL while open)
    pub active: bool,                        // ⇔ sessions.active (INT 0/1)
}

impl Session {
    /// A freshly opened session, before it has an id assigned by the store.
    pub fn open(user_id: i64, login_time: NaiveDateTime) -> Self {
        Self {
            id: 0,
            user_id,
            login_time,
            logout_time: None,
            working_minutes: None,
            active: true,
        }
    }

    /// Close the session at `logout_time`. Worked minutes are the whole
    /// minutes elapsed since login (floor, not rounded).
    pub fn close(&mut self, logout_time: NaiveDateTime) {
        self.working_minutes = Some((logout_time - self.login_time).num_minutes());
        self.logout_time = Some(logout_time);
        self.active = false;
    }

    pub fn login_str(&self) -> String {
        self.login_time.format(DT_FORMAT).to_string()
    }

    pub fn logout_str(&self) -> Option<String> {
        self.logout_time.map(|t| t.format(DT_FORMAT).to_string())
    }
}
