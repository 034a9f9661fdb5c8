use serde::Serialize;

/// Derived (never persisted) per-user total for one day window.
/// Computed fresh from the session store on every query or job run.
#[derive(Debug, Clone, Serialize)]
pub struct DayTally {
    pub username: String,
    pub total_minutes: i64,
}

impl DayTally {
    pub fn new(username: String, total_minutes: i64) -> Self {
        Self {
            username,
            total_minutes,
        }
    }

    /// Minutes short of `required`, clamped at zero.
    pub fn missing(&self, required: i64) -> i64 {
        (required - self.total_minutes).max(0)
    }

    pub fn meets(&self, required: i64) -> bool {
        self.total_minutes >= required
    }
}
