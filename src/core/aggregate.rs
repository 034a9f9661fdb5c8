//! Daily aggregation: sums of worked minutes over a day window.
//! Pure reads; the tally is derived on every call and never persisted.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::day_tally::DayTally;
use crate::utils::date;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

pub struct AggregateLogic;

impl AggregateLogic {
    /// Sum of working_minutes for one user whose login_time lies in
    /// [start, end). Sessions still open contribute 0.
    pub fn sum_working_minutes(
        pool: &mut DbPool,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<i64> {
        queries::sum_working_minutes(&pool.conn, user_id, start, end)
    }

    /// Per-user totals for one day, grouped from that day's sessions with a
    /// single range query. Only users with at least one session in the
    /// window appear. Ordered by username so the result is deterministic.
    pub fn tally_for_day(pool: &mut DbPool, day: NaiveDate) -> AppResult<Vec<DayTally>> {
        let (start, end) = date::day_window(day);
        let rows = queries::find_sessions_in_range(&pool.conn, start, end)?;

        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for (session, username) in rows {
            *totals.entry(username).or_insert(0) += session.working_minutes.unwrap_or(0);
        }

        Ok(totals
            .into_iter()
            .map(|(username, total)| DayTally::new(username, total))
            .collect())
    }
}
