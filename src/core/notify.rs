//! The end-of-day attendance job: tally the day, find who is short of the
//! required minutes, render and dispatch one notification each.
//!
//! Selection policy: users are taken from the day's sessions (one range
//! query, grouped by username). Whoever has no session today is not
//! evaluated at all. Re-running the job on unchanged data yields the same
//! notification set; delivery is at-least-once, no dedup state is kept.

use crate::core::aggregate::AggregateLogic;
use crate::core::dispatcher::Notifier;
use crate::core::template;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::time::minutes_as_hours;
use chrono::NaiveDate;
use std::collections::HashMap;

/// What one run did. The job itself only fails on store errors; per-user
/// render/dispatch failures land in `failed` and never abort the run.
#[derive(Debug, Default)]
pub struct NotifyOutcome {
    pub evaluated: usize,
    pub notified: Vec<String>,
    pub failed: Vec<String>,
}

pub struct NotifyLogic;

impl NotifyLogic {
    pub fn run_for_day(
        pool: &mut DbPool,
        notifier: &mut dyn Notifier,
        day: NaiveDate,
        required_minutes: i64,
        subject: &str,
        template_body: &str,
    ) -> AppResult<NotifyOutcome> {
        let tally = AggregateLogic::tally_for_day(pool, day)?;

        let mut outcome = NotifyOutcome::default();

        for entry in &tally {
            outcome.evaluated += 1;

            if entry.meets(required_minutes) {
                continue;
            }

            let missing = entry.missing(required_minutes);

            let mut variables = HashMap::new();
            variables.insert("name".to_string(), entry.username.clone());
            variables.insert(
                "actualHours".to_string(),
                minutes_as_hours(entry.total_minutes),
            );
            variables.insert("missingMinutes".to_string(), missing.to_string());

            let body = template::render(template_body, &variables);

            // The username doubles as the recipient address.
            match notifier.send(&entry.username, subject, &body) {
                Ok(()) => outcome.notified.push(entry.username.clone()),
                Err(e) => {
                    messages::error(format!(
                        "Failed to notify {}: {}",
                        entry.username, e
                    ));
                    let _ = ttlog(
                        &pool.conn,
                        "notify_failed",
                        &entry.username,
                        &e.to_string(),
                    );
                    outcome.failed.push(entry.username.clone());
                }
            }
        }

        let _ = ttlog(
            &pool.conn,
            "notify",
            &day.format("%Y-%m-%d").to_string(),
            &format!(
                "Evaluated {} user(s), notified {}, {} failed",
                outcome.evaluated,
                outcome.notified.len(),
                outcome.failed.len()
            ),
        );

        Ok(outcome)
    }
}
