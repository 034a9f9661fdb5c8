//! Daily timer for the attendance job. The scheduler owns no job state: it
//! only computes the next fixed local run time, sleeps, and calls the job's
//! single entry point. Runs are serialized by construction: the next sleep
//! starts only after the previous run returns.

use crate::config::Config;
use crate::core::dispatcher::Notifier;
use crate::core::notify::NotifyLogic;
use crate::core::template;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use chrono::{NaiveDateTime, NaiveTime};
use std::thread;
use std::time::Duration;

/// The next occurrence of `at` strictly after `now`: today if still ahead,
/// tomorrow otherwise.
pub fn next_run_after(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let today_run = now.date().and_time(at);
    if now < today_run {
        today_run
    } else {
        today_run + chrono::Duration::days(1)
    }
}

/// Sleep-and-fire loop. Never returns except on store errors while opening
/// the database for a run.
pub fn run_forever(cfg: &Config, at: NaiveTime, notifier: &mut dyn Notifier) -> AppResult<()> {
    let template_body = template::load_template(cfg.template_file.as_ref())?;

    loop {
        let now = chrono::Local::now().naive_local();
        let next = next_run_after(now, at);

        messages::info(format!(
            "Next attendance check: {}",
            next.format("%Y-%m-%d %H:%M")
        ));

        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        thread::sleep(wait);

        let mut pool = DbPool::new(&cfg.database)?;
        match NotifyLogic::run_for_day(
            &mut pool,
            notifier,
            next.date(),
            cfg.required_minutes,
            &cfg.notify_subject,
            &template_body,
        ) {
            Ok(outcome) => messages::success(format!(
                "Attendance check done: {} evaluated, {} notified, {} failed",
                outcome.evaluated,
                outcome.notified.len(),
                outcome.failed.len()
            )),
            Err(e) => messages::error(format!("Attendance check failed: {}", e)),
        }
    }
}
