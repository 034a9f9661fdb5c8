use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dispatcher::{ConsoleNotifier, Notifier, OutboxNotifier};
use crate::core::notify::NotifyLogic;
use crate::core::template;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date;
use crate::utils::path::expand_tilde;

/// Run the end-of-day shortfall notification job once, for today or for an
/// explicit date. This is the same entry point the `watch` scheduler fires.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Notify {
        date: day,
        dry_run,
        outbox,
    } = cmd
    {
        let day = match day {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let template_body = template::load_template(cfg.template_file.as_ref())?;

        let mut console = ConsoleNotifier;
        let mut outbox_notifier;
        let notifier: &mut dyn Notifier = if *dry_run {
            &mut console
        } else {
            let dir = outbox
                .as_ref()
                .or(cfg.outbox_dir.as_ref())
                .map(|p| expand_tilde(p))
                .unwrap_or_else(Config::default_outbox_dir);
            outbox_notifier = OutboxNotifier::new(dir);
            &mut outbox_notifier
        };

        let mut pool = DbPool::new(&cfg.database)?;

        let outcome = NotifyLogic::run_for_day(
            &mut pool,
            notifier,
            day,
            cfg.required_minutes,
            &cfg.notify_subject,
            &template_body,
        )?;

        messages::success(format!(
            "Notification run for {}: {} evaluated, {} notified, {} failed",
            day,
            outcome.evaluated,
            outcome.notified.len(),
            outcome.failed.len()
        ));
    }

    Ok(())
}
