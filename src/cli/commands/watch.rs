use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dispatcher::OutboxNotifier;
use crate::core::scheduler;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::path::expand_tilde;
use crate::utils::time::parse_time_or_err;

/// Run the daily scheduler in the foreground until interrupted.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { at, outbox } = cmd {
        let at = parse_time_or_err(at.as_deref().unwrap_or(&cfg.notify_at))?;

        let dir = outbox
            .as_ref()
            .or(cfg.outbox_dir.as_ref())
            .map(|p| expand_tilde(p))
            .unwrap_or_else(Config::default_outbox_dir);

        // Fail early on an unreachable database instead of at 21:00.
        DbPool::new(&cfg.database)?;

        messages::info(format!(
            "Watching: daily check at {}, outbox {}",
            at.format("%H:%M"),
            dir.display()
        ));

        let mut notifier = OutboxNotifier::new(dir);
        scheduler::run_forever(cfg, at, &mut notifier)?;
    }

    Ok(())
}
