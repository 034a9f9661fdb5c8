use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::AggregateLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::colors::{GREY, RESET, color_for_total};
use crate::utils::date;
use crate::utils::formatting::{bold, mins2readable, pad_right};

/// Per-user worked-time table for one day, grouped from that day's sessions.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { date: day } = cmd {
        let day = match day {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => date::today(),
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let tally = AggregateLogic::tally_for_day(&mut pool, day)?;

        println!("{}", bold(&format!("Worked time for {}", day)));
        println!();

        if tally.is_empty() {
            println!("{}No sessions recorded.{}", GREY, RESET);
            return Ok(());
        }

        let name_w = tally
            .iter()
            .map(|t| t.username.len())
            .max()
            .unwrap_or(8)
            .max(8);

        for entry in &tally {
            let color = color_for_total(entry.total_minutes, cfg.required_minutes);
            let shortfall = if entry.meets(cfg.required_minutes) {
                String::new()
            } else {
                format!(
                    "  (missing {} min)",
                    entry.missing(cfg.required_minutes)
                )
            };

            println!(
                "{}  {}{}{}{}",
                pad_right(&entry.username, name_w),
                color,
                mins2readable(entry.total_minutes, false),
                RESET,
                shortfall
            );
        }
    }

    Ok(())
}
