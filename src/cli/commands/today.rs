use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::colors::{GREY, RESET, color_for_total};
use crate::utils::date;
use crate::utils::formatting::mins2readable;

/// Total worked minutes for a user today, optionally with the individual
/// sessions.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Today {
        username,
        details,
        json,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        let total = SessionLogic::working_minutes_today(&mut pool, username)?;

        if *json {
            let payload = serde_json::json!({
                "username": username,
                "date": date::today().format("%Y-%m-%d").to_string(),
                "total_minutes": total,
                "required_minutes": cfg.required_minutes,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload)
                    .map_err(|e| AppError::Other(e.to_string()))?
            );
            return Ok(());
        }

        let color = color_for_total(total, cfg.required_minutes);
        messages::info(format!(
            "User '{}' worked {}{}{} today (required {})",
            username,
            color,
            mins2readable(total, false),
            RESET,
            mins2readable(cfg.required_minutes, false),
        ));

        if *details {
            let user = queries::find_user_by_username(&pool.conn, username)?
                .ok_or_else(|| AppError::NotFound(username.clone()))?;

            let (start, end) = date::day_window(date::today());
            let sessions = queries::find_user_sessions_in_range(&pool.conn, user.id, start, end)?;

            println!();
            for s in sessions {
                let logout = s
                    .logout_str()
                    .unwrap_or_else(|| format!("{GREY}still open{RESET}"));
                println!(
                    "  {} → {}  ({})",
                    s.login_str(),
                    logout,
                    s.working_minutes
                        .map(|m| mins2readable(m, true))
                        .unwrap_or_else(|| "--:--".to_string())
                );
            }
        }
    }

    Ok(())
}
