use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;

/// Show whether a user currently has an active session. A query only.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { username, json } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let session = SessionLogic::is_logged_in(&mut pool, username)?;

        if *json {
            let payload = serde_json::json!({
                "username": username,
                "logged_in": session.is_some(),
                "session": session,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload)
                    .map_err(|e| AppError::Other(e.to_string()))?
            );
            return Ok(());
        }

        match session {
            Some(s) => messages::info(format!(
                "User '{}' is logged in since {} (session {})",
                username,
                s.login_str(),
                s.id
            )),
            None => messages::info(format!("User '{}' is not logged in", username)),
        }
    }

    Ok(())
}
