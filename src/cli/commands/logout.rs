use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;
use crate::utils::formatting::mins2readable;

/// Close the active session for a user.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Logout { username } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let session = SessionLogic::logout(&mut pool, username)?;

        messages::success(format!(
            "User '{}' logged out, worked {}",
            username,
            mins2readable(session.working_minutes.unwrap_or(0), false)
        ));
    }

    Ok(())
}
