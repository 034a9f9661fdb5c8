use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages;

/// Open a session for a user.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Login { username, password } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let session = SessionLogic::login(&mut pool, username, password)?;

        messages::success(format!(
            "User '{}' logged in at {} (session {})",
            username,
            session.login_str(),
            session.id
        ));
    }

    Ok(())
}
