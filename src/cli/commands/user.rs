use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::colors::{GREEN, GREY, RED, RESET};
use crate::utils::formatting::pad_right;
use chrono::Local;

/// Provision, lock/unlock and list accounts.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::User {
        add,
        password,
        email,
        full_name,
        lock,
        unlock,
        list,
        active,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) ADD
        //
        if let Some(username) = add {
            let password = password
                .as_ref()
                .ok_or_else(|| AppError::Config("--add requires --password".to_string()))?;

            if queries::find_user_by_username(&pool.conn, username)?.is_some() {
                return Err(AppError::Other(format!(
                    "User '{}' already exists",
                    username
                )));
            }

            queries::insert_user(
                &pool.conn,
                username,
                password,
                email.as_deref().unwrap_or(""),
                full_name.as_deref().unwrap_or(""),
                &Local::now().to_rfc3339(),
            )?;

            let _ = ttlog(&pool.conn, "user", username, "Account provisioned");
            messages::success(format!("User '{}' created.", username));
        }

        //
        // 2) LOCK / UNLOCK
        //
        if let Some(username) = lock {
            if !queries::set_user_active(&pool.conn, username, false)? {
                return Err(AppError::NotFound(username.clone()));
            }
            let _ = ttlog(&pool.conn, "user", username, "Account locked");
            messages::success(format!("User '{}' locked.", username));
        }

        if let Some(username) = unlock {
            if !queries::set_user_active(&pool.conn, username, true)? {
                return Err(AppError::NotFound(username.clone()));
            }
            let _ = ttlog(&pool.conn, "user", username, "Account unlocked");
            messages::success(format!("User '{}' unlocked.", username));
        }

        //
        // 3) LIST
        //
        if *list {
            let users = if *active {
                queries::list_active_users(&pool.conn)?
            } else {
                queries::list_all_users(&pool.conn)?
            };

            if users.is_empty() {
                println!("{}No accounts found.{}", GREY, RESET);
                return Ok(());
            }

            let name_w = users
                .iter()
                .map(|u| u.username.len())
                .max()
                .unwrap_or(8)
                .max(8);

            println!("{}  STATE", pad_right("USERNAME", name_w));
            for u in users {
                let state = if u.active {
                    format!("{}active{}", GREEN, RESET)
                } else {
                    format!("{}locked{}", RED, RESET)
                };
                println!("{}  {}", pad_right(&u.username, name_w), state);
            }
        }
    }

    Ok(())
}
