use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration:\n");
            println!(
                "{}",
                serde_yaml::to_string(&cfg)
                    .map_err(|e| crate::errors::AppError::Config(e.to_string()))?
            );
        }

        // ---- CHECK CONFIG ----
        if *check {
            Config::check();
        }
    }

    Ok(())
}
