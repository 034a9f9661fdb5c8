use clap::{Parser, Subcommand};

/// Command-line interface definition for attlog
/// CLI application to track employee attendance sessions with SQLite
#[derive(Parser)]
#[command(
    name = "attlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track employee login/logout sessions and notify daily shortfalls, backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage user accounts
    User {
        #[arg(
            long = "add",
            value_name = "USERNAME",
            requires = "password",
            help = "Provision a new account (requires --password)"
        )]
        add: Option<String>,

        #[arg(long = "password", value_name = "PASSWORD")]
        password: Option<String>,

        #[arg(long = "email", value_name = "EMAIL")]
        email: Option<String>,

        #[arg(long = "full-name", value_name = "NAME")]
        full_name: Option<String>,

        #[arg(long = "lock", value_name = "USERNAME", help = "Deactivate an account")]
        lock: Option<String>,

        #[arg(long = "unlock", value_name = "USERNAME", help = "Reactivate an account")]
        unlock: Option<String>,

        #[arg(long = "list", help = "List accounts")]
        list: bool,

        #[arg(long = "active", help = "Only active accounts (with --list)")]
        active: bool,
    },

    /// Open a session for a user
    Login {
        username: String,
        password: String,
    },

    /// Close the active session for a user
    Logout { username: String },

    /// Show whether a user currently has an active session
    Status {
        username: String,

        #[arg(long, help = "Machine-readable JSON output")]
        json: bool,
    },

    /// Total worked minutes for a user today
    Today {
        username: String,

        #[arg(long = "details", help = "List today's individual sessions")]
        details: bool,

        #[arg(long, help = "Machine-readable JSON output")]
        json: bool,
    },

    /// Per-user worked-time report for one day
    Report {
        #[arg(long, value_name = "DATE", help = "Day to report (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Run the end-of-day shortfall notification job once
    Notify {
        #[arg(long, value_name = "DATE", help = "Day to evaluate (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(
            long = "dry-run",
            help = "Print notifications to the terminal instead of the outbox"
        )]
        dry_run: bool,

        #[arg(long, value_name = "DIR", help = "Override the outbox directory")]
        outbox: Option<String>,
    },

    /// Run the daily notification scheduler in the foreground
    Watch {
        #[arg(long, value_name = "HH:MM", help = "Daily run time (default from config, 21:00)")]
        at: Option<String>,

        #[arg(long, value_name = "DIR", help = "Override the outbox directory")]
        outbox: Option<String>,
    },
}
