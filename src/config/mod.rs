use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Daily minute threshold below which a user gets notified (8 hours).
pub fn default_required_minutes() -> i64 {
    480
}

fn default_notify_at() -> String {
    "21:00".to_string()
}

fn default_notify_subject() -> String {
    "Daily working hours below the required minimum".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_required_minutes")]
    pub required_minutes: i64,
    #[serde(default = "default_notify_at")]
    pub notify_at: String,
    #[serde(default = "default_notify_subject")]
    pub notify_subject: String,
    /// Optional override for the built-in notification template.
    #[serde(default)]
    pub template_file: Option<String>,
    /// Directory the outbox notifier writes rendered messages into.
    /// Defaults to `<config dir>/outbox` when unset.
    #[serde(default)]
    pub outbox_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            required_minutes: default_required_minutes(),
            notify_at: default_notify_at(),
            notify_subject: default_notify_subject(),
            template_file: None,
            outbox_dir: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("attlog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".attlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("attlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("attlog.sqlite")
    }

    /// Default outbox directory for the filesystem notifier.
    pub fn default_outbox_dir() -> PathBuf {
        Self::config_dir().join("outbox")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).expect("❌ Failed to read configuration file");
            serde_yaml::from_str(&content).expect("❌ Failed to parse configuration file")
        } else {
            Config::default()
        }
    }

    /// Check the configuration file: report fields that are missing and
    /// would fall back to defaults. Returns the number of missing fields.
    pub fn check() -> usize {
        let path = Self::config_file();
        if !path.exists() {
            println!("⚠️  No configuration file found at {}", path.display());
            return 0;
        }

        let content = fs::read_to_string(&path).unwrap_or_default();
        let keys = [
            "database",
            "required_minutes",
            "notify_at",
            "notify_subject",
        ];

        let mut missing = 0;
        for key in keys {
            if !content.contains(key) {
                println!("⚠️  Missing field '{}' (default will be used)", key);
                missing += 1;
            }
        }

        if missing == 0 {
            println!("✅ Configuration file is complete.");
        }
        missing
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file (skipped in test mode so tests never touch
        // the real user configuration)
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}
