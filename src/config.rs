//! Configuration module for Vuka.

use serde::Deserialize;
use std::path::Path;

use crate::rss::MAX_FEED_SIZE;
use crate::{Result, VukaError};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:4200".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/vuka.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/vuka.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// RSS ingestion configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestionConfig {
    /// Whether scheduled ingestion is enabled.
    #[serde(default = "default_ingestion_enabled")]
    pub enabled: bool,
    /// Cron expression with seconds precision, in local time.
    #[serde(default = "default_schedule")]
    pub schedule: String,
    /// Local hour of day for daily scheduling. Overrides `schedule` when set
    /// together with `daily_minute`.
    #[serde(default)]
    pub daily_hour: Option<u32>,
    /// Minute of hour for daily scheduling.
    #[serde(default)]
    pub daily_minute: Option<u32>,
    /// Run a full ingestion immediately after startup.
    #[serde(default)]
    pub run_on_startup: bool,
    /// Language code used when a feed does not declare one.
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Maximum feed size in bytes.
    #[serde(default = "default_max_feed_size")]
    pub max_feed_size_bytes: u64,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_total_timeout")]
    pub total_timeout_secs: u64,
    /// Maximum number of redirects.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Allow feeds on loopback and private network addresses.
    #[serde(default)]
    pub allow_private_networks: bool,
}

fn default_ingestion_enabled() -> bool {
    true
}

fn default_schedule() -> String {
    "0 0 * * * *".to_string() // top of every hour
}

fn default_language() -> String {
    "en".to_string()
}

fn default_max_feed_size() -> u64 {
    MAX_FEED_SIZE
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_read_timeout() -> u64 {
    20
}

fn default_total_timeout() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    5
}

impl IngestionConfig {
    /// The cron expression the scheduler registers.
    ///
    /// When both `daily_hour` and `daily_minute` are set, this is the daily
    /// variant `0 {minute} {hour} * * *`; otherwise `schedule` is used as is.
    pub fn cron_expression(&self) -> String {
        match (self.daily_hour, self.daily_minute) {
            (Some(hour), Some(minute)) => format!("0 {} {} * * *", minute, hour),
            _ => self.schedule.clone(),
        }
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            enabled: default_ingestion_enabled(),
            schedule: default_schedule(),
            daily_hour: None,
            daily_minute: None,
            run_on_startup: false,
            default_language: default_language(),
            max_feed_size_bytes: default_max_feed_size(),
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            total_timeout_secs: default_total_timeout(),
            max_redirects: default_max_redirects(),
            allow_private_networks: false,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// RSS ingestion configuration.
    #[serde(default)]
    pub ingestion: IngestionConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(VukaError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| VukaError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `VUKA_DATABASE_PATH`: database file path
    /// - `PORT`: HTTP listen port
    /// - `VUKA_LOG_LEVEL`: log level
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(path) = non_empty_env("VUKA_DATABASE_PATH") {
            self.database.path = path;
        }

        if let Some(port) = non_empty_env("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
            }
        }

        if let Some(level) = non_empty_env("VUKA_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let ingestion = &self.ingestion;

        if let Some(hour) = ingestion.daily_hour {
            if hour > 23 {
                return Err(VukaError::Validation(format!(
                    "ingestion.daily_hour must be 0-23, got {hour}"
                )));
            }
        }
        if let Some(minute) = ingestion.daily_minute {
            if minute > 59 {
                return Err(VukaError::Validation(format!(
                    "ingestion.daily_minute must be 0-59, got {minute}"
                )));
            }
        }
        if ingestion.daily_hour.is_some() != ingestion.daily_minute.is_some() {
            return Err(VukaError::Validation(
                "ingestion.daily_hour and ingestion.daily_minute must be set together".to_string(),
            ));
        }
        if ingestion.total_timeout_secs == 0 {
            return Err(VukaError::Validation(
                "ingestion.total_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
