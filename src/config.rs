use crate::{configuration::*, products::unexpected::Unexpected, utilities::read_text_file};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use tracing::level_filters::LevelFilter;


#[derive(Debug, Clone, Serialize, Deserialize, Default)]
/// Dynamic configuration read on start
pub struct Config {
    /// Path to the sites file
    pub sites_file: Option<String>,

    /// Log level
    pub log_level: Option<String>,

    /// TLS connect and handshake timeout in seconds
    pub connection_timeout: Option<u64>,

    /// Days before expiry when renewal reminders become due
    pub reminder_window_days: Option<i64>,

    /// Mail relay used for alerts and reminders
    pub smtp: Option<SmtpConfig>,
}


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Mail relay settings
pub struct SmtpConfig {
    /// Relay host
    #[serde(default = "default_smtp_server")]
    pub server: String,

    /// Relay port
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Sender address
    #[serde(default = "default_smtp_from")]
    pub from: String,

    /// Optional login
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub username: Option<String>,

    /// Optional password
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub password: Option<String>,

    /// Upgrade the connection with STARTTLS
    #[serde(default)]
    pub starttls: bool,
}


impl Default for SmtpConfig {
    fn default() -> SmtpConfig {
        SmtpConfig {
            server: default_smtp_server(),
            port: default_smtp_port(),
            from: default_smtp_from(),
            username: None,
            password: None,
            starttls: false,
        }
    }
}


fn default_smtp_server() -> String {
    String::from(DEFAULT_SMTP_SERVER)
}


fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}


fn default_smtp_from() -> String {
    String::from(DEFAULT_SMTP_FROM)
}


impl Config {
    /// Load configuration from the first existing config path, defaults when there's none
    pub fn load() -> Result<Config, Unexpected> {
        CONFIG_PATHS
            .iter()
            .find(|file| Path::new(file).exists())
            .map_or_else(|| Ok(Config::default()), |file| Config::load_from(file))
    }


    /// Load configuration file
    pub fn load_from(config: &str) -> Result<Config, Unexpected> {
        read_text_file(config)
            .map_err(|err| err.to_string())
            .and_then(|file_contents| {
                serde_json::from_str(&file_contents).map_err(|err| err.to_string())
            })
            .map_err(|err| Unexpected::ConfigInvalid(config.to_string(), err))
    }


    /// Get LevelFilter (log level) from configuration
    pub fn get_log_level(&self) -> LevelFilter {
        let level = self
            .log_level
            .clone()
            .unwrap_or_else(|| String::from(DEFAULT_LOG_LEVEL))
            .to_uppercase();
        match &level[..] {
            "OFF" => LevelFilter::OFF,
            "ERROR" => LevelFilter::ERROR,
            "WARN" => LevelFilter::WARN,
            "INFO" => LevelFilter::INFO,
            "DEBUG" => LevelFilter::DEBUG,
            "TRACE" => LevelFilter::TRACE,
            _ => LevelFilter::WARN,
        }
    }


    /// Sites file path
    pub fn sites_file(&self) -> String {
        self.sites_file
            .clone()
            .unwrap_or_else(|| String::from(DEFAULT_SITES_FILE))
    }


    /// TLS connect and handshake timeout
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connection_timeout
                .filter(|seconds| *seconds > 0)
                .unwrap_or(CHECK_CONNECTION_TIMEOUT),
        )
    }


    /// Reminder window in days
    pub fn reminder_window_days(&self) -> i64 {
        self.reminder_window_days
            .filter(|days| *days >= 0)
            .unwrap_or(REMINDER_WINDOW_DAYS)
    }


    /// Mail relay settings
    pub fn smtp(&self) -> SmtpConfig {
        self.smtp.clone().unwrap_or_default()
    }
}
