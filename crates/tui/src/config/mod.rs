use std::time::Duration;

use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/cuzdan.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub timezone: String,
    pub log_file: String,
    pub log_level: String,
    pub request_timeout_secs: Option<u64>,
    /// How many days ahead the dashboard looks for due bills.
    pub reminder_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api/".to_string(),
            timezone: "Europe/Istanbul".to_string(),
            log_file: "cuzdan.log".to_string(),
            log_level: "info".to_string(),
            request_timeout_secs: None,
            reminder_days: 7,
        }
    }
}

impl AppConfig {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Timezone(format!("{}: {err}", self.timezone)))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn apply(&mut self, args: Args) {
        if let Some(base_url) = args.base_url {
            self.base_url = base_url;
        }
        if let Some(timezone) = args.timezone {
            self.timezone = timezone;
        }
        if let Some(log_file) = args.log_file {
            self.log_file = log_file;
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "cuzdan", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override API root (e.g. http://127.0.0.1:5000/api/).
    #[arg(long)]
    base_url: Option<String>,
    /// Override display timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    #[arg(long)]
    log_file: Option<String>,
    /// trace, debug, info, warn or error.
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("CUZDAN"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    settings.apply(args);
    settings.timezone()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_api() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:5000/api/");
        assert_eq!(config.timezone().unwrap(), engine::format::DEFAULT_TIMEZONE);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.reminder_days, 7);
    }

    #[test]
    fn cli_overrides_file_values() {
        let mut config = AppConfig::default();
        config.apply(Args::parse_from([
            "cuzdan",
            "--base-url",
            "http://10.0.0.2:8080/api",
            "--log-level",
            "debug",
        ]));
        assert_eq!(config.base_url, "http://10.0.0.2:8080/api");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.timezone, "Europe/Istanbul");
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let config = AppConfig {
            timezone: "Mars/Olympus".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.timezone(), Err(AppError::Timezone(_))));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "base_url = \"http://api.local/\"\nrequest_timeout_secs = 5",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.base_url, "http://api.local/");
        assert_eq!(settings.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.log_file, "cuzdan.log");
    }
}
