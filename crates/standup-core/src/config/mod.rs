mod channels;
mod defaults;


pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::StandupError;
use defaults::*;

/// Environment variable that overrides `channel.telegram.bot_token`.
pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";

/// Top-level Standup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub standup: StandupConfig,
    #[serde(default = "default_channels")]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            standup: StandupConfig::default(),
            channel: default_channels(),
            report: ReportConfig::default(),
        }
    }
}

fn default_channels() -> ChannelConfig {
    ChannelConfig {
        telegram: Some(TelegramConfig::default()),
    }
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandupConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional log file. Empty = stderr only.
    #[serde(default)]
    pub log_file: String,
}

impl Default for StandupConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            log_file: String::new(),
        }
    }
}

/// Announcement rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Base URL that task codes are appended to.
    #[serde(default = "default_tracker_url")]
    pub tracker_url: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tracker_url: default_tracker_url(),
        }
    }
}

impl ReportConfig {
    /// Build the formatter for this config.
    pub fn formatter(&self) -> crate::report::ReportFormatter {
        crate::report::ReportFormatter::new(&self.tracker_url)
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Override the Telegram token with `token` when it is non-empty.
///
/// Creates and enables the Telegram section if the file had none.
pub fn apply_bot_token(config: &mut Config, token: Option<String>) {
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return;
    };
    let telegram = config
        .channel
        .telegram
        .get_or_insert_with(TelegramConfig::default);
    telegram.bot_token = token.trim().to_string();
    telegram.enabled = true;
}

/// Parse configuration from TOML text.
pub fn from_toml(content: &str) -> Result<Config, StandupError> {
    let mut config: Config = toml::from_str(content)
        .map_err(|e| StandupError::Config(format!("failed to parse config: {}", e)))?;
    config.report.tracker_url = config.report.tracker_url.trim_end_matches('/').to_string();
    Ok(config)
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from the given file.
    File,
    /// The file did not exist; built-in defaults were used.
    Defaults,
}

/// Load configuration from a TOML file without environment overrides.
///
/// Falls back to defaults if the file does not exist. Does not log; callers
/// report the returned [`ConfigSource`] once logging is installed.
pub fn load_file(path: &str) -> Result<(Config, ConfigSource), StandupError> {
    let path = Path::new(path);
    if !path.exists() {
        return Ok((Config::default(), ConfigSource::Defaults));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| StandupError::Config(format!("failed to read {}: {}", path.display(), e)))?;
    Ok((from_toml(&content)?, ConfigSource::File))
}

/// Load configuration from a TOML file, then apply `BOT_TOKEN` from the
/// environment.
pub fn load(path: &str) -> Result<(Config, ConfigSource), StandupError> {
    let (mut config, source) = load_file(path)?;
    apply_bot_token(&mut config, std::env::var(BOT_TOKEN_ENV).ok());
    Ok((config, source))
}
