//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;
use crate::application::locale::Locale;

/// Telegram API base URL
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub telegram: TelegramConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    #[serde(default)]
    pub locale: Locale,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelegramConfig {
    pub token: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_seconds: u64,
    #[serde(default = "default_retry_delay")]
    pub retry_delay_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_poll_timeout() -> u64 {
    60
}

fn default_retry_delay() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "post-browser-bot".to_string(),
                locale: Locale::default(),
            },
            telegram: TelegramConfig {
                token: None,
                api_url: default_api_url(),
                poll_timeout_seconds: default_poll_timeout(),
                retry_delay_seconds: default_retry_delay(),
            },
            database: DatabaseConfig {
                path: PathBuf::from("bot.db"),
            },
        }
    }
}

impl TelegramConfig {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_seconds)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Config file if present, defaults otherwise; environment wins over both
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let mut config = if path.exists() {
            Config::load(&path)?
        } else {
            tracing::info!("No config file at {}, using defaults", path.display());
            Config::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Override settings from the environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(token) = var("TELEGRAM_BOT_TOKEN").filter(|t| !t.is_empty()) {
            self.telegram.token = Some(token);
        }

        if let Some(url) = var("TELEGRAM_API_URL") {
            self.telegram.api_url = url;
        }

        if let Some(path) = var("DATABASE_PATH") {
            self.database.path = PathBuf::from(path);
        }

        if let Some(locale) = var("BOT_LOCALE") {
            self.bot.locale = locale.parse()?;
        }

        Ok(())
    }

    /// Check the settings the Telegram transport needs
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram.token.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingField(
                "telegram.token (or TELEGRAM_BOT_TOKEN)".to_string(),
            ));
        }

        if self.telegram.poll_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "telegram.poll-timeout-seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bot.locale, Locale::Ru);
        assert_eq!(config.telegram.poll_timeout(), Duration::from_secs(60));
        assert_eq!(config.telegram.retry_delay(), Duration::from_secs(5));
        assert_eq!(config.telegram.api_url, DEFAULT_API_URL);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_yaml_with_partial_telegram_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "bot:\n  name: browser\n  locale: en\ntelegram:\n  token: abc\ndatabase:\n  path: /tmp/x.db"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.bot.locale, Locale::En);
        assert_eq!(config.telegram.token.as_deref(), Some("abc"));
        assert_eq!(config.telegram.poll_timeout_seconds, 60);
        assert_eq!(config.database.path, PathBuf::from("/tmp/x.db"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bot: [").unwrap();
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_vars(vars(&[
                ("TELEGRAM_BOT_TOKEN", "123:abc"),
                ("DATABASE_PATH", "posts.db"),
                ("BOT_LOCALE", "en"),
            ]))
            .unwrap();

        assert_eq!(config.telegram.token.as_deref(), Some("123:abc"));
        assert_eq!(config.database.path, PathBuf::from("posts.db"));
        assert_eq!(config.bot.locale, Locale::En);
    }

    #[test]
    fn test_empty_token_env_is_ignored() {
        let mut config = Config::default();
        config.telegram.token = Some("from-file".to_string());
        config.apply_vars(vars(&[("TELEGRAM_BOT_TOKEN", "")])).unwrap();
        assert_eq!(config.telegram.token.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_bad_locale_env() {
        let mut config = Config::default();
        let result = config.apply_vars(vars(&[("BOT_LOCALE", "fr")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_zero_poll_timeout_rejected() {
        let mut config = Config::default();
        config.telegram.token = Some("t".to_string());
        config.telegram.poll_timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_default_round_trips_through_yaml() {
        let yaml = serde_yaml::to_string(&Config::default()).unwrap();
        assert!(yaml.contains("poll-timeout-seconds: 60"));
        assert!(yaml.contains("locale: ru"));
    }
}
