use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Greeting shown as the first assistant turn of every conversation.
pub const DEFAULT_GREETING: &str = "Hi there! I'm your health assistant. I can help you analyze your symptoms and log them. How are you feeling today?";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct HealthmateConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ChatConfig {
    /// URL the conversation history is POSTed to.
    pub endpoint: String,
    /// Request timeout. `None` waits for the endpoint indefinitely.
    pub timeout_secs: Option<u64>,
    pub greeting: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_healthmate_dir()
            .join("health.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/chat".into(),
            timeout_secs: None,
            greeting: DEFAULT_GREETING.into(),
        }
    }
}

impl ChatConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Returns `~/.healthmate/`, falling back to the working directory when no
/// home directory can be resolved.
pub fn default_healthmate_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".healthmate")
}

/// Returns the default config file path: `~/.healthmate/config.toml`
pub fn default_config_path() -> PathBuf {
    default_healthmate_dir().join("config.toml")
}

impl HealthmateConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            HealthmateConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (HEALTHMATE_DB, HEALTHMATE_ENDPOINT, HEALTHMATE_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HEALTHMATE_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("HEALTHMATE_ENDPOINT") {
            self.chat.endpoint = val;
        }
        if let Ok(val) = std::env::var("HEALTHMATE_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HealthmateConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.chat.endpoint, "http://localhost:3000/api/chat");
        assert!(config.chat.timeout().is_none());
        assert_eq!(config.chat.greeting, DEFAULT_GREETING);
        assert!(config.storage.db_path.ends_with("health.db"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[logging]
level = "debug"

[storage]
db_path = "/tmp/test.db"

[chat]
endpoint = "https://health.example.com/api/chat"
timeout_secs = 30
"#;
        let config: HealthmateConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.storage.db_path, "/tmp/test.db");
        assert_eq!(config.chat.endpoint, "https://health.example.com/api/chat");
        assert_eq!(config.chat.timeout(), Some(Duration::from_secs(30)));
        // defaults still apply for unset fields
        assert_eq!(config.chat.greeting, DEFAULT_GREETING);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = HealthmateConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.chat.greeting, DEFAULT_GREETING);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = HealthmateConfig::default();
        std::env::set_var("HEALTHMATE_DB", "/tmp/override.db");
        std::env::set_var("HEALTHMATE_ENDPOINT", "http://127.0.0.1:9/chat");
        std::env::set_var("HEALTHMATE_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.chat.endpoint, "http://127.0.0.1:9/chat");
        assert_eq!(config.logging.level, "trace");

        // Clean up
        std::env::remove_var("HEALTHMATE_DB");
        std::env::remove_var("HEALTHMATE_ENDPOINT");
        std::env::remove_var("HEALTHMATE_LOG_LEVEL");
    }

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/lib/h.db"), PathBuf::from("/var/lib/h.db"));
    }
}
