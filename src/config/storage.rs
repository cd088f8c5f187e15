//! Configuration Storage Implementation
//!
//! Provides JSON file-based configuration storage with:
//! - Atomic writes using temp file + rename
//! - Thread-safe access via RwLock
//! - Default configuration generation

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::logging::LoggingConfig;
use crate::transparency::{BackendKind, DEFAULT_SETTLE_DELAY};

/// Longest accepted settle delay
pub const MAX_SETTLE_DELAY_MS: u64 = 10_000;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration store settings
#[derive(Debug, Clone)]
pub struct ConfigStoreConfig {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Whether to create default config if not exists
    pub create_default: bool,
}

impl Default for ConfigStoreConfig {
    fn default() -> Self {
        let app_data = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("window-transparency");

        Self {
            config_path: app_data.join("config.json"),
            create_default: true,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Transparency behaviour
    #[serde(default)]
    pub transparency: TransparencyConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Last modified timestamp
    #[serde(default = "default_timestamp")]
    pub last_modified: String,
}

fn default_version() -> u32 {
    1
}

fn default_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Transparency behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparencyConfig {
    /// Delay before a new window receives its baseline opacity
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Apply baseline opacity to newly created windows
    #[serde(default = "default_true")]
    pub auto_baseline: bool,

    /// Pin the read-back backend instead of probing the OS version
    #[serde(default)]
    pub backend_override: Option<BackendKind>,
}

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY.as_millis() as u64
}

fn default_true() -> bool {
    true
}

impl Default for TransparencyConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay_ms(),
            auto_baseline: true,
            backend_override: None,
        }
    }
}

impl TransparencyConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.settle_delay_ms > MAX_SETTLE_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "settle_delay_ms must be at most {}, got {}",
                MAX_SETTLE_DELAY_MS, self.settle_delay_ms
            )));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            transparency: TransparencyConfig::default(),
            logging: LoggingConfig::default(),
            last_modified: default_timestamp(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        self.transparency.validate()
    }
}

/// Configuration store
pub struct ConfigStore {
    config: Arc<RwLock<AppConfig>>,
    settings: ConfigStoreConfig,
}

impl ConfigStore {
    /// Create a new configuration store
    pub async fn new(settings: ConfigStoreConfig) -> ConfigResult<Self> {
        if let Some(parent) = settings.config_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let config = if settings.config_path.exists() {
            Self::load_from_file(&settings.config_path).await?
        } else if settings.create_default {
            let default_config = AppConfig::default();
            Self::save_to_file(&settings.config_path, &default_config).await?;
            default_config
        } else {
            return Err(ConfigError::NotFound(settings.config_path.clone()));
        };

        config.validate()?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            settings,
        })
    }

    /// Load configuration from file
    async fn load_from_file(path: &Path) -> ConfigResult<AppConfig> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file with atomic write
    async fn save_to_file(path: &Path, config: &AppConfig) -> ConfigResult<()> {
        let content = serde_json::to_string_pretty(config)?;

        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &content).await?;
        tokio::fs::rename(&temp_path, path).await?;

        Ok(())
    }

    /// Get current configuration (read-only)
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Update configuration
    ///
    /// The update is rejected, and nothing is written, if the result does
    /// not validate.
    pub async fn update<F>(&self, updater: F) -> ConfigResult<AppConfig>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().await;

        let mut updated = config.clone();
        updater(&mut updated);
        updated.validate()?;
        updated.last_modified = chrono::Utc::now().to_rfc3339();

        Self::save_to_file(&self.settings.config_path, &updated).await?;
        *config = updated;

        Ok(config.clone())
    }

    /// Reset to default configuration
    pub async fn reset(&self) -> ConfigResult<AppConfig> {
        let default_config = AppConfig::default();
        let mut config = self.config.write().await;
        Self::save_to_file(&self.settings.config_path, &default_config).await?;
        *config = default_config;
        Ok(config.clone())
    }

    /// Get configuration file path
    pub fn config_path(&self) -> &Path {
        &self.settings.config_path
    }
}
