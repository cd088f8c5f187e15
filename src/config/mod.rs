//! Configuration Management Module
//!
//! Provides persistent configuration storage with:
//! - JSON file-based storage
//! - Validation on load and update
//! - Thread-safe access

mod storage;

pub use storage::{
    AppConfig, ConfigError, ConfigResult, ConfigStore, ConfigStoreConfig, TransparencyConfig,
    MAX_SETTLE_DELAY_MS,
};
