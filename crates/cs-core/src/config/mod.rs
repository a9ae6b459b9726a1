//! Application configuration DTO.
//!
//! Loaded from TOML by the binary. Every section is optional; missing keys
//! take the defaults below.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub monitor: MonitorConfig,
    pub limits: TierLimits,
    pub maintenance: MaintenanceConfig,
    pub storage: StorageConfig,
    pub translator: TranslatorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub poll_interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
        }
    }
}

/// Limits applied to free (non-premium) accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierLimits {
    /// Items kept in the store.
    pub free_item_limit: usize,
    /// Items shown by a query.
    pub free_display_limit: usize,
    /// Remote translation requests per quota period.
    pub free_translation_limit: u32,
    /// Longest text, in characters, offered for translation.
    pub max_translatable_chars: usize,
}

impl Default for TierLimits {
    fn default() -> Self {
        Self {
            free_item_limit: 20,
            free_display_limit: 20,
            free_translation_limit: 50,
            max_translatable_chars: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenanceConfig {
    pub cleanup_interval_secs: u64,
    pub quota_reset_interval_secs: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            cleanup_interval_secs: 60 * 60 * 24,
            quota_reset_interval_secs: 60 * 60 * 24 * 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the key-value blob file. `None` means the platform data dir.
    pub data_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub endpoint: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-free.deepl.com/v2/translate".to_string(),
            api_key_env: "CLIPSMART_TRANSLATOR_KEY".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for daily rolling log files. When unset, `watch` logs to the
    /// platform data dir and one-shot commands log to stderr only.
    pub dir: Option<PathBuf>,
}
