use serde::{Deserialize, Serialize};

use crate::clipboard::RetentionWindow;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Auto,
    Light,
    Dark,
}

/// User settings, persisted under the `settings` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_theme")]
    pub theme: Theme,

    #[serde(default = "default_language")]
    pub language: String,

    /// Retention window for unpinned items.
    #[serde(default)]
    pub auto_delete: RetentionWindow,

    /// Target languages used when a translation request names none.
    #[serde(default = "default_translation_langs")]
    pub translation_langs: Vec<String>,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

fn default_theme() -> Theme {
    Theme::Auto
}

fn default_language() -> String {
    "en".to_string()
}

pub(crate) fn default_translation_langs() -> Vec<String> {
    vec!["de".to_string(), "es".to_string(), "fr".to_string()]
}
