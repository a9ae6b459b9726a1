use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Map;

use cs_core::persistence::keys;
use cs_core::ports::{KeyValueStorePort, SettingsPort};
use cs_core::Settings;

/// Settings stored under `settings`. A store without settings yields defaults.
pub struct KvSettingsRepository {
    store: Arc<dyn KeyValueStorePort>,
}

impl KvSettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SettingsPort for KvSettingsRepository {
    async fn load(&self) -> Result<Settings> {
        let mut data = self.store.get(&[keys::SETTINGS]).await?;
        match data.remove(keys::SETTINGS) {
            Some(value) if !value.is_null() => {
                serde_json::from_value(value).context("parse settings failed")
            }
            _ => Ok(Settings::default()),
        }
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        let value = serde_json::to_value(settings).context("serialize settings failed")?;
        let mut entries = Map::new();
        entries.insert(keys::SETTINGS.to_string(), value);
        self.store.set(entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;
    use cs_core::RetentionWindow;
    use serde_json::json;

    #[tokio::test]
    async fn missing_settings_are_defaults() -> Result<()> {
        let repo = KvSettingsRepository::new(Arc::new(InMemoryKeyValueStore::new()));

        assert_eq!(repo.load().await?, Settings::default());
        Ok(())
    }

    #[tokio::test]
    async fn reads_extension_shaped_document() -> Result<()> {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut entries = Map::new();
        entries.insert(
            keys::SETTINGS.into(),
            json!({"theme": "dark", "autoDelete": "30", "translationLangs": ["it"]}),
        );
        store.set(entries).await?;

        let settings = KvSettingsRepository::new(store).load().await?;

        assert_eq!(settings.auto_delete, RetentionWindow::ThirtyDays);
        assert_eq!(settings.translation_langs, vec!["it".to_string()]);
        assert_eq!(settings.language, "en");
        Ok(())
    }
}
