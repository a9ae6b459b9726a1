use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Map, Value};

use cs_core::persistence::keys;
use cs_core::ports::{KeyValueStorePort, TranslationUsagePort};
use cs_core::TranslationQuota;

/// Quota counter under `translationsUsed`, period start under `translationsResetAt`.
pub struct KvTranslationUsageRepository {
    store: Arc<dyn KeyValueStorePort>,
}

impl KvTranslationUsageRepository {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TranslationUsagePort for KvTranslationUsageRepository {
    async fn load_quota(&self) -> Result<TranslationQuota> {
        let data = self
            .store
            .get(&[keys::TRANSLATIONS_USED, keys::TRANSLATIONS_RESET_AT])
            .await?;

        let used = data
            .get(keys::TRANSLATIONS_USED)
            .and_then(Value::as_u64)
            .map(|used| u32::try_from(used).unwrap_or(u32::MAX))
            .unwrap_or(0);
        let period_started_ms = data
            .get(keys::TRANSLATIONS_RESET_AT)
            .and_then(Value::as_i64)
            .unwrap_or(0);

        Ok(TranslationQuota::new(used, period_started_ms))
    }

    async fn save_quota(&self, quota: &TranslationQuota) -> Result<()> {
        let mut entries = Map::new();
        entries.insert(keys::TRANSLATIONS_USED.to_string(), json!(quota.used));
        entries.insert(
            keys::TRANSLATIONS_RESET_AT.to_string(),
            json!(quota.period_started_ms),
        );
        self.store.set(entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;

    #[tokio::test]
    async fn missing_usage_starts_at_zero() -> Result<()> {
        let repo = KvTranslationUsageRepository::new(Arc::new(InMemoryKeyValueStore::new()));

        assert_eq!(repo.load_quota().await?, TranslationQuota::new(0, 0));
        Ok(())
    }

    #[tokio::test]
    async fn saved_quota_is_loaded_back() -> Result<()> {
        let repo = KvTranslationUsageRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        let quota = TranslationQuota::new(12, 1_700_000_000_000);

        repo.save_quota(&quota).await?;

        assert_eq!(repo.load_quota().await?, quota);
        Ok(())
    }
}
