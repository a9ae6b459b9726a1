use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::info;

use cs_core::persistence::keys;
use cs_core::ports::{KeyValueStorePort, LicensePort};

/// Premium flag stored under `isPro`. Absent means free.
pub struct KvLicenseFlag {
    store: Arc<dyn KeyValueStorePort>,
}

impl KvLicenseFlag {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    pub async fn set_premium(&self, premium: bool) -> Result<()> {
        let mut entries = Map::new();
        entries.insert(keys::IS_PRO.to_string(), json!(premium));
        self.store.set(entries).await?;
        info!(premium, "premium flag updated");
        Ok(())
    }
}

#[async_trait]
impl LicensePort for KvLicenseFlag {
    async fn is_premium(&self) -> Result<bool> {
        let data = self.store.get(&[keys::IS_PRO]).await?;
        Ok(data.get(keys::IS_PRO).and_then(Value::as_bool).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;

    #[tokio::test]
    async fn defaults_to_free_and_can_be_toggled() -> Result<()> {
        let flag = KvLicenseFlag::new(Arc::new(InMemoryKeyValueStore::new()));
        assert!(!flag.is_premium().await?);

        flag.set_premium(true).await?;
        assert!(flag.is_premium().await?);

        flag.set_premium(false).await?;
        assert!(!flag.is_premium().await?);
        Ok(())
    }
}
