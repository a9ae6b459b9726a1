use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use cs_core::ports::KeyValueStorePort;

/// Process-local store. Nothing is written to disk.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    data: RwLock<Map<String, Value>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorePort for InMemoryKeyValueStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let data = self.data.read().await;
        Ok(keys
            .iter()
            .filter_map(|key| data.get(*key).map(|value| (key.to_string(), value.clone())))
            .collect())
    }

    async fn set(&self, entries: Map<String, Value>) -> Result<()> {
        self.data.write().await.extend(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn last_set_wins() -> Result<()> {
        let store = InMemoryKeyValueStore::new();
        let mut first = Map::new();
        first.insert("isPro".into(), json!(false));
        let mut second = Map::new();
        second.insert("isPro".into(), json!(true));

        store.set(first).await?;
        store.set(second).await?;

        assert_eq!(store.get(&["isPro"]).await?["isPro"], json!(true));
        Ok(())
    }
}
