use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use cs_core::persistence::keys;
use cs_core::ports::{ClipboardItemRepositoryPort, KeyValueStorePort};
use cs_core::ClipboardItem;

use super::item_record::ItemRecord;

/// Item list stored under `clipboardItems`.
pub struct KvClipboardItemRepository {
    store: Arc<dyn KeyValueStorePort>,
}

impl KvClipboardItemRepository {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self { store }
    }

    async fn load_raw(&self) -> Result<Vec<Value>> {
        let mut data = self.store.get(&[keys::CLIPBOARD_ITEMS]).await?;
        match data.remove(keys::CLIPBOARD_ITEMS) {
            Some(Value::Array(raw)) => Ok(raw),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(_) => anyhow::bail!("{} is not a list", keys::CLIPBOARD_ITEMS),
        }
    }
}

#[async_trait]
impl ClipboardItemRepositoryPort for KvClipboardItemRepository {
    async fn load_items(&self) -> Result<Vec<ClipboardItem>> {
        let mut items = Vec::new();
        for (index, value) in self.load_raw().await?.into_iter().enumerate() {
            match serde_json::from_value::<ItemRecord>(value) {
                Ok(record) => items.push(ClipboardItem::from(record)),
                Err(err) => warn!(index, error = %err, "skipping malformed stored item"),
            }
        }
        Ok(items)
    }

    async fn save_items(&self, items: &[ClipboardItem]) -> Result<()> {
        // Entries this version cannot read are written back untouched after the known items.
        let unreadable: Vec<Value> = self
            .load_raw()
            .await?
            .into_iter()
            .filter(|value| serde_json::from_value::<ItemRecord>(value.clone()).is_err())
            .collect();
        if !unreadable.is_empty() {
            debug!(count = unreadable.len(), "keeping unreadable stored items");
        }

        let mut list = Vec::with_capacity(items.len() + unreadable.len());
        for item in items {
            let record = serde_json::to_value(ItemRecord::from(item))
                .context("serialize clipboard item failed")?;
            list.push(record);
        }
        list.extend(unreadable);

        let mut entries = Map::new();
        entries.insert(keys::CLIPBOARD_ITEMS.to_string(), Value::Array(list));
        self.store.set(entries).await
    }
}
