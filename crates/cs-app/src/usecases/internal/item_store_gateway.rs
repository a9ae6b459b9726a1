//! Serialized access to the persisted item list.
//! 对持久化条目列表的串行化访问。
//!
//! Every mutation runs `load -> mutate -> save` while holding one lock, so two
//! use cases in the same process never interleave their read-modify-write
//! cycles. Other processes sharing the same store still race (last writer wins).

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::debug;

use cs_core::ports::{ClipboardItemRepositoryPort, StoreEventPort};
use cs_core::{ClipboardItem, ItemStore, StoreEvent};

pub struct ItemStoreGateway {
    repo: Arc<dyn ClipboardItemRepositoryPort>,
    events: Arc<dyn StoreEventPort>,
    lock: Mutex<()>,
}

impl ItemStoreGateway {
    pub fn new(
        repo: Arc<dyn ClipboardItemRepositoryPort>,
        events: Arc<dyn StoreEventPort>,
    ) -> Self {
        Self {
            repo,
            events,
            lock: Mutex::new(()),
        }
    }

    /// Snapshot of the stored items, most recent first.
    pub async fn snapshot(&self) -> Result<Vec<ClipboardItem>> {
        let _guard = self.lock.lock().await;
        self.repo
            .load_items()
            .await
            .context("failed to load clipboard items")
    }

    /// Load the store, apply `mutate`, and persist the result if it changed.
    ///
    /// Emits [`StoreEvent::ItemCountChanged`] when the number of items differs
    /// after the mutation. Nothing is written when the closure leaves the
    /// store untouched.
    pub async fn mutate<T, F>(&self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut ItemStore) -> T + Send,
        T: Send,
    {
        let _guard = self.lock.lock().await;

        let before = self
            .repo
            .load_items()
            .await
            .context("failed to load clipboard items")?;
        let mut store = ItemStore::from_items(before.clone());

        let output = mutate(&mut store);

        if store.items() == before.as_slice() {
            return Ok(output);
        }

        self.repo
            .save_items(store.items())
            .await
            .context("failed to save clipboard items")?;

        if store.len() != before.len() {
            debug!(before = before.len(), after = store.len(), "item count changed");
            self.events
                .emit(StoreEvent::ItemCountChanged { count: store.len() });
        }

        Ok(output)
    }
}
