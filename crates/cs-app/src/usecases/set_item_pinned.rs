use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use cs_core::ItemId;

use super::internal::ItemStoreGateway;

/// Pin or unpin an item.
/// 置顶或取消置顶条目。
///
/// Pinning never re-applies the item cap, so items dropped earlier stay gone.
pub struct SetItemPinned {
    gateway: Arc<ItemStoreGateway>,
}

impl SetItemPinned {
    pub fn new(gateway: Arc<ItemStoreGateway>) -> Self {
        Self { gateway }
    }

    /// Returns `false` when no item has this id.
    #[tracing::instrument(
        name = "usecase.set_item_pinned.execute",
        skip(self),
        fields(item_id = %item_id)
    )]
    pub async fn execute(&self, item_id: &ItemId, pinned: bool) -> Result<bool> {
        let found = self
            .gateway
            .mutate(|store| store.set_pinned(item_id, pinned))
            .await?;
        if found {
            info!(item_id = %item_id, pinned, "pin state updated");
        }
        Ok(found)
    }
}
