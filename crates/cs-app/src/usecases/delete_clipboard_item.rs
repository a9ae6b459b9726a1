use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use cs_core::ItemId;

use super::internal::ItemStoreGateway;

/// Delete one item. Deleting an unknown id is not an error.
/// 删除单个条目；条目不存在时不报错。
pub struct DeleteClipboardItem {
    gateway: Arc<ItemStoreGateway>,
}

impl DeleteClipboardItem {
    pub fn new(gateway: Arc<ItemStoreGateway>) -> Self {
        Self { gateway }
    }

    /// Returns whether an item was removed.
    #[tracing::instrument(
        name = "usecase.delete_clipboard_item.execute",
        skip(self),
        fields(item_id = %item_id)
    )]
    pub async fn execute(&self, item_id: &ItemId) -> Result<bool> {
        let removed = self.gateway.mutate(|store| store.delete(item_id)).await?;
        if removed {
            info!(item_id = %item_id, "clipboard item deleted");
        }
        Ok(removed)
    }
}
