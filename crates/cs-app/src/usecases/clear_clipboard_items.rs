use std::sync::Arc;

use anyhow::Result;
use tracing::{info, info_span, Instrument};

use super::internal::ItemStoreGateway;

/// Remove every item, pinned ones included.
/// 清空全部条目（包括已置顶条目）。
pub struct ClearClipboardItems {
    gateway: Arc<ItemStoreGateway>,
}

impl ClearClipboardItems {
    pub fn new(gateway: Arc<ItemStoreGateway>) -> Self {
        Self { gateway }
    }

    /// Returns how many items were removed.
    pub async fn execute(&self) -> Result<usize> {
        let span = info_span!("usecase.clear_clipboard_items.execute");
        async move {
            let removed = self.gateway.mutate(|store| store.clear()).await?;
            info!(removed, "clipboard history cleared");
            Ok(removed)
        }
        .instrument(span)
        .await
    }
}
