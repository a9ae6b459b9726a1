use std::sync::Arc;

use chrono::DateTime;
use tracing::{info, info_span, Instrument};

use cs_core::export::export_items;
use cs_core::ports::{ClockPort, LicensePort};
use cs_core::{ExportFormat, ItemId};

use super::internal::ItemStoreGateway;

#[derive(Debug, thiserror::Error)]
pub enum ExportItemsError {
    #[error("export is a premium feature")]
    UpgradeRequired,

    #[error("clipboard item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedItems {
    /// Suggested file name, e.g. `clipsmart-export-2024-05-01.csv`.
    pub file_name: String,
    pub content: String,
    pub count: usize,
}

/// Serialize the whole history, or one item, for download. Premium only.
/// 导出全部条目或单个条目（仅限高级版）。
pub struct ExportClipboardItems {
    gateway: Arc<ItemStoreGateway>,
    license: Arc<dyn LicensePort>,
    clock: Arc<dyn ClockPort>,
}

impl ExportClipboardItems {
    pub fn new(
        gateway: Arc<ItemStoreGateway>,
        license: Arc<dyn LicensePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            gateway,
            license,
            clock,
        }
    }

    pub async fn execute(
        &self,
        format: ExportFormat,
        item_id: Option<&ItemId>,
    ) -> Result<ExportedItems, ExportItemsError> {
        let span = info_span!("usecase.export_clipboard_items.execute", format = ?format);

        async move {
            if !self.license.is_premium().await? {
                return Err(ExportItemsError::UpgradeRequired);
            }

            let mut items = self.gateway.snapshot().await?;
            if let Some(id) = item_id {
                items.retain(|item| &item.id == id);
                if items.is_empty() {
                    return Err(ExportItemsError::ItemNotFound(id.clone()));
                }
            }

            let content = export_items(&items, format)?;
            let file_name = self.file_name(format);

            info!(count = items.len(), file_name = %file_name, "items exported");
            Ok(ExportedItems {
                file_name,
                content,
                count: items.len(),
            })
        }
        .instrument(span)
        .await
    }

    fn file_name(&self, format: ExportFormat) -> String {
        let date = DateTime::from_timestamp_millis(self.clock.now_ms())
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown-date".to_string());
        format!("clipsmart-export-{date}.{}", format.file_extension())
    }
}
