use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info_span, Instrument};

use cs_core::ports::LicensePort;
use cs_core::{ItemLimit, ItemQuery, QueryPage};

use super::internal::ItemStoreGateway;

/// Filter, sort and page the stored items for display.
/// 过滤、排序并分页展示条目。
///
/// Read-only: the stored order is never changed by a query. Free accounts see
/// at most `free_display_limit` items on the recent tab; `QueryPage::hidden`
/// reports how many matches were withheld.
pub struct ListClipboardItems {
    gateway: Arc<ItemStoreGateway>,
    license: Arc<dyn LicensePort>,
    free_display_limit: usize,
}

impl ListClipboardItems {
    pub fn new(
        gateway: Arc<ItemStoreGateway>,
        license: Arc<dyn LicensePort>,
        free_display_limit: usize,
    ) -> Self {
        Self {
            gateway,
            license,
            free_display_limit,
        }
    }

    pub async fn execute(&self, query: &ItemQuery) -> Result<QueryPage> {
        let span = info_span!(
            "usecase.list_clipboard_items.execute",
            sort = ?query.sort,
            tab = ?query.tab
        );

        async move {
            let is_premium = self.license.is_premium().await?;
            let items = self.gateway.snapshot().await?;
            let page = query.run(&items, ItemLimit::for_tier(is_premium, self.free_display_limit));

            debug!(
                total = items.len(),
                matches = page.total_matches,
                hidden = page.hidden,
                "query evaluated"
            );
            Ok(page)
        }
        .instrument(span)
        .await
    }
}
