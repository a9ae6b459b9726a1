use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, info_span, Instrument};

use cs_core::ports::{ClockPort, SettingsPort};
use cs_core::ItemId;

use super::internal::ItemStoreGateway;

/// Delete unpinned items older than the configured auto-delete window.
/// 按自动删除设置清理过期的未置顶条目。
pub struct ApplyRetentionPolicy {
    gateway: Arc<ItemStoreGateway>,
    settings: Arc<dyn SettingsPort>,
    clock: Arc<dyn ClockPort>,
}

impl ApplyRetentionPolicy {
    pub fn new(
        gateway: Arc<ItemStoreGateway>,
        settings: Arc<dyn SettingsPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            gateway,
            settings,
            clock,
        }
    }

    /// Returns the ids of the removed items.
    pub async fn execute(&self) -> Result<Vec<ItemId>> {
        let span = info_span!("usecase.apply_retention_policy.execute");
        async move {
            let window = self.settings.load().await?.auto_delete;
            if window.max_age_ms().is_none() {
                debug!("auto-delete disabled");
                return Ok(Vec::new());
            }

            let now_ms = self.clock.now_ms();
            let removed = self
                .gateway
                .mutate(|store| window.apply(store, now_ms))
                .await?;

            info!(window = ?window, removed = removed.len(), "retention applied");
            Ok(removed)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::internal::item_store_gateway::test_support::*;
    use cs_core::{ClipboardItem, RetentionWindow, Settings};
    use std::sync::Mutex as StdMutex;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn settings_with(window: RetentionWindow) -> Arc<MemorySettings> {
        Arc::new(MemorySettings {
            settings: StdMutex::new(Settings {
                auto_delete: window,
                ..Settings::default()
            }),
        })
    }

    #[tokio::test]
    async fn removes_old_unpinned_items_only() -> Result<()> {
        let now = 10 * DAY_MS;
        let old = ClipboardItem::new("old", now - 2 * DAY_MS);
        let mut old_pinned = ClipboardItem::new("old pinned", now - 2 * DAY_MS);
        old_pinned.pinned = true;
        let fresh = ClipboardItem::new("fresh", now - 1000);
        let old_id = old.id.clone();

        let repo = Arc::new(MemoryItemRepo::with_items(vec![fresh, old, old_pinned]));
        let uc = ApplyRetentionPolicy::new(
            Arc::new(ItemStoreGateway::new(repo.clone(), Arc::new(RecordingEvents::default()))),
            settings_with(RetentionWindow::OneDay),
            Arc::new(FixedClock(now)),
        );

        let removed = uc.execute().await?;

        assert_eq!(removed, vec![old_id]);
        let texts: Vec<_> = repo.items().into_iter().map(|item| item.text).collect();
        assert_eq!(texts, vec!["fresh", "old pinned"]);
        Ok(())
    }

    #[tokio::test]
    async fn never_window_is_a_no_op() -> Result<()> {
        let repo = Arc::new(MemoryItemRepo::with_items(vec![ClipboardItem::new("ancient", 0)]));
        let uc = ApplyRetentionPolicy::new(
            Arc::new(ItemStoreGateway::new(repo.clone(), Arc::new(RecordingEvents::default()))),
            settings_with(RetentionWindow::Never),
            Arc::new(FixedClock(365 * DAY_MS)),
        );

        assert!(uc.execute().await?.is_empty());
        assert_eq!(repo.items().len(), 1);
        Ok(())
    }
}
