use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, info_span, Instrument};

use cs_core::ports::{ClockPort, LicensePort};
use cs_core::{ItemLimit, UpsertOutcome};

use super::internal::ItemStoreGateway;

/// Store a piece of clipboard text, promoting an existing item with the same text.
/// 保存一段剪贴板文本；若已存在相同文本的条目则将其提升到最前。
///
/// ## Behavior / 行为
/// - Blank text is ignored (`Ok(None)`).
///   空白文本被忽略。
/// - Free accounts are capped at `free_item_limit`; pinned items always survive.
///   免费账户受条目上限约束；已置顶条目始终保留。
pub struct CaptureClipboardText {
    gateway: Arc<ItemStoreGateway>,
    license: Arc<dyn LicensePort>,
    clock: Arc<dyn ClockPort>,
    free_item_limit: usize,
}

impl CaptureClipboardText {
    pub fn new(
        gateway: Arc<ItemStoreGateway>,
        license: Arc<dyn LicensePort>,
        clock: Arc<dyn ClockPort>,
        free_item_limit: usize,
    ) -> Self {
        Self {
            gateway,
            license,
            clock,
            free_item_limit,
        }
    }

    pub async fn execute(&self, text: &str) -> Result<Option<UpsertOutcome>> {
        let span = info_span!(
            "usecase.capture_clipboard_text.execute",
            chars = text.chars().count()
        );

        async move {
            if text.trim().is_empty() {
                debug!("ignoring blank clipboard text");
                return Ok(None);
            }

            let is_premium = self.license.is_premium().await?;
            let limit = ItemLimit::for_tier(is_premium, self.free_item_limit);
            let now_ms = self.clock.now_ms();

            let outcome = self
                .gateway
                .mutate(|store| store.upsert(text, now_ms, limit))
                .await?;

            if let Some(outcome) = &outcome {
                info!(
                    item_id = %outcome.item.id,
                    item_type = %outcome.item.item_type,
                    promoted = outcome.promoted,
                    dropped = outcome.dropped.len(),
                    "clipboard text stored"
                );
            }

            Ok(outcome)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::internal::item_store_gateway::test_support::*;
    use cs_core::{ClipboardItem, ItemType, StoreEvent};

    fn build(
        repo: Arc<MemoryItemRepo>,
        events: Arc<RecordingEvents>,
        premium: bool,
        now_ms: i64,
    ) -> CaptureClipboardText {
        CaptureClipboardText::new(
            Arc::new(ItemStoreGateway::new(repo, events)),
            Arc::new(StaticLicense(premium)),
            Arc::new(FixedClock(now_ms)),
            3,
        )
    }

    #[tokio::test]
    async fn stores_new_text_at_the_front() -> Result<()> {
        let repo = Arc::new(MemoryItemRepo::with_items(vec![ClipboardItem::new("old", 1)]));
        let events = Arc::new(RecordingEvents::default());
        let uc = build(repo.clone(), events.clone(), false, 10);

        let outcome = uc.execute("https://example.com").await?.expect("stored");

        assert!(!outcome.promoted);
        assert_eq!(outcome.item.item_type, ItemType::Url);
        let items = repo.items();
        assert_eq!(items[0].text, "https://example.com");
        assert_eq!(items[1].text, "old");
        assert_eq!(
            events.recorded(),
            vec![StoreEvent::ItemCountChanged { count: 2 }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn blank_text_is_not_persisted() -> Result<()> {
        let repo = Arc::new(MemoryItemRepo::default());
        let uc = build(repo.clone(), Arc::new(RecordingEvents::default()), false, 10);

        assert!(uc.execute("   \n").await?.is_none());
        assert_eq!(repo.save_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn free_accounts_are_capped_but_keep_pinned_items() -> Result<()> {
        let mut pinned = ClipboardItem::new("pinned", 1);
        pinned.pinned = true;
        let repo = Arc::new(MemoryItemRepo::with_items(vec![
            ClipboardItem::new("c", 4),
            ClipboardItem::new("b", 3),
            pinned,
        ]));
        let uc = build(repo.clone(), Arc::new(RecordingEvents::default()), false, 10);

        let outcome = uc.execute("d").await?.expect("stored");

        let texts: Vec<_> = repo.items().into_iter().map(|item| item.text).collect();
        assert_eq!(texts, vec!["d", "c", "pinned"]);
        assert_eq!(outcome.dropped.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn premium_accounts_are_not_capped() -> Result<()> {
        let repo = Arc::new(MemoryItemRepo::default());
        let uc = build(repo.clone(), Arc::new(RecordingEvents::default()), true, 10);

        for text in ["a", "b", "c", "d", "e"] {
            uc.execute(text).await?;
        }

        assert_eq!(repo.items().len(), 5);
        Ok(())
    }

    #[tokio::test]
    async fn repeated_text_keeps_id_and_refreshes_timestamp() -> Result<()> {
        let existing = ClipboardItem::new("same", 1);
        let id = existing.id.clone();
        let repo = Arc::new(MemoryItemRepo::with_items(vec![
            ClipboardItem::new("other", 5),
            existing,
        ]));
        let uc = build(repo.clone(), Arc::new(RecordingEvents::default()), false, 99);

        let outcome = uc.execute("same").await?.expect("stored");

        assert!(outcome.promoted);
        let items = repo.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].timestamp_ms, 99);
        Ok(())
    }
}
