use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use cs_core::ports::SystemClipboardPort;
use cs_core::{ClipboardItem, ItemId};

use super::internal::ItemStoreGateway;
use crate::session::SharedSession;

#[derive(Debug, thiserror::Error)]
pub enum CopyItemError {
    #[error("clipboard item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("clipboard history is empty")]
    NothingToCopy,

    #[error("failed to write to the system clipboard")]
    Clipboard(#[source] anyhow::Error),

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

/// Write a stored item back to the system clipboard.
/// 将已保存的条目写回系统剪贴板。
///
/// The session's last text is updated before writing, so the monitor does not
/// capture the write as a new clipboard change.
pub struct CopyItemToClipboard {
    gateway: Arc<ItemStoreGateway>,
    clipboard: Arc<dyn SystemClipboardPort>,
    session: SharedSession,
}

impl CopyItemToClipboard {
    pub fn new(
        gateway: Arc<ItemStoreGateway>,
        clipboard: Arc<dyn SystemClipboardPort>,
        session: SharedSession,
    ) -> Self {
        Self {
            gateway,
            clipboard,
            session,
        }
    }

    pub async fn execute(&self, item_id: &ItemId) -> Result<ClipboardItem, CopyItemError> {
        let span = info_span!("usecase.copy_item_to_clipboard.execute", item_id = %item_id);
        async move {
            let item = self
                .gateway
                .snapshot()
                .await?
                .into_iter()
                .find(|item| &item.id == item_id)
                .ok_or_else(|| CopyItemError::ItemNotFound(item_id.clone()))?;

            self.write(item).await
        }
        .instrument(span)
        .await
    }

    /// Copy the most recent item.
    pub async fn execute_latest(&self) -> Result<ClipboardItem, CopyItemError> {
        let span = info_span!("usecase.copy_item_to_clipboard.execute_latest");
        async move {
            let item = self
                .gateway
                .snapshot()
                .await?
                .into_iter()
                .next()
                .ok_or(CopyItemError::NothingToCopy)?;

            self.write(item).await
        }
        .instrument(span)
        .await
    }

    async fn write(&self, item: ClipboardItem) -> Result<ClipboardItem, CopyItemError> {
        self.session.lock().await.last_text = Some(item.text.clone());
        self.clipboard
            .write_text(&item.text)
            .map_err(CopyItemError::Clipboard)?;

        info!(item_id = %item.id, "item copied to clipboard");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::shared_session;
    use crate::usecases::internal::item_store_gateway::test_support::*;
    use cs_core::TranslationQuota;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct FakeClipboard {
        written: StdMutex<Vec<String>>,
    }

    impl SystemClipboardPort for FakeClipboard {
        fn read_text(&self) -> anyhow::Result<Option<String>> {
            Ok(self.written.lock().unwrap().last().cloned())
        }

        fn write_text(&self, text: &str) -> anyhow::Result<()> {
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn build(items: Vec<ClipboardItem>) -> (CopyItemToClipboard, Arc<FakeClipboard>, SharedSession) {
        let clipboard = Arc::new(FakeClipboard::default());
        let session = shared_session(TranslationQuota::default());
        let uc = CopyItemToClipboard::new(
            Arc::new(ItemStoreGateway::new(
                Arc::new(MemoryItemRepo::with_items(items)),
                Arc::new(RecordingEvents::default()),
            )),
            clipboard.clone(),
            session.clone(),
        );
        (uc, clipboard, session)
    }

    #[tokio::test]
    async fn copies_item_and_marks_it_as_seen() -> anyhow::Result<()> {
        let item = ClipboardItem::new("older", 1);
        let id = item.id.clone();
        let (uc, clipboard, session) = build(vec![ClipboardItem::new("newer", 2), item]);

        uc.execute(&id).await?;

        assert_eq!(*clipboard.written.lock().unwrap(), vec!["older".to_string()]);
        assert_eq!(session.lock().await.last_text.as_deref(), Some("older"));
        Ok(())
    }

    #[tokio::test]
    async fn copy_latest_uses_the_first_item() -> anyhow::Result<()> {
        let (uc, clipboard, _) = build(vec![ClipboardItem::new("newer", 2), ClipboardItem::new("older", 1)]);

        let copied = uc.execute_latest().await?;

        assert_eq!(copied.text, "newer");
        assert_eq!(*clipboard.written.lock().unwrap(), vec!["newer".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn empty_history_has_nothing_to_copy() {
        let (uc, clipboard, _) = build(Vec::new());

        let err = uc.execute_latest().await.unwrap_err();

        assert!(matches!(err, CopyItemError::NothingToCopy));
        assert!(clipboard.written.lock().unwrap().is_empty());
    }
}
