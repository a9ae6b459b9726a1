//! Tag use cases. The global tag set is derived from the items on every read
//! and is never stored on its own.

use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use cs_core::{ItemId, ItemStore};

use super::internal::ItemStoreGateway;

/// Attach a tag to an item. Tags are trimmed; blank tags are rejected.
/// 为条目添加标签。
pub struct AddItemTag {
    gateway: Arc<ItemStoreGateway>,
}

impl AddItemTag {
    pub fn new(gateway: Arc<ItemStoreGateway>) -> Self {
        Self { gateway }
    }

    /// Returns `false` when the item is unknown, the tag is blank, or already present.
    #[tracing::instrument(
        name = "usecase.add_item_tag.execute",
        skip(self),
        fields(item_id = %item_id)
    )]
    pub async fn execute(&self, item_id: &ItemId, tag: &str) -> Result<bool> {
        let added = self.gateway.mutate(|store| store.add_tag(item_id, tag)).await?;
        if added {
            info!(item_id = %item_id, tag = tag.trim(), "tag added");
        }
        Ok(added)
    }
}

/// Detach a tag from an item.
/// 从条目移除标签。
pub struct RemoveItemTag {
    gateway: Arc<ItemStoreGateway>,
}

impl RemoveItemTag {
    pub fn new(gateway: Arc<ItemStoreGateway>) -> Self {
        Self { gateway }
    }

    #[tracing::instrument(
        name = "usecase.remove_item_tag.execute",
        skip(self),
        fields(item_id = %item_id)
    )]
    pub async fn execute(&self, item_id: &ItemId, tag: &str) -> Result<bool> {
        let removed = self
            .gateway
            .mutate(|store| store.remove_tag(item_id, tag))
            .await?;
        if removed {
            info!(item_id = %item_id, tag, "tag removed");
        }
        Ok(removed)
    }
}

/// Every tag used by at least one item, sorted.
pub struct ListTags {
    gateway: Arc<ItemStoreGateway>,
}

impl ListTags {
    pub fn new(gateway: Arc<ItemStoreGateway>) -> Self {
        Self { gateway }
    }

    #[tracing::instrument(name = "usecase.list_tags.execute", skip(self))]
    pub async fn execute(&self) -> Result<BTreeSet<String>> {
        let items = self.gateway.snapshot().await?;
        Ok(ItemStore::from_items(items).tags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::internal::item_store_gateway::test_support::*;
    use cs_core::ClipboardItem;

    struct Fixture {
        repo: Arc<MemoryItemRepo>,
        add: AddItemTag,
        remove: RemoveItemTag,
        list: ListTags,
        first: ItemId,
        second: ItemId,
    }

    fn fixture() -> Fixture {
        let first = ClipboardItem::new("first", 2);
        let second = ClipboardItem::new("second", 1);
        let (first_id, second_id) = (first.id.clone(), second.id.clone());
        let repo = Arc::new(MemoryItemRepo::with_items(vec![first, second]));
        let gateway = Arc::new(ItemStoreGateway::new(
            repo.clone(),
            Arc::new(RecordingEvents::default()),
        ));
        Fixture {
            repo,
            add: AddItemTag::new(gateway.clone()),
            remove: RemoveItemTag::new(gateway.clone()),
            list: ListTags::new(gateway),
            first: first_id,
            second: second_id,
        }
    }

    #[tokio::test]
    async fn tag_disappears_only_when_last_reference_is_removed() -> Result<()> {
        let f = fixture();
        f.add.execute(&f.first, "work").await?;
        f.add.execute(&f.second, "work").await?;

        f.remove.execute(&f.first, "work").await?;
        assert!(f.list.execute().await?.contains("work"));

        f.remove.execute(&f.second, "work").await?;
        assert!(!f.list.execute().await?.contains("work"));
        Ok(())
    }

    #[tokio::test]
    async fn blank_tags_are_rejected_and_others_trimmed() -> Result<()> {
        let f = fixture();

        assert!(!f.add.execute(&f.first, "  ").await?);
        assert!(f.add.execute(&f.first, " todo ").await?);

        assert!(f.repo.items()[0].has_tag("todo"));
        assert_eq!(f.list.execute().await?.len(), 1);
        Ok(())
    }
}
