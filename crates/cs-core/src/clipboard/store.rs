//! Authoritative ordered collection of clipboard items.
//!
//! The store is pure data: it never touches storage, the clock or the
//! licensing flag. Callers pass `now_ms` and the [`ItemLimit`] that applies to
//! the current account tier, and persist the result themselves.
//!
//! Invariants kept by every operation:
//!
//! - items are unique by `text`
//! - storage order is most-recently-seen first
//! - under [`ItemLimit::Capped`], an upsert never leaves more unpinned items
//!   than the cap allows; pinned items are never dropped by the cap

use std::collections::BTreeSet;

use crate::clipboard::ClipboardItem;
use crate::ids::ItemId;

/// Maximum number of items kept for an account tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLimit {
    Unlimited,
    Capped(usize),
}

impl ItemLimit {
    pub fn for_tier(is_premium: bool, free_cap: usize) -> Self {
        if is_premium {
            ItemLimit::Unlimited
        } else {
            ItemLimit::Capped(free_cap)
        }
    }
}

/// Result of [`ItemStore::upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub item: ClipboardItem,
    /// `true` when an existing item was moved to the front instead of created.
    pub promoted: bool,
    /// Items dropped permanently by the size cap.
    pub dropped: Vec<ItemId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<ClipboardItem>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a persisted snapshot.
    ///
    /// Snapshots written by another surface may contain duplicate texts; the
    /// first (most recent) occurrence wins.
    pub fn from_items(items: Vec<ClipboardItem>) -> Self {
        let mut seen = BTreeSet::new();
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.text.clone()))
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ClipboardItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&ClipboardItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Most recently seen item.
    pub fn latest(&self) -> Option<&ClipboardItem> {
        self.items.first()
    }

    fn get_mut(&mut self, id: &ItemId) -> Option<&mut ClipboardItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Insert new text or promote the existing item carrying the same text.
    ///
    /// Returns `None` for empty or whitespace-only text, which is never stored.
    pub fn upsert(&mut self, text: &str, now_ms: i64, limit: ItemLimit) -> Option<UpsertOutcome> {
        if text.trim().is_empty() {
            return None;
        }

        let (item, promoted) = match self.items.iter().position(|item| item.text == text) {
            Some(index) => {
                let mut existing = self.items.remove(index);
                existing.timestamp_ms = now_ms;
                (existing, true)
            }
            None => (ClipboardItem::new(text, now_ms), false),
        };

        self.items.insert(0, item.clone());
        let dropped = self.enforce_limit(limit);

        Some(UpsertOutcome {
            item,
            promoted,
            dropped,
        })
    }

    /// Keep every pinned item plus the most recent unpinned items that fit in
    /// what is left of the cap. Relative order is preserved.
    fn enforce_limit(&mut self, limit: ItemLimit) -> Vec<ItemId> {
        let cap = match limit {
            ItemLimit::Unlimited => return Vec::new(),
            ItemLimit::Capped(cap) => cap,
        };

        if self.items.len() <= cap {
            return Vec::new();
        }

        let pinned = self.items.iter().filter(|item| item.pinned).count();
        let mut unpinned_budget = cap.saturating_sub(pinned);
        let mut dropped = Vec::new();

        self.items.retain(|item| {
            if item.pinned {
                return true;
            }
            if unpinned_budget > 0 {
                unpinned_budget -= 1;
                return true;
            }
            dropped.push(item.id.clone());
            false
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(cap, dropped = dropped.len(), "item cap enforced");

        dropped
    }

    /// Remove an item. Returns whether anything was removed.
    pub fn delete(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        before != self.items.len()
    }

    /// Remove every item, pinned ones included.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    /// Set the pinned flag. Never re-checks the size cap.
    pub fn set_pinned(&mut self, id: &ItemId, pinned: bool) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                item.pinned = pinned;
                true
            }
            None => false,
        }
    }

    /// Add a tag to an item. Returns `false` when the item does not exist,
    /// the tag is blank, or the item already carries it.
    pub fn add_tag(&mut self, id: &ItemId, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        self.get_mut(id)
            .map(|item| item.tags.insert(tag.to_string()))
            .unwrap_or(false)
    }

    /// Remove a tag from an item. Returns whether the tag was present.
    pub fn remove_tag(&mut self, id: &ItemId, tag: &str) -> bool {
        let tag = tag.trim();
        self.get_mut(id)
            .map(|item| item.tags.remove(tag))
            .unwrap_or(false)
    }

    /// Global tag set: every tag referenced by at least one current item.
    pub fn tags(&self) -> BTreeSet<String> {
        self.items
            .iter()
            .flat_map(|item| item.tags.iter().cloned())
            .collect()
    }

    /// Cache a translation for `(id, lang)`.
    ///
    /// An existing translation for the same language is canonical and is not
    /// overwritten. Returns whether the value was stored.
    pub fn set_translation(&mut self, id: &ItemId, lang: &str, text: &str) -> bool {
        let Some(item) = self.get_mut(id) else {
            return false;
        };
        if item.translations.contains_key(lang) {
            return false;
        }
        item.translations.insert(lang.to_string(), text.to_string());
        true
    }

    /// Drop unpinned items last seen more than `max_age_ms` ago.
    pub fn prune_older_than(&mut self, now_ms: i64, max_age_ms: i64) -> Vec<ItemId> {
        let mut removed = Vec::new();
        self.items.retain(|item| {
            if item.pinned || now_ms.saturating_sub(item.timestamp_ms) <= max_age_ms {
                return true;
            }
            removed.push(item.id.clone());
            false
        });
        removed
    }
}
