use std::collections::{BTreeMap, BTreeSet};

use crate::clipboard::ItemType;
use crate::ids::ItemId;

/// A captured clipboard snippet.
///
/// `text`, `item_type` and `char_count` are fixed at creation. Seeing the same
/// text again only refreshes `timestamp_ms` and the item's position in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    pub id: ItemId,
    pub text: String,
    pub item_type: ItemType,
    /// Last time this text was seen, in ms since the unix epoch.
    pub timestamp_ms: i64,
    pub pinned: bool,
    pub char_count: usize,
    pub tags: BTreeSet<String>,
    /// Language code -> translated text.
    pub translations: BTreeMap<String, String>,
}

impl ClipboardItem {
    pub fn new(text: impl Into<String>, now_ms: i64) -> Self {
        let text = text.into();
        let item_type = ItemType::classify(&text);
        let char_count = text.chars().count();

        Self {
            id: ItemId::new(),
            text,
            item_type,
            timestamp_ms: now_ms,
            pinned: false,
            char_count,
            tags: BTreeSet::new(),
            translations: BTreeMap::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn translation(&self, lang: &str) -> Option<&str> {
        self.translations.get(lang).map(String::as_str)
    }

    /// Case-insensitive match of an already lowercased needle against the text or any tag.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_derives_fields_from_text() {
        let item = ClipboardItem::new("https://rust-lang.org", 42);

        assert_eq!(item.item_type, ItemType::Url);
        assert_eq!(item.char_count, 21);
        assert_eq!(item.timestamp_ms, 42);
        assert!(!item.pinned);
        assert!(item.tags.is_empty());
        assert!(item.translations.is_empty());
    }

    #[test]
    fn char_count_counts_characters_not_bytes() {
        let item = ClipboardItem::new("héllo wörld", 0);
        assert_eq!(item.char_count, 11);
    }

    #[test]
    fn matches_text_or_tag_ignoring_case() {
        let mut item = ClipboardItem::new("Meeting Notes", 0);
        item.tags.insert("Work".to_string());

        assert!(item.matches_lowercase("notes"));
        assert!(item.matches_lowercase("work"));
        assert!(!item.matches_lowercase("home"));
    }
}
