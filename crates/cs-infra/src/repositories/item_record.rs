//! Persisted shape of a clipboard item.
//!
//! Tags are a list on disk and a set in memory. Fields written by older
//! versions may be missing; they are derived again from the text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cs_core::{ClipboardItem, ItemId, ItemType};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: String,
    pub text: String,
    #[serde(rename = "type", default)]
    pub item_type: Option<ItemType>,
    pub timestamp: i64,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub char_count: Option<usize>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl From<&ClipboardItem> for ItemRecord {
    fn from(item: &ClipboardItem) -> Self {
        Self {
            id: item.id.to_string(),
            text: item.text.clone(),
            item_type: Some(item.item_type),
            timestamp: item.timestamp_ms,
            pinned: item.pinned,
            char_count: Some(item.char_count),
            tags: item.tags.iter().cloned().collect(),
            translations: item.translations.clone(),
        }
    }
}

impl From<ItemRecord> for ClipboardItem {
    fn from(record: ItemRecord) -> Self {
        let item_type = record
            .item_type
            .unwrap_or_else(|| ItemType::classify(&record.text));
        let char_count = record
            .char_count
            .unwrap_or_else(|| record.text.chars().count());

        ClipboardItem {
            id: ItemId::from_string(record.id),
            text: record.text,
            item_type,
            timestamp_ms: record.timestamp,
            pinned: record.pinned,
            char_count,
            tags: record.tags.into_iter().collect(),
            translations: record.translations,
        }
    }
}
