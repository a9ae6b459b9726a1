use serde::{Deserialize, Serialize};

use crate::clipboard::ItemStore;
use crate::ids::ItemId;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Maximum age of unpinned items before automatic deletion.
///
/// Persisted the way the settings screen stores it: `"never"` or a day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetentionWindow {
    #[default]
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "1")]
    OneDay,
    #[serde(rename = "7")]
    SevenDays,
    #[serde(rename = "30")]
    ThirtyDays,
}

impl RetentionWindow {
    pub fn days(&self) -> Option<i64> {
        match self {
            RetentionWindow::Never => None,
            RetentionWindow::OneDay => Some(1),
            RetentionWindow::SevenDays => Some(7),
            RetentionWindow::ThirtyDays => Some(30),
        }
    }

    pub fn max_age_ms(&self) -> Option<i64> {
        self.days().map(|days| days * DAY_MS)
    }

    /// Remove every unpinned item whose last sighting is older than the window.
    /// `Never` is a no-op.
    pub fn apply(&self, store: &mut ItemStore, now_ms: i64) -> Vec<ItemId> {
        match self.max_age_ms() {
            Some(max_age_ms) => store.prune_older_than(now_ms, max_age_ms),
            None => Vec::new(),
        }
    }
}

impl std::str::FromStr for RetentionWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "never" => Ok(RetentionWindow::Never),
            "1" | "1d" => Ok(RetentionWindow::OneDay),
            "7" | "7d" => Ok(RetentionWindow::SevenDays),
            "30" | "30d" => Ok(RetentionWindow::ThirtyDays),
            other => Err(format!("unsupported retention window: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardItem, ItemLimit};

    #[test]
    fn one_day_window_removes_stale_unpinned_items_only() {
        let now = 30 * DAY_MS;
        let mut store = ItemStore::new();
        let stale = store
            .upsert("stale", now - 2 * DAY_MS, ItemLimit::Unlimited)
            .unwrap()
            .item
            .id;
        let pinned = store
            .upsert("stale but pinned", now - 2 * DAY_MS, ItemLimit::Unlimited)
            .unwrap()
            .item
            .id;
        store.set_pinned(&pinned, true);

        let removed = RetentionWindow::OneDay.apply(&mut store, now);

        assert_eq!(removed, vec![stale]);
        assert!(store.get(&pinned).is_some());
    }

    #[test]
    fn never_keeps_everything() {
        let mut store = ItemStore::new();
        store.upsert("ancient", 0, ItemLimit::Unlimited);

        assert!(RetentionWindow::Never.apply(&mut store, 400 * DAY_MS).is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn item_exactly_at_window_edge_is_kept() {
        let now = 10 * DAY_MS;
        let mut store = ItemStore::new();
        store.upsert("edge", now - 7 * DAY_MS, ItemLimit::Unlimited);

        assert!(RetentionWindow::SevenDays.apply(&mut store, now).is_empty());
    }

    #[test]
    fn serde_uses_day_strings() {
        assert_eq!(serde_json::to_string(&RetentionWindow::SevenDays).unwrap(), "\"7\"");
        let parsed: RetentionWindow = serde_json::from_str("\"never\"").unwrap();
        assert_eq!(parsed, RetentionWindow::Never);
    }

    #[test]
    fn parses_cli_spellings() {
        assert_eq!("30d".parse::<RetentionWindow>(), Ok(RetentionWindow::ThirtyDays));
        assert!("2".parse::<RetentionWindow>().is_err());
    }

    #[test]
    fn corrupt_timestamps_are_pruned_without_overflow() {
        let mut store = ItemStore::from_items(vec![ClipboardItem::new("x", i64::MIN)]);

        let removed = RetentionWindow::OneDay.apply(&mut store, 30 * DAY_MS);

        assert_eq!(removed.len(), 1);
        assert!(store.is_empty());
    }
}
