//! Read-only filter / sort / paginate over the stored items.
//!
//! Nothing here mutates the store; display order never leaks back into
//! storage order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::clipboard::{ClipboardItem, ItemLimit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Az,
    Za,
    Longest,
    Shortest,
}

impl SortOrder {
    fn compare(&self, a: &ClipboardItem, b: &ClipboardItem) -> Ordering {
        match self {
            SortOrder::Newest => b.timestamp_ms.cmp(&a.timestamp_ms),
            SortOrder::Oldest => a.timestamp_ms.cmp(&b.timestamp_ms),
            SortOrder::Az => a.text.cmp(&b.text),
            SortOrder::Za => b.text.cmp(&a.text),
            SortOrder::Longest => b.char_count.cmp(&a.char_count),
            SortOrder::Shortest => a.char_count.cmp(&b.char_count),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "az" | "a-z" => Ok(SortOrder::Az),
            "za" | "z-a" => Ok(SortOrder::Za),
            "longest" => Ok(SortOrder::Longest),
            "shortest" => Ok(SortOrder::Shortest),
            other => Err(format!("unsupported sort order: {other}")),
        }
    }
}

/// Which list the caller is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryTab {
    /// Every item; subject to the free display limit.
    #[default]
    Recent,
    /// Pinned items only; never truncated.
    Pinned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemQuery {
    pub search: Option<String>,
    pub sort: SortOrder,
    pub tab: QueryTab,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPage {
    pub items: Vec<ClipboardItem>,
    /// Number of items matching the query before the display limit.
    pub total_matches: usize,
    /// Matches withheld by the display limit.
    pub hidden: usize,
}

impl ItemQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_tab(mut self, tab: QueryTab) -> Self {
        self.tab = tab;
        self
    }

    pub fn run(&self, items: &[ClipboardItem], limit: ItemLimit) -> QueryPage {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matches: Vec<ClipboardItem> = items
            .iter()
            .filter(|item| self.tab != QueryTab::Pinned || item.pinned)
            .filter(|item| needle.as_deref().map_or(true, |n| item.matches_lowercase(n)))
            .cloned()
            .collect();

        // stable: ties keep storage order
        matches.sort_by(|a, b| self.sort.compare(a, b));

        let total_matches = matches.len();
        if let (QueryTab::Recent, ItemLimit::Capped(cap)) = (self.tab, limit) {
            matches.truncate(cap);
        }
        let hidden = total_matches - matches.len();

        QueryPage {
            items: matches,
            total_matches,
            hidden,
        }
    }
}
