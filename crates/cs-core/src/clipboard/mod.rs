//! Clipboard item domain: items, classification, the item store and the
//! read-side query engine.

mod item;
mod item_type;
pub mod query;
pub mod retention;
pub mod store;

pub use item::ClipboardItem;
pub use item_type::ItemType;
pub use query::{ItemQuery, QueryPage, QueryTab, SortOrder};
pub use retention::RetentionWindow;
pub use store::{ItemLimit, ItemStore, UpsertOutcome};
