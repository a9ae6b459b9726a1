pub mod internal;

pub mod apply_retention_policy;
pub mod capture_clipboard_text;
pub mod clear_clipboard_items;
pub mod copy_item_to_clipboard;
pub mod delete_clipboard_item;
pub mod export_clipboard_items;
pub mod get_settings;
pub mod initialize_storage;
pub mod list_clipboard_items;
pub mod manage_item_tags;
pub mod reset_translation_quota;
pub mod set_item_pinned;
pub mod translate_clipboard_item;
pub mod update_settings;

pub use apply_retention_policy::ApplyRetentionPolicy;
pub use capture_clipboard_text::CaptureClipboardText;
pub use clear_clipboard_items::ClearClipboardItems;
pub use copy_item_to_clipboard::{CopyItemError, CopyItemToClipboard};
pub use delete_clipboard_item::DeleteClipboardItem;
pub use export_clipboard_items::{ExportClipboardItems, ExportItemsError, ExportedItems};
pub use get_settings::GetSettings;
pub use initialize_storage::InitializeStorage;
pub use internal::ItemStoreGateway;
pub use list_clipboard_items::ListClipboardItems;
pub use manage_item_tags::{AddItemTag, ListTags, RemoveItemTag};
pub use reset_translation_quota::ResetTranslationQuota;
pub use set_item_pinned::SetItemPinned;
pub use translate_clipboard_item::{TranslateClipboardItem, TranslateItemError, TranslationOutcome};
pub use update_settings::UpdateSettings;
