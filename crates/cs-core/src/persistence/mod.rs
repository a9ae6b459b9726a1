//! Key layout of the key-value blob store.

pub mod keys {
    pub const CLIPBOARD_ITEMS: &str = "clipboardItems";
    pub const SETTINGS: &str = "settings";
    pub const IS_PRO: &str = "isPro";
    pub const TRANSLATIONS_USED: &str = "translationsUsed";
    pub const TRANSLATIONS_RESET_AT: &str = "translationsResetAt";
    pub const INSTALL_DATE: &str = "installDate";
}
