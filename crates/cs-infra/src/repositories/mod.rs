//! Typed repositories over the key-value store.

pub mod item_record;
pub mod item_repo;
pub mod license_flag;
pub mod settings_repo;
pub mod usage_repo;

pub use item_repo::KvClipboardItemRepository;
pub use license_flag::KvLicenseFlag;
pub use settings_repo::KvSettingsRepository;
pub use usage_repo::KvTranslationUsageRepository;
