//! Infrastructure adapters for the ClipSmart ports.

pub mod event;
pub mod fs;
pub mod repositories;
pub mod storage;
pub mod time;
pub mod translator;

pub use event::BroadcastEventEmitter;
pub use repositories::{
    KvClipboardItemRepository, KvLicenseFlag, KvSettingsRepository, KvTranslationUsageRepository,
};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::SystemClock;
pub use translator::HttpTranslator;
