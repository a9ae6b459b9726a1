use anyhow::Result;
use async_trait::async_trait;

use crate::clipboard::ClipboardItem;
use crate::settings::Settings;
use crate::translation::TranslationQuota;

/// Snapshot persistence of the ordered item list.
#[async_trait]
pub trait ClipboardItemRepositoryPort: Send + Sync {
    /// Items in storage order (most recent first). Empty when nothing is stored.
    async fn load_items(&self) -> Result<Vec<ClipboardItem>>;

    /// Replace the stored list.
    async fn save_items(&self, items: &[ClipboardItem]) -> Result<()>;
}

#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> Result<Settings>;
    async fn save(&self, settings: &Settings) -> Result<()>;
}

#[async_trait]
pub trait TranslationUsagePort: Send + Sync {
    async fn load_quota(&self) -> Result<TranslationQuota>;
    async fn save_quota(&self, quota: &TranslationQuota) -> Result<()>;
}
