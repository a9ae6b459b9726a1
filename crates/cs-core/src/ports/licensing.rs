use anyhow::Result;
use async_trait::async_trait;

/// Premium flag provider. Read at the start of every tier-dependent operation.
#[async_trait]
pub trait LicensePort: Send + Sync {
    async fn is_premium(&self) -> Result<bool>;
}
