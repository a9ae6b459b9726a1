use anyhow::Result;
use async_trait::async_trait;

/// Remote text translation. Failures are reported, never retried here.
#[async_trait]
pub trait TranslatorPort: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}
