//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (storage, translator, clock) / 创建 infra 层具体实现
//! - ✅ Create platform implementations (clipboard) / 创建 platform 层具体实现
//! - ✅ Group everything into [`AppDeps`] / 将所有依赖打包进 AppDeps
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//!
//! > **This is the only place allowed to depend on cs-infra + cs-platform + cs-app simultaneously.**
//! > **这是唯一允许同时依赖 cs-infra、cs-platform 和 cs-app 的地方。**

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cs_app::AppDeps;
use cs_core::config::AppConfig;
use cs_core::ports::*;
use cs_infra::fs::default_storage_path;
use cs_infra::{
    BroadcastEventEmitter, FileKeyValueStore, HttpTranslator, KvClipboardItemRepository,
    KvLicenseFlag, KvSettingsRepository, KvTranslationUsageRepository, SystemClock,
};
use cs_platform::SystemClipboard;
use tracing::info;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Storage initialization failed: {0}")]
    StorageInit(String),

    #[error("Translator initialization failed: {0}")]
    TranslatorInit(String),
}

/// Buffered store events per subscriber.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Wired dependencies plus the concrete handles the binary needs directly.
pub struct WiredDependencies {
    pub deps: AppDeps,
    /// Writable side of the premium flag (`premium on|off`).
    pub license_flag: Arc<KvLicenseFlag>,
    /// Concrete emitter, kept for `subscribe()`.
    pub events: Arc<BroadcastEventEmitter>,
}

/// Resolve the storage file path from config, falling back to the platform data dir.
/// 从配置解析存储文件路径，未配置时使用平台数据目录。
fn resolve_storage_path(config: &AppConfig) -> WiringResult<PathBuf> {
    match &config.storage.data_path {
        Some(path) => Ok(path.clone()),
        None => default_storage_path().map_err(|e| WiringError::StorageInit(e.to_string())),
    }
}

/// Build every adapter and group them into [`AppDeps`].
/// 创建所有适配器并打包为 AppDeps。
///
/// The OS clipboard is opened lazily on first use so commands that never
/// touch it also work without a display server.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<WiredDependencies> {
    let storage_path = resolve_storage_path(config)?;
    if let Some(parent) = storage_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            WiringError::StorageInit(format!("Failed to create storage directory: {}", e))
        })?;
    }
    info!(path = %storage_path.display(), "using storage file");

    let kv_store: Arc<dyn KeyValueStorePort> = Arc::new(FileKeyValueStore::new(&storage_path));
    let license_flag = Arc::new(KvLicenseFlag::new(kv_store.clone()));
    let events = Arc::new(BroadcastEventEmitter::new(EVENT_CHANNEL_CAPACITY));

    let api_key = std::env::var(&config.translator.api_key_env).ok();
    if api_key.is_none() {
        info!(
            env = %config.translator.api_key_env,
            "translator API key not set, remote translation disabled"
        );
    }
    let translator = HttpTranslator::new(
        config.translator.endpoint.clone(),
        api_key,
        Duration::from_secs(config.translator.timeout_secs),
    )
    .map_err(|e| WiringError::TranslatorInit(e.to_string()))?;

    let deps = AppDeps {
        kv_store: kv_store.clone(),
        item_repo: Arc::new(KvClipboardItemRepository::new(kv_store.clone())),
        settings: Arc::new(KvSettingsRepository::new(kv_store.clone())),
        usage: Arc::new(KvTranslationUsageRepository::new(kv_store)),
        license: license_flag.clone(),
        clipboard: Arc::new(LazySystemClipboard::default()),
        translator: Arc::new(translator),
        clock: Arc::new(SystemClock),
        events: events.clone(),
    };

    Ok(WiredDependencies {
        deps,
        license_flag,
        events,
    })
}

/// Opens [`SystemClipboard`] on first access and reuses it afterwards.
#[derive(Default)]
struct LazySystemClipboard {
    inner: Mutex<Option<Arc<SystemClipboard>>>,
}

impl LazySystemClipboard {
    fn get(&self) -> anyhow::Result<Arc<SystemClipboard>> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("clipboard handle lock poisoned"))?;
        if let Some(clipboard) = guard.as_ref() {
            return Ok(clipboard.clone());
        }
        let clipboard = Arc::new(SystemClipboard::new()?);
        *guard = Some(clipboard.clone());
        Ok(clipboard)
    }
}

impl SystemClipboardPort for LazySystemClipboard {
    fn read_text(&self) -> anyhow::Result<Option<String>> {
        self.get()?.read_text()
    }

    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        self.get()?.write_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with_storage(path: PathBuf) -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.data_path = Some(path);
        config
    }

    #[test]
    fn storage_path_comes_from_config() {
        let config = config_with_storage(PathBuf::from("/tmp/clipsmart-test/storage.json"));
        assert_eq!(
            resolve_storage_path(&config).unwrap(),
            PathBuf::from("/tmp/clipsmart-test/storage.json")
        );
    }

    #[tokio::test]
    async fn wiring_creates_storage_directory_and_shares_one_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let wired = wire_dependencies(&config_with_storage(path.clone())).unwrap();

        assert!(path.parent().unwrap().is_dir());

        wired.license_flag.set_premium(true).await.unwrap();
        assert!(wired.deps.license.is_premium().await.unwrap());
    }
}
