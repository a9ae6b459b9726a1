//! # Application Runtime / 应用运行时
//!
//! [`AppRuntime`] owns the wired dependencies, the shared item gateway and the
//! process session. Commands reach use cases through [`AppRuntime::usecases`],
//! which builds each one from the runtime's ports on demand.
//!
//! ## Adding New Use Cases
//!
//! 1. Ensure the use case has a `new()` constructor taking its required ports
//! 2. Add a method to `UseCases` that calls `new()` with deps
//! 3. Commands can now call `runtime.usecases().your_use_case()`

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::broadcast;
use tracing::{info, info_span, Instrument};

use cs_app::runtime::{ClipboardMonitor, MaintenanceScheduler};
use cs_app::usecases::*;
use cs_app::{shared_session, AppDeps, SharedSession};
use cs_core::config::AppConfig;
use cs_core::{StoreEvent, TranslationQuota};
use cs_infra::{BroadcastEventEmitter, KvLicenseFlag};

use super::wiring::{wire_dependencies, WiredDependencies};

/// Application runtime with dependencies.
/// 包含所有应用依赖的运行时。
pub struct AppRuntime {
    /// Application dependencies
    pub deps: AppDeps,
    pub config: AppConfig,
    gateway: Arc<ItemStoreGateway>,
    session: SharedSession,
    license_flag: Arc<KvLicenseFlag>,
    events: Arc<BroadcastEventEmitter>,
}

impl AppRuntime {
    pub fn new(wired: WiredDependencies, config: AppConfig) -> Self {
        let WiredDependencies {
            deps,
            license_flag,
            events,
        } = wired;
        let gateway = Arc::new(ItemStoreGateway::new(
            deps.item_repo.clone(),
            deps.events.clone(),
        ));

        Self {
            deps,
            config,
            gateway,
            session: shared_session(TranslationQuota::default()),
            license_flag,
            events,
        }
    }

    /// Get use cases accessor.
    /// 获取用例访问器。
    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }

    pub fn license_flag(&self) -> &KvLicenseFlag {
        &self.license_flag
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Clipboard monitor sharing this runtime's session and gateway.
    pub fn clipboard_monitor(&self) -> ClipboardMonitor {
        ClipboardMonitor::new(
            self.deps.clipboard.clone(),
            Arc::new(self.usecases().capture_clipboard_text()),
            self.session.clone(),
            Duration::from_millis(self.config.monitor.poll_interval_ms),
        )
    }

    /// Daily retention cleanup plus the quota reset check.
    pub fn maintenance_scheduler(&self) -> MaintenanceScheduler {
        let uc = self.usecases();
        MaintenanceScheduler::new(
            Arc::new(uc.apply_retention_policy()),
            Arc::new(uc.reset_translation_quota()),
            Duration::from_secs(self.config.maintenance.cleanup_interval_secs),
        )
    }

    /// Startup sequence: first-run defaults, then load (and reset if due) the
    /// translation quota into the session.
    /// 启动流程：初始化存储，然后加载翻译额度。
    pub async fn start(&self) -> anyhow::Result<()> {
        let span = info_span!("runtime.start");
        async {
            let uc = self.usecases();
            let first_run = uc
                .initialize_storage()
                .execute()
                .await
                .context("failed to initialize storage")?;
            uc.reset_translation_quota()
                .execute()
                .await
                .context("failed to load translation quota")?;
            info!(first_run, "runtime started");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

/// Wire every adapter and run the startup sequence.
/// 组装依赖并执行启动流程。
pub async fn create_runtime(config: AppConfig) -> anyhow::Result<AppRuntime> {
    let wired = wire_dependencies(&config)?;
    let runtime = AppRuntime::new(wired, config);
    runtime.start().await?;
    Ok(runtime)
}

/// Use cases accessor for AppRuntime.
///
/// Each method returns a use case with its dependencies already wired.
/// 每个方法返回一个依赖已注入的用例实例。
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl<'a> UseCases<'a> {
    pub fn new(runtime: &'a AppRuntime) -> Self {
        Self { runtime }
    }

    fn deps(&self) -> &AppDeps {
        &self.runtime.deps
    }

    fn gateway(&self) -> Arc<ItemStoreGateway> {
        self.runtime.gateway.clone()
    }

    pub fn initialize_storage(&self) -> InitializeStorage {
        InitializeStorage::new(self.deps().kv_store.clone(), self.deps().clock.clone())
    }

    pub fn capture_clipboard_text(&self) -> CaptureClipboardText {
        CaptureClipboardText::new(
            self.gateway(),
            self.deps().license.clone(),
            self.deps().clock.clone(),
            self.runtime.config.limits.free_item_limit,
        )
    }

    pub fn list_clipboard_items(&self) -> ListClipboardItems {
        ListClipboardItems::new(
            self.gateway(),
            self.deps().license.clone(),
            self.runtime.config.limits.free_display_limit,
        )
    }

    pub fn delete_clipboard_item(&self) -> DeleteClipboardItem {
        DeleteClipboardItem::new(self.gateway())
    }

    pub fn clear_clipboard_items(&self) -> ClearClipboardItems {
        ClearClipboardItems::new(self.gateway())
    }

    pub fn set_item_pinned(&self) -> SetItemPinned {
        SetItemPinned::new(self.gateway())
    }

    pub fn add_item_tag(&self) -> AddItemTag {
        AddItemTag::new(self.gateway())
    }

    pub fn remove_item_tag(&self) -> RemoveItemTag {
        RemoveItemTag::new(self.gateway())
    }

    pub fn list_tags(&self) -> ListTags {
        ListTags::new(self.gateway())
    }

    pub fn translate_clipboard_item(&self) -> TranslateClipboardItem {
        let limits = &self.runtime.config.limits;
        TranslateClipboardItem::new(
            self.gateway(),
            self.deps().translator.clone(),
            self.deps().license.clone(),
            self.deps().settings.clone(),
            self.deps().usage.clone(),
            self.runtime.session.clone(),
            limits.free_translation_limit,
            limits.max_translatable_chars,
        )
    }

    pub fn apply_retention_policy(&self) -> ApplyRetentionPolicy {
        ApplyRetentionPolicy::new(
            self.gateway(),
            self.deps().settings.clone(),
            self.deps().clock.clone(),
        )
    }

    pub fn reset_translation_quota(&self) -> ResetTranslationQuota {
        let period_ms = self
            .runtime
            .config
            .maintenance
            .quota_reset_interval_secs
            .saturating_mul(1000)
            .min(i64::MAX as u64) as i64;
        ResetTranslationQuota::new(
            self.deps().usage.clone(),
            self.runtime.session.clone(),
            self.deps().clock.clone(),
            period_ms,
        )
    }

    pub fn export_clipboard_items(&self) -> ExportClipboardItems {
        ExportClipboardItems::new(
            self.gateway(),
            self.deps().license.clone(),
            self.deps().clock.clone(),
        )
    }

    pub fn copy_item_to_clipboard(&self) -> CopyItemToClipboard {
        CopyItemToClipboard::new(
            self.gateway(),
            self.deps().clipboard.clone(),
            self.runtime.session.clone(),
        )
    }

    pub fn get_settings(&self) -> GetSettings {
        GetSettings::new(self.deps().settings.clone())
    }

    pub fn update_settings(&self) -> UpdateSettings {
        UpdateSettings::new(self.deps().settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::ItemQuery;
    use tempfile::TempDir;

    async fn runtime_in(dir: &TempDir) -> AppRuntime {
        let mut config = AppConfig::default();
        config.storage.data_path = Some(dir.path().join("storage.json"));
        config.limits.free_item_limit = 3;
        create_runtime(config).await.unwrap()
    }

    #[tokio::test]
    async fn first_start_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let runtime = runtime_in(&dir).await;

        let raw = std::fs::read_to_string(dir.path().join("storage.json")).unwrap();
        let document: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(document["clipboardItems"], serde_json::json!([]));
        assert_eq!(document["isPro"], false);
        assert!(document["installDate"].is_i64());

        let settings = runtime.usecases().get_settings().execute().await.unwrap();
        assert_eq!(settings.translation_langs, vec!["de", "es", "fr"]);
    }

    #[tokio::test]
    async fn use_cases_share_the_same_store() {
        let dir = TempDir::new().unwrap();
        let runtime = runtime_in(&dir).await;
        let uc = runtime.usecases();

        for text in ["one", "two", "three", "four"] {
            uc.capture_clipboard_text().execute(text).await.unwrap();
        }

        let page = uc
            .list_clipboard_items()
            .execute(&ItemQuery::new())
            .await
            .unwrap();
        let texts: Vec<_> = page.items.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, vec!["four", "three", "two"]);
    }

    #[tokio::test]
    async fn item_count_changes_reach_subscribers() {
        let dir = TempDir::new().unwrap();
        let runtime = runtime_in(&dir).await;
        let mut events = runtime.subscribe_events();

        runtime
            .usecases()
            .capture_clipboard_text()
            .execute("hello")
            .await
            .unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            StoreEvent::ItemCountChanged { count: 1 }
        );
    }
}
