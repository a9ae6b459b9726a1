use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use tracing::{debug, info, info_span, Instrument};

use cs_core::persistence::keys;
use cs_core::ports::{ClockPort, KeyValueStorePort};
use cs_core::Settings;

/// Write first-run defaults into the key-value store.
/// 首次运行时写入默认存储内容。
///
/// ## Behavior / 行为
/// - First run is detected by a missing `installDate`.
///   以缺失 `installDate` 判定首次运行。
/// - Only missing keys are written, so a half-initialized store is completed
///   without losing existing items.
///   仅写入缺失的键，不会覆盖已有条目。
pub struct InitializeStorage {
    store: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl InitializeStorage {
    pub fn new(store: Arc<dyn KeyValueStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { store, clock }
    }

    /// Returns `true` on first run.
    pub async fn execute(&self) -> Result<bool> {
        let span = info_span!("usecase.initialize_storage.execute");
        async move {
            let existing = self
                .store
                .get(&[
                    keys::CLIPBOARD_ITEMS,
                    keys::SETTINGS,
                    keys::IS_PRO,
                    keys::TRANSLATIONS_USED,
                    keys::TRANSLATIONS_RESET_AT,
                    keys::INSTALL_DATE,
                ])
                .await?;

            if existing.contains_key(keys::INSTALL_DATE) {
                debug!("storage already initialized");
                return Ok(false);
            }

            let now_ms = self.clock.now_ms();
            let settings = serde_json::to_value(Settings::default())
                .context("failed to encode default settings")?;
            let defaults: [(&str, Value); 6] = [
                (keys::CLIPBOARD_ITEMS, json!([])),
                (keys::SETTINGS, settings),
                (keys::IS_PRO, json!(false)),
                (keys::TRANSLATIONS_USED, json!(0)),
                (keys::TRANSLATIONS_RESET_AT, json!(now_ms)),
                (keys::INSTALL_DATE, json!(now_ms)),
            ];

            let mut missing = Map::new();
            for (key, value) in defaults {
                if !existing.contains_key(key) {
                    missing.insert(key.to_string(), value);
                }
            }

            let written = missing.len();
            self.store.set(missing).await?;

            info!(written, install_date = now_ms, "storage initialized for first run");
            Ok(true)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::internal::item_store_gateway::test_support::FixedClock;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct MemoryKv {
        data: StdMutex<Map<String, Value>>,
    }

    #[async_trait]
    impl KeyValueStorePort for MemoryKv {
        async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
            let data = self.data.lock().unwrap();
            Ok(keys
                .iter()
                .filter_map(|key| data.get(*key).map(|v| (key.to_string(), v.clone())))
                .collect())
        }

        async fn set(&self, entries: Map<String, Value>) -> Result<()> {
            self.data.lock().unwrap().extend(entries);
            Ok(())
        }
    }

    #[tokio::test]
    async fn first_run_writes_defaults() -> Result<()> {
        let kv = Arc::new(MemoryKv::default());
        let uc = InitializeStorage::new(kv.clone(), Arc::new(FixedClock(42)));

        assert!(uc.execute().await?);

        let data = kv.data.lock().unwrap().clone();
        assert_eq!(data[keys::CLIPBOARD_ITEMS], json!([]));
        assert_eq!(data[keys::IS_PRO], json!(false));
        assert_eq!(data[keys::TRANSLATIONS_USED], json!(0));
        assert_eq!(data[keys::INSTALL_DATE], json!(42));
        assert_eq!(data[keys::SETTINGS]["autoDelete"], json!("never"));
        Ok(())
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() -> Result<()> {
        let kv = Arc::new(MemoryKv::default());
        let uc = InitializeStorage::new(kv.clone(), Arc::new(FixedClock(42)));
        uc.execute().await?;

        let second = InitializeStorage::new(kv.clone(), Arc::new(FixedClock(99)));
        assert!(!second.execute().await?);
        assert_eq!(kv.data.lock().unwrap()[keys::INSTALL_DATE], json!(42));
        Ok(())
    }

    #[tokio::test]
    async fn existing_items_survive_initialization() -> Result<()> {
        let kv = Arc::new(MemoryKv::default());
        kv.data
            .lock()
            .unwrap()
            .insert(keys::CLIPBOARD_ITEMS.into(), json!([{"text": "keep"}]));
        let uc = InitializeStorage::new(kv.clone(), Arc::new(FixedClock(1)));

        uc.execute().await?;

        assert_eq!(
            kv.data.lock().unwrap()[keys::CLIPBOARD_ITEMS],
            json!([{"text": "keep"}])
        );
        Ok(())
    }
}
