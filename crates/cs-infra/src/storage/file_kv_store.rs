use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use cs_core::ports::KeyValueStorePort;

/// Key-value store persisted as one JSON object in a single file.
///
/// A missing file reads as an empty store. Writes go to a temporary file that
/// is renamed over the target, so a crash leaves either the old or the new
/// document. Writers in other processes are not coordinated: last writer wins.
pub struct FileKeyValueStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create storage dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn read_document(&self) -> Result<Map<String, Value>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read storage failed: {}", self.path.display()))
            }
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content)
            .with_context(|| format!("parse storage failed: {}", self.path.display()))?
        {
            Value::Object(map) => Ok(map),
            other => bail!(
                "storage file {} does not hold a JSON object (found {})",
                self.path.display(),
                type_name(&other)
            ),
        }
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp storage failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp storage to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>> {
        let mut document = self.read_document().await?;
        Ok(keys
            .iter()
            .filter_map(|key| document.remove(*key).map(|value| (key.to_string(), value)))
            .collect())
    }

    async fn set(&self, entries: Map<String, Value>) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        let written: Vec<String> = entries.keys().cloned().collect();
        document.extend(entries);

        let content = serde_json::to_string_pretty(&Value::Object(document))
            .context("serialize storage failed")?;
        self.atomic_write(&content).await?;

        debug!(keys = ?written, path = %self.path.display(), "storage updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn entries(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test fixture must be an object"),
        }
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() -> Result<()> {
        let dir = TempDir::new()?;
        let store = FileKeyValueStore::new(dir.path().join("storage.json"));

        assert!(store.get(&["clipboardItems"]).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn set_merges_into_existing_keys() -> Result<()> {
        let dir = TempDir::new()?;
        let store = FileKeyValueStore::new(dir.path().join("nested").join("storage.json"));

        store.set(entries(json!({"isPro": false, "translationsUsed": 3}))).await?;
        store.set(entries(json!({"isPro": true}))).await?;

        let got = store.get(&["isPro", "translationsUsed", "absent"]).await?;
        assert_eq!(got.get("isPro"), Some(&json!(true)));
        assert_eq!(got.get("translationsUsed"), Some(&json!(3)));
        assert!(!got.contains_key("absent"));
        Ok(())
    }

    #[tokio::test]
    async fn data_survives_a_new_instance() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("storage.json");

        FileKeyValueStore::new(&path)
            .set(entries(json!({"installDate": 42})))
            .await?;
        let reopened = FileKeyValueStore::new(&path);

        assert_eq!(reopened.get(&["installDate"]).await?["installDate"], json!(42));
        assert!(!path.with_extension("json.tmp").exists());
        Ok(())
    }

    #[tokio::test]
    async fn non_object_document_is_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2, 3]")?;

        let store = FileKeyValueStore::new(&path);
        assert!(store.get(&["isPro"]).await.is_err());
        Ok(())
    }
}
