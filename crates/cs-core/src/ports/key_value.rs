//! Key-value blob store port.
//!
//! Mirrors the host storage contract: `get` a set of keys, `set` a mapping.
//! No transactions across keys; the last `set` wins.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Fetch the given keys. Missing keys are absent from the returned map.
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>>;

    /// Write every entry of `entries`, leaving other keys untouched.
    async fn set(&self, entries: Map<String, Value>) -> Result<()>;
}
