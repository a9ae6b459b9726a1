//! DeepL-compatible HTTP translator.
//!
//! Sends `text` and `target_lang` as a form post and reads
//! `translations[0].text` from the JSON reply.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use cs_core::ports::TranslatorPort;

#[derive(Debug, thiserror::Error)]
pub enum TranslatorError {
    #[error("translator API key is not configured")]
    MissingApiKey,

    #[error("translator returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("translator response did not contain a translation")]
    EmptyResponse,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

pub struct HttpTranslator {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("build translator http client failed")?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }
}

#[async_trait]
impl TranslatorPort for HttpTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(TranslatorError::MissingApiKey)?;
        let target = target_lang.to_uppercase();

        debug!(target_lang = %target, chars = text.chars().count(), "requesting translation");

        let resp = self
            .http
            .post(&self.endpoint)
            .header("Authorization", format!("DeepL-Auth-Key {}", api_key))
            .form(&[("text", text), ("target_lang", target.as_str())])
            .send()
            .await
            .context("translator request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TranslatorError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let parsed: TranslateResponse = resp
            .json()
            .await
            .context("parse translator response failed")?;

        parsed
            .translations
            .into_iter()
            .next()
            .map(|translation| translation.text)
            .ok_or_else(|| TranslatorError::EmptyResponse.into())
    }
}
