use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, info_span, warn, Instrument};

use cs_core::ports::{LicensePort, SettingsPort, TranslationUsagePort, TranslatorPort};
use cs_core::{ItemId, QuotaExceeded, TranslationQuota};

use super::internal::ItemStoreGateway;
use crate::session::SharedSession;

#[derive(Debug, thiserror::Error)]
pub enum TranslateItemError {
    #[error("upgrade required: {0}")]
    UpgradeRequired(#[from] QuotaExceeded),

    #[error("clipboard item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("text is too long to translate ({chars} chars, max {max})")]
    TextTooLong { chars: usize, max: usize },

    #[error("no target languages configured")]
    NoTargetLanguages,

    #[error("translation to '{lang}' failed")]
    Translator {
        lang: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub item_id: ItemId,
    /// Requested language -> translated text.
    pub translations: BTreeMap<String, String>,
    /// Languages fetched from the translator by this request.
    pub fetched: Vec<String>,
    /// Requests left in the current period; `None` for premium accounts.
    pub remaining: Option<u32>,
}

/// Translate an item into one or more languages, serving cached languages from the item.
/// 将条目翻译为一种或多种语言；已缓存的语言直接从条目返回。
///
/// ## Behavior / 行为
/// - Languages default to `Settings::translation_langs` when none are requested.
///   未指定语言时使用设置中的翻译语言。
/// - Only languages missing from the item are sent to the translator.
///   仅请求条目中尚未缓存的语言。
/// - A request that fetches anything costs one quota unit for free accounts;
///   fully cached requests and failed requests cost nothing.
///   免费账户每次实际请求消耗一个额度；命中缓存或失败不计入。
/// - The item lock is not held while the translator is awaited. If the item is
///   deleted meanwhile, the results are dropped.
///   等待翻译期间不持有条目锁；若条目已被删除，结果被丢弃。
pub struct TranslateClipboardItem {
    gateway: Arc<ItemStoreGateway>,
    translator: Arc<dyn TranslatorPort>,
    license: Arc<dyn LicensePort>,
    settings: Arc<dyn SettingsPort>,
    usage: Arc<dyn TranslationUsagePort>,
    session: SharedSession,
    free_translation_limit: u32,
    max_translatable_chars: usize,
}

impl TranslateClipboardItem {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gateway: Arc<ItemStoreGateway>,
        translator: Arc<dyn TranslatorPort>,
        license: Arc<dyn LicensePort>,
        settings: Arc<dyn SettingsPort>,
        usage: Arc<dyn TranslationUsagePort>,
        session: SharedSession,
        free_translation_limit: u32,
        max_translatable_chars: usize,
    ) -> Self {
        Self {
            gateway,
            translator,
            license,
            settings,
            usage,
            session,
            free_translation_limit,
            max_translatable_chars,
        }
    }

    pub async fn execute(
        &self,
        item_id: &ItemId,
        langs: &[String],
    ) -> Result<TranslationOutcome, TranslateItemError> {
        let span = info_span!(
            "usecase.translate_clipboard_item.execute",
            item_id = %item_id
        );

        async move {
            let is_premium = self.license.is_premium().await?;

            let item = self
                .gateway
                .snapshot()
                .await?
                .into_iter()
                .find(|item| &item.id == item_id)
                .ok_or_else(|| TranslateItemError::ItemNotFound(item_id.clone()))?;

            if item.char_count > self.max_translatable_chars {
                return Err(TranslateItemError::TextTooLong {
                    chars: item.char_count,
                    max: self.max_translatable_chars,
                });
            }

            let targets = self.resolve_targets(langs).await?;

            let mut translations = BTreeMap::new();
            let mut missing = Vec::new();
            for lang in &targets {
                match item.translation(lang) {
                    Some(cached) => {
                        translations.insert(lang.clone(), cached.to_string());
                    }
                    None => missing.push(lang.clone()),
                }
            }

            let quota = self.usage.load_quota().await?;
            self.session.lock().await.quota = quota;

            if missing.is_empty() {
                debug!("all languages served from cache");
                return Ok(TranslationOutcome {
                    item_id: item.id,
                    translations,
                    fetched: Vec::new(),
                    remaining: self.remaining(is_premium, quota),
                });
            }

            quota.check(is_premium, self.free_translation_limit)?;

            let results = join_all(
                missing
                    .iter()
                    .map(|lang| self.translator.translate(&item.text, lang)),
            )
            .await;

            let mut fetched = Vec::with_capacity(missing.len());
            for (lang, result) in missing.iter().zip(results) {
                let text = result.map_err(|source| {
                    warn!(lang = %lang, error = %source, "translator request failed");
                    TranslateItemError::Translator {
                        lang: lang.clone(),
                        source,
                    }
                })?;
                fetched.push((lang.clone(), text));
            }

            let stored = self
                .gateway
                .mutate(|store| {
                    if store.get(item_id).is_none() {
                        return false;
                    }
                    for (lang, text) in &fetched {
                        store.set_translation(item_id, lang, text);
                    }
                    true
                })
                .await?;
            if !stored {
                debug!("item deleted while translating; results dropped");
            }

            let quota = {
                let mut session = self.session.lock().await;
                session.quota.record_success(is_premium);
                session.quota
            };
            self.usage.save_quota(&quota).await?;

            info!(
                fetched = fetched.len(),
                cached = translations.len(),
                used = quota.used,
                "item translated"
            );

            let fetched_langs = fetched.iter().map(|(lang, _)| lang.clone()).collect();
            translations.extend(fetched);

            Ok(TranslationOutcome {
                item_id: item.id,
                translations,
                fetched: fetched_langs,
                remaining: self.remaining(is_premium, quota),
            })
        }
        .instrument(span)
        .await
    }

    async fn resolve_targets(&self, langs: &[String]) -> Result<Vec<String>, TranslateItemError> {
        let requested: Vec<String> = if langs.is_empty() {
            self.settings.load().await?.translation_langs
        } else {
            langs.to_vec()
        };

        let mut targets: Vec<String> = Vec::new();
        for lang in requested {
            let lang = lang.trim().to_lowercase();
            if !lang.is_empty() && !targets.contains(&lang) {
                targets.push(lang);
            }
        }

        if targets.is_empty() {
            return Err(TranslateItemError::NoTargetLanguages);
        }
        Ok(targets)
    }

    fn remaining(&self, is_premium: bool, quota: TranslationQuota) -> Option<u32> {
        (!is_premium).then(|| quota.remaining(self.free_translation_limit))
    }
}
