//! Use case for updating user settings
//! 更新用户设置的用例

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::{info, info_span, Instrument};

use cs_core::ports::SettingsPort;
use cs_core::settings::CURRENT_SCHEMA_VERSION;
use cs_core::Settings;

/// Use case for updating user settings.
///
/// ## Behavior / 行为
/// - Validates the schema version and the translation language list
/// - Logs changed fields with old/new values
/// - Persists settings through the settings port
pub struct UpdateSettings {
    settings: Arc<dyn SettingsPort>,
}

impl UpdateSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self, settings: Settings) -> Result<()> {
        let span = info_span!("usecase.update_settings.execute");

        async {
            if settings.schema_version != CURRENT_SCHEMA_VERSION {
                bail!(
                    "Invalid schema version: expected {}, got {}",
                    CURRENT_SCHEMA_VERSION,
                    settings.schema_version
                );
            }
            if settings
                .translation_langs
                .iter()
                .any(|lang| lang.trim().is_empty())
            {
                bail!("translation languages must not be blank");
            }

            let old_settings = self.settings.load().await?;
            let changes = describe_changes(&old_settings, &settings);

            self.settings.save(&settings).await?;

            info!(changed_fields = %changes, "settings updated");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

fn describe_changes(old: &Settings, new: &Settings) -> String {
    let mut parts = Vec::new();

    if old.theme != new.theme {
        parts.push(format!("theme: {:?} → {:?}", old.theme, new.theme));
    }
    if old.language != new.language {
        parts.push(format!("language: {} → {}", old.language, new.language));
    }
    if old.auto_delete != new.auto_delete {
        parts.push(format!(
            "auto_delete: {:?} → {:?}",
            old.auto_delete, new.auto_delete
        ));
    }
    if old.translation_langs != new.translation_langs {
        parts.push(format!(
            "translation_langs: {} → {}",
            old.translation_langs.join(","),
            new.translation_langs.join(",")
        ));
    }

    if parts.is_empty() {
        "(no changes)".to_string()
    } else {
        parts.join(", ")
    }
}
