//! Use case for getting user settings
//! 获取用户设置的用例

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info_span, Instrument};

use cs_core::ports::SettingsPort;
use cs_core::Settings;

/// Use case for retrieving user settings.
///
/// ## Behavior / 行为
/// - Loads settings from the settings port; a store without settings yields defaults
pub struct GetSettings {
    settings: Arc<dyn SettingsPort>,
}

impl GetSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self) -> Result<Settings> {
        let span = info_span!("usecase.get_settings.execute");

        async {
            let settings = self.settings.load().await?;
            debug!(auto_delete = ?settings.auto_delete, "settings retrieved");
            Ok(settings)
        }
        .instrument(span)
        .await
    }
}
