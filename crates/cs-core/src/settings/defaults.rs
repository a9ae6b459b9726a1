use super::model::*;
use crate::clipboard::RetentionWindow;

impl Default for Theme {
    fn default() -> Self {
        Theme::Auto
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            theme: Theme::Auto,
            language: "en".to_string(),
            auto_delete: RetentionWindow::Never,
            translation_langs: default_translation_langs(),
        }
    }
}
