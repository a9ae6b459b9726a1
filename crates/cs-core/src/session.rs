//! Process-wide mutable state shared by the monitor and the translation flow.
//!
//! Reset triggers:
//! - `last_text` is replaced on every observed clipboard change, on manual
//!   adds, and before the app writes to the clipboard itself.
//! - `quota` is reset by the periodic quota-reset job.

use crate::translation::TranslationQuota;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Last clipboard text this process observed or wrote.
    pub last_text: Option<String>,
    pub quota: TranslationQuota,
}

impl SessionState {
    pub fn new(quota: TranslationQuota) -> Self {
        Self {
            last_text: None,
            quota,
        }
    }

    /// Record `text` as seen. Returns `false` when it equals the last text.
    pub fn observe_text(&mut self, text: &str) -> bool {
        if self.last_text.as_deref() == Some(text) {
            return false;
        }
        self.last_text = Some(text.to_string());
        true
    }
}
