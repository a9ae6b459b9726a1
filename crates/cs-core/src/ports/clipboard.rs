//! System clipboard port - plain text only.

use anyhow::Result;

pub trait SystemClipboardPort: Send + Sync {
    /// Read the current clipboard text.
    ///
    /// `Ok(None)` when the clipboard holds no text.
    fn read_text(&self) -> Result<Option<String>>;

    fn write_text(&self, text: &str) -> Result<()>;
}
