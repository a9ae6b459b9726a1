use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};
use tracing::trace;

use cs_core::ports::SystemClipboardPort;

/// Plain-text access to the OS clipboard through `clipboard-rs`.
pub struct SystemClipboard {
    inner: Mutex<ClipboardContext>,
}

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let context =
            map_clipboard_err(ClipboardContext::new()).context("ClipboardContext::new failed")?;
        Ok(Self {
            inner: Mutex::new(context),
        })
    }

    fn context(&self) -> Result<std::sync::MutexGuard<'_, ClipboardContext>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("clipboard context lock poisoned"))
    }
}

impl SystemClipboardPort for SystemClipboard {
    fn read_text(&self) -> Result<Option<String>> {
        let ctx = self.context()?;
        if !ctx.has(ContentFormat::Text) {
            trace!("clipboard holds no text");
            return Ok(None);
        }
        let text = map_clipboard_err(ctx.get_text()).context("read clipboard text failed")?;
        Ok(Some(text))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let ctx = self.context()?;
        map_clipboard_err(ctx.set_text(text.to_string())).context("write clipboard text failed")
    }
}
