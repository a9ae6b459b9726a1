//! Polling clipboard monitor.
//! 轮询式剪贴板监视器。
//!
//! Each tick reads the system clipboard and hands changed text to
//! [`CaptureClipboardText`]. The monitor compares against the session's
//! `last_text`, not against the store, so re-copying an older item still
//! promotes it.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use cs_core::ports::SystemClipboardPort;
use cs_core::UpsertOutcome;

use crate::session::SharedSession;
use crate::usecases::CaptureClipboardText;

/// Consecutive read failures tolerated before the poll interval backs off.
const MAX_CONSECUTIVE_ERRORS: u32 = 10;
/// Backed-off interval never exceeds this multiple of the base interval.
const MAX_BACKOFF_FACTOR: u32 = 10;

pub struct ClipboardMonitor {
    clipboard: Arc<dyn SystemClipboardPort>,
    capture: Arc<CaptureClipboardText>,
    session: SharedSession,
    poll_interval: Duration,
}

impl ClipboardMonitor {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        capture: Arc<CaptureClipboardText>,
        session: SharedSession,
        poll_interval: Duration,
    ) -> Self {
        Self {
            clipboard,
            capture,
            session,
            poll_interval,
        }
    }

    /// Read the clipboard once and store its text if it changed since the last look.
    pub async fn check_once(&self) -> Result<Option<UpsertOutcome>> {
        match self.clipboard.read_text()? {
            Some(text) => self.observe(&text).await,
            None => Ok(None),
        }
    }

    /// Store text coming from a source other than polling (context menu, capture surface).
    ///
    /// Text equal to the last seen clipboard text is skipped.
    pub async fn add_item(&self, text: &str) -> Result<Option<UpsertOutcome>> {
        debug!(chars = text.chars().count(), "manual item received");
        self.observe(text).await
    }

    async fn observe(&self, text: &str) -> Result<Option<UpsertOutcome>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if !self.session.lock().await.observe_text(text) {
            return Ok(None);
        }
        self.capture.execute(text).await
    }

    /// Poll until `shutdown` is cancelled. Every failure is logged and the loop keeps going.
    pub async fn run(&self, shutdown: CancellationToken) {
        info!(
            interval_ms = self.poll_interval.as_millis() as u64,
            "clipboard monitor started"
        );
        let mut consecutive_errors = 0u32;

        loop {
            let delay = match self.clipboard.read_text() {
                Ok(text) => {
                    consecutive_errors = 0;
                    if let Some(text) = text {
                        if let Err(err) = self.observe(&text).await {
                            warn!(error = %err, "failed to store clipboard text");
                        }
                    }
                    self.poll_interval
                }
                Err(err) => {
                    consecutive_errors = consecutive_errors.saturating_add(1);
                    if consecutive_errors == 1 || consecutive_errors % 10 == 0 {
                        warn!(
                            error = %err,
                            consecutive_errors,
                            "failed to read clipboard"
                        );
                    }
                    if consecutive_errors == MAX_CONSECUTIVE_ERRORS {
                        warn!("too many consecutive clipboard errors, reducing poll frequency");
                    }
                    backoff_delay(self.poll_interval, consecutive_errors)
                }
            };

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        info!("clipboard monitor stopped");
    }
}

/// Poll delay after `consecutive_errors` failed reads in a row.
fn backoff_delay(base: Duration, consecutive_errors: u32) -> Duration {
    if consecutive_errors < MAX_CONSECUTIVE_ERRORS {
        return base;
    }
    let exponent = (consecutive_errors - MAX_CONSECUTIVE_ERRORS).min(4);
    let factor = 2u32.pow(exponent).min(MAX_BACKOFF_FACTOR);
    base * factor
}
