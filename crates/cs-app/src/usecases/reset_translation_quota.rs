use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, info_span, Instrument};

use cs_core::ports::{ClockPort, TranslationUsagePort};

use crate::session::SharedSession;

/// Start a new translation quota period once the current one has run its course.
/// 当前额度周期结束后重置翻译额度。
///
/// The persisted usage is the source of truth; the session copy is refreshed
/// from it on every run so several processes sharing a store agree.
pub struct ResetTranslationQuota {
    usage: Arc<dyn TranslationUsagePort>,
    session: SharedSession,
    clock: Arc<dyn ClockPort>,
    period_ms: i64,
}

impl ResetTranslationQuota {
    pub fn new(
        usage: Arc<dyn TranslationUsagePort>,
        session: SharedSession,
        clock: Arc<dyn ClockPort>,
        period_ms: i64,
    ) -> Self {
        Self {
            usage,
            session,
            clock,
            period_ms,
        }
    }

    /// Returns whether a reset happened.
    pub async fn execute(&self) -> Result<bool> {
        let span = info_span!("usecase.reset_translation_quota.execute");
        async move {
            let mut quota = self.usage.load_quota().await?;
            let now_ms = self.clock.now_ms();

            let due = quota.is_reset_due(now_ms, self.period_ms);
            if due {
                let previous = quota.used;
                quota.reset(now_ms);
                self.usage.save_quota(&quota).await?;
                info!(previous_used = previous, "translation quota reset");
            } else {
                debug!(used = quota.used, "translation quota period still running");
            }

            self.session.lock().await.quota = quota;
            Ok(due)
        }
        .instrument(span)
        .await
    }
}
