use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("translation quota exhausted: {used}/{limit} used this period")]
pub struct QuotaExceeded {
    pub used: u32,
    pub limit: u32,
}

/// Monthly translation allowance for free accounts.
///
/// `used` counts successful, non-cached translation requests. It only moves
/// forward until [`TranslationQuota::reset`] is called by the periodic reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslationQuota {
    pub used: u32,
    /// When the current period started (ms since epoch).
    pub period_started_ms: i64,
}

impl TranslationQuota {
    pub fn new(used: u32, period_started_ms: i64) -> Self {
        Self {
            used,
            period_started_ms,
        }
    }

    /// Premium accounts are never limited.
    pub fn check(&self, is_premium: bool, limit: u32) -> Result<(), QuotaExceeded> {
        if is_premium || self.used < limit {
            return Ok(());
        }
        Err(QuotaExceeded {
            used: self.used,
            limit,
        })
    }

    /// Count one successful remote translation. Premium usage is not tracked.
    pub fn record_success(&mut self, is_premium: bool) {
        if !is_premium {
            self.used = self.used.saturating_add(1);
        }
    }

    pub fn is_reset_due(&self, now_ms: i64, period_ms: i64) -> bool {
        now_ms.saturating_sub(self.period_started_ms) >= period_ms
    }

    pub fn reset(&mut self, now_ms: i64) {
        self.used = 0;
        self.period_started_ms = now_ms;
    }

    pub fn remaining(&self, limit: u32) -> u32 {
        limit.saturating_sub(self.used)
    }
}
