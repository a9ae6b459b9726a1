//! Periodic maintenance: retention cleanup and translation quota reset.
//!
//! The first tick fires immediately, so both jobs also run at startup.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::usecases::{ApplyRetentionPolicy, ResetTranslationQuota};

pub struct MaintenanceScheduler {
    retention: Arc<ApplyRetentionPolicy>,
    quota_reset: Arc<ResetTranslationQuota>,
    interval: Duration,
}

impl MaintenanceScheduler {
    pub fn new(
        retention: Arc<ApplyRetentionPolicy>,
        quota_reset: Arc<ResetTranslationQuota>,
        interval: Duration,
    ) -> Self {
        Self {
            retention,
            quota_reset,
            interval,
        }
    }

    /// Run both jobs once. Failures are logged, never propagated.
    pub async fn run_once(&self) {
        if let Err(err) = self.retention.execute().await {
            warn!(error = %err, "retention cleanup failed");
        }
        if let Err(err) = self.quota_reset.execute().await {
            warn!(error = %err, "translation quota reset failed");
        }
    }

    pub async fn run(&self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.interval.as_secs(),
            "maintenance scheduler started"
        );
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => self.run_once().await,
            }
        }

        info!("maintenance scheduler stopped");
    }
}
