//! Process-wide session shared by the monitor, copy and translation flows.

use std::sync::Arc;

use tokio::sync::Mutex;

use cs_core::{SessionState, TranslationQuota};

pub type SharedSession = Arc<Mutex<SessionState>>;

pub fn shared_session(quota: TranslationQuota) -> SharedSession {
    Arc::new(Mutex::new(SessionState::new(quota)))
}
