use tokio::sync::broadcast;
use tracing::debug;

use cs_core::ports::StoreEventPort;
use cs_core::StoreEvent;

/// Fans store events out to any number of subscribers.
///
/// Emitting never blocks. With no subscriber the event is only logged; a slow
/// subscriber loses the oldest events once `capacity` is exceeded.
pub struct BroadcastEventEmitter {
    sender: broadcast::Sender<StoreEvent>,
}

impl BroadcastEventEmitter {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }
}

impl StoreEventPort for BroadcastEventEmitter {
    fn emit(&self, event: StoreEvent) {
        debug!(event = ?event, "store event");
        // Err only means nobody is listening.
        let _ = self.sender.send(event);
    }
}
