use crate::event::StoreEvent;

/// Sink for [`StoreEvent`]s. Emitting must not block.
pub trait StoreEventPort: Send + Sync {
    fn emit(&self, event: StoreEvent);
}
