/// Facts emitted by the core for the presentation layer (badge, notifications).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    ItemCountChanged { count: usize },
}
