//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the external
//! collaborators: the key-value blob store, the system clipboard, the
//! translator, the licensing flag, the clock and the event sink.

mod clipboard;
mod clock;
mod event;
pub mod key_value;
mod licensing;
pub mod repositories;
mod translator;


pub use clipboard::SystemClipboardPort;
pub use clock::ClockPort;
pub use event::StoreEventPort;
pub use key_value::KeyValueStorePort;
pub use licensing::LicensePort;
pub use repositories::{ClipboardItemRepositoryPort, SettingsPort, TranslationUsagePort};
pub use translator::TranslatorPort;
