//! # cs-core
//!
//! Core domain models and business logic for ClipSmart.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod clipboard;
pub mod config;
pub mod event;
pub mod export;
pub mod ids;
pub mod persistence;
pub mod ports;
pub mod session;
pub mod settings;
pub mod translation;

// Re-export commonly used types at the crate root
pub use clipboard::{
    ClipboardItem, ItemLimit, ItemQuery, ItemStore, ItemType, QueryPage, QueryTab,
    RetentionWindow, SortOrder, UpsertOutcome,
};
pub use config::AppConfig;
pub use event::StoreEvent;
pub use export::ExportFormat;
pub use ids::ItemId;
pub use session::SessionState;
pub use settings::Settings;
pub use translation::{QuotaExceeded, TranslationQuota};
