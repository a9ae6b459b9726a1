//! Platform adapters for ClipSmart.

pub mod clipboard;

pub use clipboard::SystemClipboard;
