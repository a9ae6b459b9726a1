//! ClipSmart application orchestration layer
//!
//! This crate contains the use cases and the long-running runtime tasks
//! (clipboard monitor, maintenance scheduler). It only talks to the outside
//! world through the ports defined in `cs-core`.

pub mod deps;
pub mod runtime;
pub mod session;
pub mod usecases;

pub use deps::AppDeps;
pub use session::{shared_session, SharedSession};
