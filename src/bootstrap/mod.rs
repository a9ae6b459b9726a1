pub mod config;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::resolve_config;
pub use runtime::{create_runtime, AppRuntime};
