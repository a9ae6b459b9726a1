pub mod defaults;
pub mod model;

pub use model::{Settings, Theme, CURRENT_SCHEMA_VERSION};
