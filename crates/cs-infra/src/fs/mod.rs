pub mod app_data_dir;

pub use app_data_dir::{app_data_dir, default_log_dir, default_storage_path};
