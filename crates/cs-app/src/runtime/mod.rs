pub mod monitor;
pub mod scheduler;

pub use monitor::ClipboardMonitor;
pub use scheduler::MaintenanceScheduler;
