pub mod quota;

pub use quota::{QuotaExceeded, TranslationQuota};
