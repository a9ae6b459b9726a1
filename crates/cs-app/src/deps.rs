//! # Application Dependencies / 应用依赖
//!
//! Dependency grouping for constructing use cases.
//! 构造用例所需的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern, just parameter grouping.
//! **这不是 Builder 模式，仅用于参数打包。**

use std::sync::Arc;

use cs_core::ports::*;

/// All ports the use cases depend on. Every field is required.
/// 用例依赖的全部端口，所有字段均为必需。
pub struct AppDeps {
    // Storage dependencies / 存储依赖
    pub kv_store: Arc<dyn KeyValueStorePort>,
    pub item_repo: Arc<dyn ClipboardItemRepositoryPort>,
    pub settings: Arc<dyn SettingsPort>,
    pub usage: Arc<dyn TranslationUsagePort>,
    pub license: Arc<dyn LicensePort>,

    // Clipboard dependencies / 剪贴板依赖
    pub clipboard: Arc<dyn SystemClipboardPort>,

    // Translation dependencies / 翻译依赖
    pub translator: Arc<dyn TranslatorPort>,

    // System dependencies / 系统依赖
    pub clock: Arc<dyn ClockPort>,
    pub events: Arc<dyn StoreEventPort>,
}
