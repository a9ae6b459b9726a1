use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "clipsmart";

/// Get the ClipSmart application data root directory.
///
/// 获取 ClipSmart 应用数据根目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/clipsmart
/// - Windows: %APPDATA%\clipsmart
/// - Linux: $XDG_DATA_HOME/clipsmart or ~/.local/share/clipsmart
///
/// # Behavior / 行为
/// - This function does not create directories; the caller decides when to.
/// - 此函数不自动创建目录，由调用者决定何时创建。
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}

/// Default location of the key-value storage file.
pub fn default_storage_path() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("storage.json"))
}

/// 获取日志目录
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("logs"))
}

fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // 优先使用 XDG_DATA_HOME
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_and_logs_live_under_the_app_dir() -> Result<()> {
        let root = app_data_dir()?;

        assert!(root.ends_with(APP_DIR_NAME));
        assert_eq!(default_storage_path()?, root.join("storage.json"));
        assert_eq!(default_log_dir()?, root.join("logs"));
        Ok(())
    }
}
