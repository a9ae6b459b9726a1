//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML config file into the [`AppConfig`] DTO.
//! 读取 TOML 配置文件并映射为 [`AppConfig`]。
//!
//! Missing sections and keys take the defaults declared on the DTO. No other
//! validation happens here.

use anyhow::Context;
use std::path::{Path, PathBuf};
use cs_core::config::AppConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// - File cannot be read (I/O error) / 无法读取文件
/// - Content is not valid TOML or does not fit the DTO / 内容不是有效的 TOML
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str::<AppConfig>(&content)
        .with_context(|| format!("Failed to parse config as TOML: {}", config_path.display()))
}

/// `<config dir>/clipsmart/config.toml`, e.g. `~/.config/clipsmart/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clipsmart").join("config.toml"))
}

/// Pick the config source
/// 选择配置来源
///
/// 1. The explicit `--config` path; it must exist.
/// 2. The default config path, when that file exists.
/// 3. Built-in defaults.
pub fn resolve_config(config_path: Option<&Path>) -> anyhow::Result<AppConfig> {
    resolve_config_from(config_path, default_config_path())
}

fn resolve_config_from(
    explicit: Option<&Path>,
    fallback: Option<PathBuf>,
) -> anyhow::Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path.to_path_buf());
    }
    match fallback {
        Some(path) if path.is_file() => load_config(path),
        _ => Ok(AppConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    /// Test that valid TOML is parsed correctly
    /// 测试有效 TOML 被正确解析
    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            [monitor]
            poll_interval_ms = 250

            [limits]
            free_item_limit = 5
            free_translation_limit = 3

            [storage]
            data_path = "/tmp/clipsmart/storage.json"

            [translator]
            endpoint = "http://localhost:9000/translate"
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(
            Duration::from_millis(config.monitor.poll_interval_ms),
            Duration::from_millis(250)
        );
        assert_eq!(config.limits.free_item_limit, 5);
        assert_eq!(config.limits.free_translation_limit, 3);
        assert_eq!(
            config.storage.data_path,
            Some(PathBuf::from("/tmp/clipsmart/storage.json"))
        );
        assert_eq!(config.translator.endpoint, "http://localhost:9000/translate");
    }

    /// Test that missing keys fall back to defaults
    /// 测试缺失的键使用默认值
    #[test]
    fn test_load_config_fills_missing_keys_with_defaults() {
        let temp_file = write_config(
            r#"
            [limits]
            free_display_limit = 10
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.limits.free_display_limit, 10);
        assert_eq!(config.limits.free_item_limit, 20);
        assert_eq!(config.limits.max_translatable_chars, 150);
        assert_eq!(config.monitor.poll_interval_ms, 1000);
        assert_eq!(config.maintenance.cleanup_interval_secs, 86_400);
        assert_eq!(config.translator.api_key_env, "CLIPSMART_TRANSLATOR_KEY");
        assert_eq!(config.storage.data_path, None);
    }

    #[test]
    fn test_load_config_rejects_wrong_types() {
        let temp_file = write_config(
            r#"
            [monitor]
            poll_interval_ms = "fast"
        "#,
        );

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    /// Test that non-existent files return IO error
    /// 测试不存在的文件返回 IO 错误
    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let result = load_config(PathBuf::from("/this/path/does/not/exist/config.toml"));

        let err = result.unwrap_err();
        assert!(
            err.to_string().contains("Failed to read config file"),
            "Expected IO error message, got: {}",
            err
        );
    }

    #[test]
    fn test_resolve_config_prefers_explicit_path() {
        let explicit = write_config("[limits]\nfree_item_limit = 7\n");
        let fallback = write_config("[limits]\nfree_item_limit = 9\n");

        let config = resolve_config_from(
            Some(explicit.path()),
            Some(fallback.path().to_path_buf()),
        )
        .unwrap();
        assert_eq!(config.limits.free_item_limit, 7);

        let config = resolve_config_from(None, Some(fallback.path().to_path_buf())).unwrap();
        assert_eq!(config.limits.free_item_limit, 9);
    }

    #[test]
    fn test_resolve_config_without_any_file_uses_defaults() {
        let missing = PathBuf::from("/this/path/does/not/exist/config.toml");

        assert_eq!(
            resolve_config_from(None, Some(missing)).unwrap(),
            AppConfig::default()
        );
        assert_eq!(resolve_config_from(None, None).unwrap(), AppConfig::default());
    }
}
