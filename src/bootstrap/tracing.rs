//! Tracing configuration for ClipSmart
//!
//! Structured logging for the binary. Log lines go to stderr so that command
//! output on stdout stays clean; a daily rolling file is added when a log
//! directory is configured.
//!
//! ## Format / 格式
//!
//! `2025-01-15 10:30:45.123 INFO cs_app::runtime::monitor: src/...rs:42: message`

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{prelude::*, registry, Layer};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "clipsmart.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug level for the app crates
/// - **Production**: info level for the app crates
/// - HTTP client internals stay at warn either way
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let app_level = if is_dev { "debug" } else { "info" };
    vec![
        app_level.to_string(),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
        format!("cs_app={app_level}"),
        format!("cs_infra={app_level}"),
        format!("cs_platform={app_level}"),
    ]
}

/// Initialize the tracing subscriber
/// 初始化 tracing 订阅器
///
/// `RUST_LOG` overrides the default directives. When `log_dir` is given a
/// second, ANSI-free layer writes to `<log_dir>/clipsmart.log.<date>`; if the
/// directory cannot be prepared the error is reported and stderr logging
/// continues alone.
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(log_dir: Option<&Path>) -> anyhow::Result<()> {
    let is_dev = is_development();

    let filter_directives = build_filter_directives(is_dev);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stderr_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = match log_dir.map(build_file_writer).transpose() {
        Ok(writer) => writer,
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stderr: {err}");
            None
        }
    };

    registry()
        .with(env_filter)
        .with(fmt_layer(stderr_writer, cfg!(not(test))))
        .with(file_writer.map(|writer| fmt_layer(writer, false)))
        .try_init()?;

    Ok(())
}

/// One formatted output: UTC millisecond timestamp, level, source location and target.
fn fmt_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S> + Send + Sync
where
    S: ::tracing::Subscriber + for<'span> LookupSpan<'span>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer)
}

fn build_file_writer(log_dir: &Path) -> anyhow::Result<NonBlocking> {
    fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"debug".to_string()));
        assert!(dev_directives.contains(&"cs_app=debug".to_string()));
        assert!(dev_directives.contains(&"cs_platform=debug".to_string()));
        assert!(dev_directives.contains(&"reqwest=warn".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"info".to_string()));
        assert!(prod_directives.contains(&"cs_infra=info".to_string()));
        assert!(prod_directives.contains(&"cs_platform=info".to_string()));
    }

    #[test]
    fn test_directives_form_a_valid_filter() {
        let joined = build_filter_directives(is_development()).join(",");
        assert!(tracing_subscriber::EnvFilter::try_new(joined).is_ok());
    }
}
