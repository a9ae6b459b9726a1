mod bootstrap;
mod cli;

use clap::Parser;
use tracing::error;

use bootstrap::tracing::init_tracing_subscriber;
use bootstrap::{create_runtime, resolve_config};
use cli::{run_command, Cli, Commands};
use cs_infra::fs::default_log_dir;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; a missing file is not an error.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;

    let log_dir = config.logging.dir.clone().or_else(|| {
        matches!(cli.command, Commands::Watch)
            .then(|| default_log_dir().ok())
            .flatten()
    });
    init_tracing_subscriber(log_dir.as_deref())?;

    let runtime = create_runtime(config).await.map_err(|err| {
        error!(error = %err, "failed to start");
        err
    })?;

    run_command(&runtime, cli.command).await
}
