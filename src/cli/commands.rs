//! Command handlers. Each one calls a use case through the runtime and prints the result.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use cs_core::{ItemId, ItemQuery, QueryTab};

use super::output;
use super::{Commands, Toggle};
use crate::bootstrap::AppRuntime;

pub async fn run_command(runtime: &AppRuntime, command: Commands) -> Result<()> {
    let uc = runtime.usecases();

    match command {
        Commands::Watch => run_watch(runtime).await?,
        Commands::Add { text } => match runtime.clipboard_monitor().add_item(&text).await? {
            Some(outcome) if outcome.promoted => println!("moved {} to the top", outcome.item.id),
            Some(outcome) => println!("added {}", outcome.item.id),
            None => println!("nothing to add"),
        },
        Commands::List {
            search,
            sort,
            pinned,
        } => {
            let mut query = ItemQuery::new().with_sort(sort);
            if let Some(search) = search {
                query = query.with_search(search);
            }
            if pinned {
                query = query.with_tab(QueryTab::Pinned);
            }
            let page = uc.list_clipboard_items().execute(&query).await?;
            print_lines(output::page_lines(&page));
        }
        Commands::Delete { id } => {
            let removed = uc.delete_clipboard_item().execute(&ItemId::from(id.as_str())).await?;
            report(removed, "deleted", &id);
        }
        Commands::Clear => {
            let removed = uc.clear_clipboard_items().execute().await?;
            println!("removed {removed} item(s)");
        }
        Commands::Pin { id } => {
            let changed = uc
                .set_item_pinned()
                .execute(&ItemId::from(id.as_str()), true)
                .await?;
            report(changed, "pinned", &id);
        }
        Commands::Unpin { id } => {
            let changed = uc
                .set_item_pinned()
                .execute(&ItemId::from(id.as_str()), false)
                .await?;
            report(changed, "unpinned", &id);
        }
        Commands::Tag { id, tag } => {
            let added = uc
                .add_item_tag()
                .execute(&ItemId::from(id.as_str()), &tag)
                .await?;
            report(added, "tagged", &id);
        }
        Commands::Untag { id, tag } => {
            let removed = uc
                .remove_item_tag()
                .execute(&ItemId::from(id.as_str()), &tag)
                .await?;
            report(removed, "untagged", &id);
        }
        Commands::Tags => {
            let tags = uc.list_tags().execute().await?;
            if tags.is_empty() {
                println!("no tags");
            }
            for tag in tags {
                println!("{tag}");
            }
        }
        Commands::Translate { id, langs } => {
            let outcome = uc
                .translate_clipboard_item()
                .execute(&ItemId::from(id.as_str()), &langs)
                .await?;
            print_lines(output::translation_lines(&outcome));
        }
        Commands::Export { format, id, out } => {
            let item_id = id.as_deref().map(ItemId::from);
            let exported = uc
                .export_clipboard_items()
                .execute(format, item_id.as_ref())
                .await?;
            match out {
                Some(dir) => {
                    let path = write_export(&dir, &exported.file_name, &exported.content)?;
                    println!("exported {} item(s) to {}", exported.count, path.display());
                }
                None => print!("{}", exported.content),
            }
        }
        Commands::Cleanup => {
            let removed = uc.apply_retention_policy().execute().await?;
            println!("removed {} expired item(s)", removed.len());
        }
        Commands::Copy { id } => {
            let item = uc
                .copy_item_to_clipboard()
                .execute(&ItemId::from(id.as_str()))
                .await?;
            println!("copied {}", item.id);
        }
        Commands::CopyLast => {
            let item = uc.copy_item_to_clipboard().execute_latest().await?;
            println!("copied {}", item.id);
        }
        Commands::Settings {
            auto_delete,
            theme,
            langs,
        } => {
            let mut settings = uc.get_settings().execute().await?;
            let changing = auto_delete.is_some() || theme.is_some() || langs.is_some();
            if let Some(window) = auto_delete {
                settings.auto_delete = window;
            }
            if let Some(theme) = theme {
                settings.theme = theme.into();
            }
            if let Some(langs) = langs {
                settings.translation_langs = langs;
            }
            if changing {
                uc.update_settings().execute(settings.clone()).await?;
            }
            print_lines(output::settings_lines(&settings));
        }
        Commands::Premium { state } => {
            let premium = matches!(state, Toggle::On);
            runtime.license_flag().set_premium(premium).await?;
            println!("premium {}", if premium { "enabled" } else { "disabled" });
        }
    }

    Ok(())
}

/// Run the monitor and the maintenance scheduler until Ctrl+C.
async fn run_watch(runtime: &AppRuntime) -> Result<()> {
    let shutdown = CancellationToken::new();
    let monitor = runtime.clipboard_monitor();
    let scheduler = runtime.maintenance_scheduler();
    let mut events = runtime.subscribe_events();

    println!("watching the clipboard, stop with Ctrl+C");

    let badge = {
        let shutdown = shutdown.clone();
        async move {
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    event = events.recv() => match event {
                        Ok(event) => info!(event = ?event, "store changed"),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "store event subscriber lagged");
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        }
    };

    let stop = {
        let shutdown = shutdown.clone();
        async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "failed to listen for Ctrl+C");
            }
            info!("shutdown requested");
            shutdown.cancel();
        }
    };

    tokio::join!(
        monitor.run(shutdown.clone()),
        scheduler.run(shutdown.clone()),
        badge,
        stop,
    );
    Ok(())
}

fn write_export(dir: &Path, file_name: &str, content: &str) -> Result<std::path::PathBuf> {
    if !dir.is_dir() {
        bail!("output directory does not exist: {}", dir.display());
    }
    let path = dir.join(file_name);
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    Ok(path)
}

fn report(changed: bool, verb: &str, id: &str) {
    if changed {
        println!("{verb} {id}");
    } else {
        println!("no change for {id}");
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
