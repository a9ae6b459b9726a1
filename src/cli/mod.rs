//! Command-line surface.
//! 命令行入口。

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use cs_core::settings::Theme;
use cs_core::{ExportFormat, RetentionWindow, SortOrder};

pub use commands::run_command;

#[derive(Parser)]
#[command(name = "clipsmart")]
#[command(about = "Clipboard history with pins, tags and translations", long_about = None)]
pub struct Cli {
    /// Config file (TOML). Defaults to the platform config dir when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watch the clipboard and run maintenance until Ctrl+C
    Watch,
    /// Store text as if it had been copied
    Add { text: String },
    /// List stored items
    List {
        /// Case-insensitive text or tag search
        #[arg(short, long)]
        search: Option<String>,
        /// newest | oldest | az | za | longest | shortest
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
        /// Only pinned items
        #[arg(long)]
        pinned: bool,
    },
    /// Delete one item
    Delete { id: String },
    /// Delete every item, pinned ones included
    Clear,
    /// Pin an item so it survives trimming and cleanup
    Pin { id: String },
    /// Unpin an item
    Unpin { id: String },
    /// Add a tag to an item
    Tag { id: String, tag: String },
    /// Remove a tag from an item
    Untag { id: String, tag: String },
    /// List every tag in use
    Tags,
    /// Translate an item
    Translate {
        id: String,
        /// Target language; repeat for several. Defaults to the configured languages
        #[arg(short, long = "lang")]
        langs: Vec<String>,
    },
    /// Export items (premium)
    Export {
        /// csv | jsonl
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
        /// Export a single item
        #[arg(long)]
        id: Option<String>,
        /// Output directory; prints to stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Apply the retention policy now
    Cleanup,
    /// Copy an item back to the clipboard
    Copy { id: String },
    /// Copy the most recent item back to the clipboard
    CopyLast,
    /// Show or change settings
    Settings {
        /// never | 1 | 7 | 30 (days)
        #[arg(long)]
        auto_delete: Option<RetentionWindow>,
        #[arg(long)]
        theme: Option<ThemeArg>,
        /// Comma separated language codes, e.g. de,es,fr
        #[arg(long, value_delimiter = ',')]
        langs: Option<Vec<String>>,
    },
    /// Switch the premium flag
    Premium { state: Toggle },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Auto,
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Auto => Theme::Auto,
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}
