//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;

use super::commands::Commands;

#[derive(Debug, Parser)]
#[command(name = "todaystamp")]
#[command(
    about = "Keep a `today:` timestamp fresh in a note's frontmatter",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Vault directory containing the notes
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub(crate) vault: PathBuf,

    /// Settings file (default: ~/.config/todaystamp/settings.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub(crate) settings: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    pub(crate) fn selected_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }

    pub(crate) fn log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}
