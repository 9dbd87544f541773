//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Commands {
    /// Keep the note updated and accept commands on stdin (default)
    Run,
    /// Update the note once and exit
    Tick,
    /// Show the current settings
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Set the note to update (vault-relative path, "" clears)
    SetNote { path: String },
    /// Choose the note by a case-insensitive part of its path
    Pick { query: String },
    /// List the notes in the vault
    List {
        /// Only notes whose path contains this text
        query: Option<String>,
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Set the date pattern (moment.js tokens, e.g. "YYYY-MM-DD HH:mm:ss")
    SetFormat { pattern: String },
    /// Set the update interval in whole seconds (1 to 4294967295)
    SetInterval {
        #[arg(allow_hyphen_values = true)]
        seconds: String,
    },
    /// Set the timezone ("local", "UTC" or an IANA name)
    SetTimezone { timezone: String },
    /// Render a date pattern for the current time
    Preview {
        /// Pattern to render; the configured one when omitted
        pattern: Option<String>,
    },
}
