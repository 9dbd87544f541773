use std::path::PathBuf;

use thiserror::Error;

use crate::consts::MAX_INTERVAL_SECS;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(
        "Invalid update interval \"{input}\" (expected whole seconds from 1 to {max})",
        max = MAX_INTERVAL_SECS
    )]
    InvalidInterval { input: String },

    #[error("Invalid date format \"{input}\" (double quotes and line breaks are not allowed)")]
    InvalidFormat { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("No note matches \"{query}\"")]
    NoMatchingNote { query: String },

    #[error("{message}")]
    UpdateFailed { message: String },

    #[error("{0}")]
    Settings(#[from] SettingsError),
}

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error("No settings location available (home directory not found)")]
    NoLocation,

    #[error("Failed to read settings {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write settings {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}
