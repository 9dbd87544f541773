use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::consts::{
    APP_DIR, DEFAULT_FORMAT, DEFAULT_INTERVAL_SECS, HOME_SETTINGS_FILE, MAX_INTERVAL_SECS,
    SETTINGS_FILE,
};
use crate::error::{AppError, SettingsError};

/// Persisted configuration
///
/// Missing keys fall back to [`Settings::default`], so a stored file only
/// needs the values the user changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Settings {
    /// Vault-relative path of the managed note, empty when unset
    pub(crate) note_path: String,
    /// moment.js-style pattern for the timestamp
    pub(crate) format: String,
    #[serde(alias = "updateInterval")]
    pub(crate) update_interval_seconds: u64,
    /// IANA zone name; local time when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) timezone: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            note_path: String::new(),
            format: DEFAULT_FORMAT.to_string(),
            update_interval_seconds: DEFAULT_INTERVAL_SECS,
            timezone: None,
        }
    }
}

impl Settings {
    pub(crate) fn has_note(&self) -> bool {
        !self.note_path.is_empty()
    }

    /// Replace stored values that cannot be used with their defaults
    fn sanitized(mut self, origin: &Path) -> Self {
        if !(1..=MAX_INTERVAL_SECS).contains(&self.update_interval_seconds) {
            warn!(
                path = %origin.display(),
                stored = self.update_interval_seconds,
                "stored update interval is out of range, using {DEFAULT_INTERVAL_SECS}s"
            );
            self.update_interval_seconds = DEFAULT_INTERVAL_SECS;
        }
        match validate_format(&self.format) {
            Ok(format) if format == self.format => {}
            Ok(format) => {
                warn!(path = %origin.display(), "stored format is blank, using default");
                self.format = format;
            }
            Err(e) => {
                warn!(path = %origin.display(), "{e}, using default");
                self.format = DEFAULT_FORMAT.to_string();
            }
        }
        self
    }
}

/// Pattern to store for `pattern`. Blank means the default; quotes and line
/// breaks would break the `today: "..."` line.
pub(crate) fn validate_format(pattern: &str) -> Result<String, AppError> {
    if pattern.trim().is_empty() {
        Ok(DEFAULT_FORMAT.to_string())
    } else if pattern.contains(['"', '\n', '\r']) {
        Err(AppError::InvalidFormat {
            input: pattern.to_string(),
        })
    } else {
        Ok(pattern.to_string())
    }
}

/// Location of the persisted settings
#[derive(Debug, Clone)]
pub(crate) struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub(crate) fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `explicit` when given, else the first existing default location,
    /// else the first candidate (created on first save)
    pub(crate) fn locate(explicit: Option<PathBuf>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Ok(Self::at(path));
        }
        let candidates = Self::candidate_paths();
        let path = candidates
            .iter()
            .find(|p| p.exists())
            .or_else(|| candidates.first())
            .cloned()
            .ok_or(SettingsError::NoLocation)?;
        Ok(Self::at(path))
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/todaystamp/settings.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join(APP_DIR).join(SETTINGS_FILE));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join(APP_DIR).join(SETTINGS_FILE);
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.todaystamp.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(HOME_SETTINGS_FILE));
        }

        paths
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Stored values merged over defaults. Unreadable or invalid files are
    /// reported and replaced by defaults.
    pub(crate) fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => {
                debug!(path = %self.path.display(), "loaded settings");
                settings.sanitized(&self.path)
            }
            Ok(None) => Settings::default(),
            Err(e) => {
                warn!("{e}; using defaults");
                Settings::default()
            }
        }
    }

    fn try_load(&self) -> Result<Option<Settings>, SettingsError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|source| SettingsError::Read {
            path: self.path.clone(),
            source,
        })?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| SettingsError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    pub(crate) fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let content = toml::to_string(settings)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, content).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
