/// Default timestamp pattern (moment.js tokens): "2025-01-15 09:30:00"
pub(crate) const DEFAULT_FORMAT: &str = "YYYY-MM-DD HH:mm:ss";

/// Default seconds between two updates
pub(crate) const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Longest accepted interval; the timer deadline must stay representable
pub(crate) const MAX_INTERVAL_SECS: u64 = u32::MAX as u64;

/// Directory and file names used for persisted settings
pub(crate) const APP_DIR: &str = "todaystamp";
pub(crate) const SETTINGS_FILE: &str = "settings.toml";
pub(crate) const HOME_SETTINGS_FILE: &str = ".todaystamp.toml";

/// Extension of the notes offered by the picker
pub(crate) const NOTE_EXTENSION: &str = "md";
