//! One read → format → transform → write cycle

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::StoreError;
use crate::frontmatter::update_frontmatter;
use crate::utils::{Timezone, format_moment};
use crate::vault::{DocumentHandle, DocumentStore};

/// What a single tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    /// No note path configured
    NotConfigured,
    /// The configured path does not point at a note right now
    Unresolved { path: String },
    Updated { path: String, timestamp: String },
    /// Read or write failed; the next tick retries
    Failed { path: String, error: String },
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickOutcome::NotConfigured => write!(f, "No note configured"),
            TickOutcome::Unresolved { path } => write!(f, "Note not found: {path}"),
            TickOutcome::Updated { path, timestamp } => {
                write!(f, "Updated {path}: today: \"{timestamp}\"")
            }
            TickOutcome::Failed { path, error } => write!(f, "Failed to update {path}: {error}"),
        }
    }
}

/// Rewrites the configured note's `today:` field
pub(crate) struct NoteUpdater {
    store: Arc<dyn DocumentStore>,
    settings: watch::Receiver<Settings>,
}

impl NoteUpdater {
    pub(crate) fn new(store: Arc<dyn DocumentStore>, settings: watch::Receiver<Settings>) -> Self {
        Self { store, settings }
    }

    pub(crate) fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Run one cycle against the current settings. Never fails: errors are
    /// logged and reported in the outcome.
    pub(crate) fn on_tick(&self) -> TickOutcome {
        let settings = self.settings.borrow().clone();
        let timezone = Timezone::parse(settings.timezone.as_deref()).unwrap_or_else(|e| {
            warn!("{e}; using local time");
            Timezone::Local
        });
        self.update_at(&settings, &timezone.now())
    }

    pub(crate) fn update_at(&self, settings: &Settings, now: &DateTime<FixedOffset>) -> TickOutcome {
        if !settings.has_note() {
            debug!("no note configured, skipping tick");
            return TickOutcome::NotConfigured;
        }

        let Some(doc) = self.store.resolve(&settings.note_path) else {
            debug!(path = %settings.note_path, "note not found, skipping tick");
            return TickOutcome::Unresolved {
                path: settings.note_path.clone(),
            };
        };

        match self.rewrite(&doc, &settings.format, now) {
            Ok(timestamp) => {
                debug!(path = %doc.path, %timestamp, "updated note");
                TickOutcome::Updated {
                    path: doc.path,
                    timestamp,
                }
            }
            Err(e) => {
                warn!(path = %doc.path, error = %e, "error updating timestamp");
                TickOutcome::Failed {
                    path: doc.path,
                    error: e.to_string(),
                }
            }
        }
    }

    fn rewrite(
        &self,
        doc: &DocumentHandle,
        format: &str,
        now: &DateTime<FixedOffset>,
    ) -> Result<String, StoreError> {
        let content = self.store.read_text(doc)?;
        let timestamp = format_moment(now, format);
        let updated = update_frontmatter(&content, &timestamp);
        self.store.write_text(doc, &updated)?;
        Ok(timestamp)
    }
}
