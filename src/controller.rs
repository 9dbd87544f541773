//! Owner of the live configuration
//!
//! Every setter builds a new [`Settings`] value, persists it, and only then
//! publishes it to the updater. Interval changes restart a running timer.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::config::{Settings, SettingsFile, validate_format};
use crate::consts::MAX_INTERVAL_SECS;
use crate::error::AppError;
use crate::scheduler::{NoteUpdater, Scheduler, SchedulerState, TickOutcome};
use crate::utils::Timezone;
use crate::vault::{DocumentHandle, DocumentStore, filter_documents};

/// Result of choosing a note through the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PickResult {
    Selected(String),
    /// More than one note matched; nothing was changed
    Ambiguous(Vec<String>),
}

pub(crate) struct Controller {
    settings: watch::Sender<Settings>,
    file: SettingsFile,
    scheduler: Scheduler,
}

impl Controller {
    pub(crate) fn new(settings: Settings, file: SettingsFile, store: Arc<dyn DocumentStore>) -> Self {
        let (tx, rx) = watch::channel(settings);
        let updater = Arc::new(NoteUpdater::new(store, rx));
        Self {
            settings: tx,
            file,
            scheduler: Scheduler::new(updater),
        }
    }

    pub(crate) fn configuration(&self) -> Settings {
        self.settings.borrow().clone()
    }

    pub(crate) fn settings_file(&self) -> &SettingsFile {
        &self.file
    }

    pub(crate) fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Start ticking at the configured interval
    pub(crate) fn start(&mut self) {
        let interval = self.settings.borrow().update_interval_seconds;
        self.scheduler.start(interval);
    }

    pub(crate) fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub(crate) async fn shutdown(&mut self) {
        self.scheduler.shutdown().await;
    }

    /// Run one update cycle immediately
    pub(crate) fn tick_now(&self) -> TickOutcome {
        self.scheduler.updater().on_tick()
    }

    pub(crate) fn set_note_path(&mut self, path: &str) -> Result<(), AppError> {
        let note_path = path.trim().to_string();
        self.replace(|s| s.note_path = note_path)?;
        info!(path = %self.settings.borrow().note_path, "note path set");
        Ok(())
    }

    /// Blank patterns reset to the default
    pub(crate) fn set_format(&mut self, pattern: &str) -> Result<(), AppError> {
        let format = validate_format(pattern)?;
        self.replace(|s| s.format = format)
    }

    /// Accepts whole seconds from 1 to [`MAX_INTERVAL_SECS`]. Anything else
    /// leaves the configuration untouched and persists nothing. A running
    /// timer restarts only when the value changes.
    pub(crate) fn set_interval(&mut self, raw: &str) -> Result<(), AppError> {
        let secs = parse_interval(raw)?;
        let unchanged = self.settings.borrow().update_interval_seconds == secs;
        self.replace(|s| s.update_interval_seconds = secs)?;
        if self.scheduler.is_running() && !unchanged {
            self.scheduler.start(secs);
        }
        Ok(())
    }

    pub(crate) fn set_timezone(&mut self, raw: &str) -> Result<(), AppError> {
        let timezone = Timezone::parse(Some(raw))?.setting_value();
        self.replace(|s| s.timezone = timezone)
    }

    pub(crate) fn documents(&self, query: &str) -> Vec<DocumentHandle> {
        let store = self.scheduler.updater().store();
        filter_documents(store.list_documents(), query)
    }

    /// Select the note matching `query`. An exact path wins; otherwise the
    /// query must match exactly one note.
    pub(crate) fn pick(&mut self, query: &str) -> Result<PickResult, AppError> {
        let matches = self.documents(query);
        let wanted = query.trim();
        let chosen = match matches.iter().find(|doc| doc.path == wanted) {
            Some(exact) => exact.path.clone(),
            None => match matches.as_slice() {
                [] => {
                    return Err(AppError::NoMatchingNote {
                        query: wanted.to_string(),
                    });
                }
                [only] => only.path.clone(),
                many => {
                    return Ok(PickResult::Ambiguous(
                        many.iter().map(|doc| doc.path.clone()).collect(),
                    ));
                }
            },
        };
        self.set_note_path(&chosen)?;
        Ok(PickResult::Selected(chosen))
    }

    /// Persist the edited copy, then publish it
    fn replace(&mut self, edit: impl FnOnce(&mut Settings)) -> Result<(), AppError> {
        let mut next = self.configuration();
        edit(&mut next);
        if next == *self.settings.borrow() {
            return Ok(());
        }
        self.file.save(&next)?;
        self.settings.send_replace(next);
        Ok(())
    }
}

pub(crate) fn parse_interval(raw: &str) -> Result<u64, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if (1..=MAX_INTERVAL_SECS).contains(&secs) => Ok(secs),
        _ => Err(AppError::InvalidInterval {
            input: raw.to_string(),
        }),
    }
}
