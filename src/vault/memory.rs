//! In-memory store for tests: counts calls and can be told to fail

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{DocumentHandle, DocumentStore};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub(crate) struct MemoryVault {
    notes: Mutex<BTreeMap<String, String>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_io: AtomicBool,
}

impl MemoryVault {
    pub(crate) fn with_note(path: &str, content: &str) -> Self {
        let vault = Self::default();
        vault.put(path, content);
        vault
    }

    pub(crate) fn put(&self, path: &str, content: &str) {
        self.notes
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
    }

    pub(crate) fn content(&self, path: &str) -> Option<String> {
        self.notes.lock().unwrap().get(path).cloned()
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn set_failing(&self, fail: bool) {
        self.fail_io.store(fail, Ordering::SeqCst);
    }

    fn injected(&self) -> Option<std::io::Error> {
        self.fail_io
            .load(Ordering::SeqCst)
            .then(|| std::io::Error::other("injected failure"))
    }
}

impl DocumentStore for MemoryVault {
    fn resolve(&self, path: &str) -> Option<DocumentHandle> {
        self.notes
            .lock()
            .unwrap()
            .contains_key(path)
            .then(|| DocumentHandle {
                path: path.to_string(),
                location: PathBuf::from(path),
            })
    }

    fn read_text(&self, doc: &DocumentHandle) -> Result<String, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(source) = self.injected() {
            return Err(StoreError::Read {
                path: doc.path.clone(),
                source,
            });
        }
        Ok(self.content(&doc.path).unwrap_or_default())
    }

    fn write_text(&self, doc: &DocumentHandle, text: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(source) = self.injected() {
            return Err(StoreError::Write {
                path: doc.path.clone(),
                source,
            });
        }
        self.put(&doc.path, text);
        Ok(())
    }

    fn list_documents(&self) -> Vec<DocumentHandle> {
        self.notes
            .lock()
            .unwrap()
            .keys()
            .map(|path| DocumentHandle {
                path: path.clone(),
                location: PathBuf::from(path),
            })
            .collect()
    }
}
