//! Document store abstraction
//!
//! The updater only needs whole-document reads and writes addressed by a
//! vault-relative path. [`FsVault`] backs this with a directory of markdown
//! notes.

pub(crate) mod fs;
#[cfg(test)]
pub(crate) mod memory;

use std::path::PathBuf;

use crate::error::StoreError;

pub(crate) use fs::FsVault;

/// A resolved note inside the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentHandle {
    /// Vault-relative path with `/` separators
    pub(crate) path: String,
    /// Location on disk (unused by in-memory stores)
    pub(crate) location: PathBuf,
}

/// Host document store, implemented per storage backend
pub(crate) trait DocumentStore: Send + Sync {
    /// Look up a note; `None` if it is missing or not a regular document
    fn resolve(&self, path: &str) -> Option<DocumentHandle>;

    fn read_text(&self, doc: &DocumentHandle) -> Result<String, StoreError>;

    /// Replace the whole content of `doc`
    fn write_text(&self, doc: &DocumentHandle, text: &str) -> Result<(), StoreError>;

    /// All notes the picker may offer, sorted by path
    fn list_documents(&self) -> Vec<DocumentHandle>;
}

/// Case-insensitive substring match used by the note picker
pub(crate) fn filter_documents(docs: Vec<DocumentHandle>, query: &str) -> Vec<DocumentHandle> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return docs;
    }
    docs.into_iter()
        .filter(|doc| doc.path.to_lowercase().contains(&needle))
        .collect()
}
