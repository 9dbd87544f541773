use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::{DocumentHandle, DocumentStore};
use crate::consts::NOTE_EXTENSION;
use crate::error::StoreError;

/// Notes stored as files below a root directory
#[derive(Debug, Clone)]
pub(crate) struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Join a vault-relative path onto the root. Absolute paths and `..`
    /// components are rejected so lookups never leave the vault.
    fn location_of(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let mut location = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => location.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        (location != self.root).then_some(location)
    }

    fn relative_path(&self, location: &Path) -> Option<String> {
        let relative = location.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

fn is_hidden(relative: &str) -> bool {
    relative.split('/').any(|part| part.starts_with('.'))
}

impl DocumentStore for FsVault {
    fn resolve(&self, path: &str) -> Option<DocumentHandle> {
        let location = self.location_of(path.trim())?;
        let meta = fs::metadata(&location).ok()?;
        if !meta.is_file() {
            return None;
        }
        let path = self.relative_path(&location)?;
        Some(DocumentHandle { path, location })
    }

    fn read_text(&self, doc: &DocumentHandle) -> Result<String, StoreError> {
        fs::read_to_string(&doc.location).map_err(|source| StoreError::Read {
            path: doc.path.clone(),
            source,
        })
    }

    fn write_text(&self, doc: &DocumentHandle, text: &str) -> Result<(), StoreError> {
        fs::write(&doc.location, text).map_err(|source| StoreError::Write {
            path: doc.path.clone(),
            source,
        })
    }

    fn list_documents(&self) -> Vec<DocumentHandle> {
        let pattern = format!(
            "{}/**/*.{NOTE_EXTENSION}",
            glob::Pattern::escape(&self.root.to_string_lossy())
        );
        let Ok(paths) = glob::glob(&pattern) else {
            debug!(root = %self.root.display(), "vault root is not a valid glob prefix");
            return Vec::new();
        };

        let mut docs: Vec<DocumentHandle> = paths
            .filter_map(Result::ok)
            .filter(|location| location.is_file())
            .filter_map(|location| {
                let path = self.relative_path(&location)?;
                (!is_hidden(&path)).then_some(DocumentHandle { path, location })
            })
            .collect();
        docs.sort_by(|a, b| a.path.cmp(&b.path));
        docs
    }
}
