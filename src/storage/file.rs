//! Directory-backed storage: one `<name>.json` file per document.

use super::StorageBackend;
use crate::error::{ForgeError, Result};
use crate::fs::atomic_write_file;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `name`.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, name: &str) -> Result<Option<String>> {
        let path = self.document_path(name);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ForgeError::StorageError(format!(
                "failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn save(&self, name: &str, value: &str) -> Result<()> {
        atomic_write_file(self.document_path(name), value)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.document_path(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ForgeError::StorageError(format!(
                "failed to delete '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}
