//! Persistence backends for named JSON documents.
//!
//! The library bundle, templates and history each live in one named
//! document. Backends only move strings; encoding and decoding happen in
//! [`load_document`] and [`save_document`] so every store treats an
//! unreadable document the same way.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::{ForgeError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Document holding categories, tags and prompts.
pub const LIBRARY_DOCUMENT: &str = "library";

/// Document holding saved templates.
pub const TEMPLATES_DOCUMENT: &str = "templates";

/// Document holding recent forge runs.
pub const HISTORY_DOCUMENT: &str = "history";

/// A place named documents are loaded from and saved to.
pub trait StorageBackend {
    /// Returns `Ok(None)` when the document has never been saved.
    fn load(&self, name: &str) -> Result<Option<String>>;

    fn save(&self, name: &str, value: &str) -> Result<()>;

    /// Deleting a missing document is not an error.
    fn delete(&self, name: &str) -> Result<()>;
}

/// Load and decode a document.
///
/// A document that exists but does not decode is a `DecodeError`; the
/// stored bytes are not touched.
pub fn load_document<T, S>(backend: &S, name: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: StorageBackend + ?Sized,
{
    let Some(raw) = backend.load(name)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw).map(Some).map_err(|e| {
        tracing::warn!(document = name, error = %e, "stored document failed to decode");
        ForgeError::DecodeError {
            name: name.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Encode and save a document as pretty JSON.
pub fn save_document<T, S>(backend: &S, name: &str, value: &T) -> Result<()>
where
    T: Serialize,
    S: StorageBackend + ?Sized,
{
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        ForgeError::StorageError(format!("failed to encode document '{}': {}", name, e))
    })?;
    backend.save(name, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_missing_document_is_none() {
        let storage = MemoryStorage::new();
        let loaded: Option<Vec<String>> = load_document(&storage, "nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_document_round_trip() {
        let storage = MemoryStorage::new();
        let mut value = BTreeMap::new();
        value.insert("a".to_string(), vec![1, 2]);

        save_document(&storage, "doc", &value).unwrap();
        let loaded: BTreeMap<String, Vec<i32>> = load_document(&storage, "doc").unwrap().unwrap();

        assert_eq!(loaded, value);
    }

    #[test]
    fn test_undecodable_document_is_decode_error_and_untouched() {
        let storage = MemoryStorage::new();
        storage.save("doc", "{not json").unwrap();

        let err = load_document::<Vec<String>, _>(&storage, "doc").unwrap_err();

        assert!(matches!(err, ForgeError::DecodeError { ref name, .. } if name == "doc"));
        assert_eq!(storage.load("doc").unwrap().as_deref(), Some("{not json"));
    }
}
