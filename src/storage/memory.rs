//! In-process storage for tests and embedding.

use super::StorageBackend;
use crate::error::{ForgeError, Result};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Clones share the same documents, so a store can be reopened over the
/// same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    documents: Rc<RefCell<BTreeMap<String, String>>>,
    fail_saves: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent save fail until switched off again.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Raw stored text, bypassing decoding.
    pub fn raw(&self, name: &str) -> Option<String> {
        self.documents.borrow().get(name).cloned()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, name: &str) -> Result<Option<String>> {
        Ok(self.raw(name))
    }

    fn save(&self, name: &str, value: &str) -> Result<()> {
        if self.fail_saves.get() {
            return Err(ForgeError::StorageError(format!(
                "save of '{}' rejected",
                name
            )));
        }
        self.documents
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<()> {
        self.documents.borrow_mut().remove(name);
        Ok(())
    }
}
