//! Persisted library.
//!
//! Every mutation runs against a clone of the bundle. The clone is
//! normalized and saved, and only a successful save replaces the
//! in-memory bundle, so a failed lookup or write changes nothing.

use super::catalog;
use super::prompts::{self, normalize};
use super::search::{SearchQuery, search};
use super::stamps::{StampSource, SystemStamps};
use super::types::{Category, LibraryBundle, NewPrompt, PromptLibraryItem, PromptUpdate, Tag};
use crate::diff::DiffLine;
use crate::error::{ForgeError, Result};
use crate::storage::{LIBRARY_DOCUMENT, StorageBackend, load_document, save_document};

pub struct LibraryStore<S: StorageBackend> {
    storage: S,
    bundle: LibraryBundle,
    stamps: Box<dyn StampSource>,
}

impl<S: StorageBackend> LibraryStore<S> {
    /// Open the library, starting empty if nothing was saved yet.
    ///
    /// A stored library that fails to decode is a `DecodeError` and is
    /// never replaced by an empty one.
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with_stamps(storage, Box::new(SystemStamps))
    }

    pub fn open_with_stamps(storage: S, stamps: Box<dyn StampSource>) -> Result<Self> {
        let bundle = Self::read(&storage)?;
        Ok(Self {
            storage,
            bundle,
            stamps,
        })
    }

    fn read(storage: &S) -> Result<LibraryBundle> {
        let mut bundle: LibraryBundle =
            load_document(storage, LIBRARY_DOCUMENT)?.unwrap_or_default();
        normalize(&mut bundle);
        tracing::debug!(
            categories = bundle.categories.len(),
            tags = bundle.tags.len(),
            prompts = bundle.prompts.len(),
            "library loaded"
        );
        Ok(bundle)
    }

    /// Re-read the stored library, discarding the in-memory copy.
    pub fn reload(&mut self) -> Result<()> {
        self.bundle = Self::read(&self.storage)?;
        Ok(())
    }

    pub fn bundle(&self) -> &LibraryBundle {
        &self.bundle
    }

    pub fn categories(&self) -> &[Category] {
        &self.bundle.categories
    }

    pub fn tags(&self) -> &[Tag] {
        &self.bundle.tags
    }

    pub fn prompts(&self) -> &[PromptLibraryItem] {
        &self.bundle.prompts
    }

    pub fn prompt(&self, id: &str) -> Result<&PromptLibraryItem> {
        self.bundle
            .prompt(id)
            .ok_or_else(|| ForgeError::not_found("prompt", id))
    }

    pub fn search(&self, query: &SearchQuery) -> Vec<&PromptLibraryItem> {
        search(&self.bundle, query)
    }

    pub fn diff_versions(&self, id: &str, from: &str, to: Option<&str>) -> Result<Vec<DiffLine>> {
        prompts::diff_versions(self.prompt(id)?, from, to)
    }

    fn apply<T>(
        &mut self,
        action: &str,
        change: impl FnOnce(&mut LibraryBundle, &mut dyn StampSource) -> Result<T>,
    ) -> Result<T> {
        let mut next = self.bundle.clone();
        let out = change(&mut next, self.stamps.as_mut())?;
        normalize(&mut next);
        save_document(&self.storage, LIBRARY_DOCUMENT, &next)?;
        self.bundle = next;
        tracing::info!(action, "library saved");
        Ok(out)
    }

    pub fn add_category(&mut self, name: &str) -> Result<Category> {
        self.apply("add_category", |b, s| catalog::add_category(b, name, s))
    }

    pub fn rename_category(&mut self, id: &str, name: &str) -> Result<Category> {
        self.apply("rename_category", |b, _| catalog::rename_category(b, id, name))
    }

    pub fn delete_category(&mut self, id: &str) -> Result<usize> {
        self.apply("delete_category", |b, _| catalog::delete_category(b, id))
    }

    pub fn add_tag(&mut self, name: &str) -> Result<Tag> {
        self.apply("add_tag", |b, s| catalog::add_tag(b, name, s))
    }

    pub fn rename_tag(&mut self, id: &str, name: &str) -> Result<Tag> {
        self.apply("rename_tag", |b, _| catalog::rename_tag(b, id, name))
    }

    pub fn delete_tag(&mut self, id: &str) -> Result<usize> {
        self.apply("delete_tag", |b, _| catalog::delete_tag(b, id))
    }

    pub fn add_prompt(&mut self, new: NewPrompt) -> Result<PromptLibraryItem> {
        self.apply("add_prompt", |b, s| prompts::add_prompt(b, new, s))
    }

    pub fn update_prompt(&mut self, id: &str, update: PromptUpdate) -> Result<PromptLibraryItem> {
        let mut item = self.apply("update_prompt", |b, s| prompts::update_prompt(b, id, update, s))?;
        item.versions.truncate(prompts::MAX_VERSIONS);
        Ok(item)
    }

    pub fn delete_prompt(&mut self, id: &str) -> Result<PromptLibraryItem> {
        self.apply("delete_prompt", |b, _| prompts::delete_prompt(b, id))
    }

    pub fn rollback_prompt(&mut self, id: &str, version_id: &str) -> Result<PromptLibraryItem> {
        let mut item = self.apply("rollback_prompt", |b, s| {
            prompts::rollback_prompt(b, id, version_id, s)
        })?;
        item.versions.truncate(prompts::MAX_VERSIONS);
        Ok(item)
    }
}
