//! Recent forge runs.
//!
//! The `history` document is a JSON list, newest first, holding at most
//! [`MAX_HISTORY`] entries. Recording follows the same clone, save,
//! commit sequence as the library stores.

use crate::error::Result;
use crate::forge::{ForgeOutput, ForgeSession};
use crate::library::{StampSource, SystemStamps};
use crate::prompt::{EnhancementOptions, PromptTarget};
use crate::storage::{HISTORY_DOCUMENT, StorageBackend, load_document, save_document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Entries kept in the log.
pub const MAX_HISTORY: usize = 50;

/// One recorded forge run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub target: PromptTarget,
    pub original_input: String,
    pub generated_prompt: String,
    #[serde(default)]
    pub options: EnhancementOptions,
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

pub struct HistoryLog<S: StorageBackend> {
    storage: S,
    entries: Vec<HistoryEntry>,
    stamps: Box<dyn StampSource>,
}

impl<S: StorageBackend> HistoryLog<S> {
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with_stamps(storage, Box::new(SystemStamps))
    }

    pub fn open_with_stamps(storage: S, stamps: Box<dyn StampSource>) -> Result<Self> {
        let mut entries: Vec<HistoryEntry> =
            load_document(&storage, HISTORY_DOCUMENT)?.unwrap_or_default();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(MAX_HISTORY);
        Ok(Self {
            storage,
            entries,
            stamps,
        })
    }

    /// Newest first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Raw inputs of past runs, newest first.
    pub fn inputs(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.original_input.as_str())
            .collect()
    }

    /// Record a forge run, dropping the oldest entries past the cap.
    pub fn record(
        &mut self,
        session: &ForgeSession,
        raw: &str,
        output: &ForgeOutput,
    ) -> Result<HistoryEntry> {
        let stamp = self.stamps.next();
        let entry = HistoryEntry {
            id: stamp.id,
            timestamp: stamp.at,
            target: session.target,
            original_input: raw.to_string(),
            generated_prompt: output.prompt.clone(),
            options: session.options,
            variables: session.variables.clone(),
        };

        let mut next = Vec::with_capacity(MAX_HISTORY);
        next.push(entry.clone());
        next.extend(self.entries.iter().take(MAX_HISTORY - 1).cloned());
        save_document(&self.storage, HISTORY_DOCUMENT, &next)?;
        self.entries = next;

        tracing::info!(entries = self.entries.len(), "history recorded");
        Ok(entry)
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.entries.len();
        self.storage.delete(HISTORY_DOCUMENT)?;
        self.entries.clear();
        tracing::info!(removed, "history cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForgeError;
    use crate::forge::forge;
    use crate::library::SequentialStamps;
    use crate::storage::MemoryStorage;

    fn open(storage: &MemoryStorage) -> HistoryLog<MemoryStorage> {
        HistoryLog::open_with_stamps(storage.clone(), Box::new(SequentialStamps::new("h")))
            .unwrap()
    }

    fn run(log: &mut HistoryLog<MemoryStorage>, raw: &str) -> HistoryEntry {
        let session = ForgeSession::new(PromptTarget::ChatGpt).with_variable("name", "Ada");
        let output = forge(&session, raw);
        log.record(&session, raw, &output).unwrap()
    }

    #[test]
    fn test_record_stores_run() {
        let storage = MemoryStorage::new();
        let mut log = open(&storage);

        let entry = run(&mut log, "Goal: greet {name}");

        assert_eq!(entry.target, PromptTarget::ChatGpt);
        assert_eq!(entry.original_input, "Goal: greet {name}");
        assert!(entry.generated_prompt.contains("greet Ada"));
        assert_eq!(entry.variables.get("name").map(String::as_str), Some("Ada"));

        let raw = storage.raw(HISTORY_DOCUMENT).unwrap();
        assert!(raw.contains("\"originalInput\""));
        assert!(raw.contains("\"generatedPrompt\""));
    }

    #[test]
    fn test_cap_keeps_newest_first() {
        let storage = MemoryStorage::new();
        let mut log = open(&storage);

        for i in 0..55 {
            run(&mut log, &format!("task {}", i));
        }

        let reopened = open(&storage);
        assert_eq!(reopened.list().len(), MAX_HISTORY);
        assert_eq!(reopened.list()[0].original_input, "task 54");
        assert_eq!(reopened.list()[49].original_input, "task 5");
        assert_eq!(reopened.inputs()[0], "task 54");
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::new();
        let mut log = open(&storage);
        run(&mut log, "one");
        run(&mut log, "two");

        assert_eq!(log.clear().unwrap(), 2);
        assert!(log.list().is_empty());
        assert!(storage.raw(HISTORY_DOCUMENT).is_none());
    }

    #[test]
    fn test_failed_save_keeps_entries() {
        let storage = MemoryStorage::new();
        let mut log = open(&storage);
        run(&mut log, "kept");
        storage.set_fail_saves(true);

        let session = ForgeSession::default();
        let output = forge(&session, "lost");
        assert!(log.record(&session, "lost", &output).is_err());
        assert_eq!(log.list().len(), 1);
    }

    #[test]
    fn test_undecodable_history_refuses_to_open() {
        let storage = MemoryStorage::new();
        storage.save(HISTORY_DOCUMENT, "nope").unwrap();

        assert!(matches!(
            HistoryLog::open(storage.clone()),
            Err(ForgeError::DecodeError { .. })
        ));
        assert_eq!(storage.raw(HISTORY_DOCUMENT).as_deref(), Some("nope"));
    }
}
