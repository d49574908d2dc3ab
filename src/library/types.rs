//! Library records as persisted in the `library` document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// One saved body of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub content: String,
}

/// A saved prompt.
///
/// `versions` is newest first and its first entry always holds `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptLibraryItem {
    pub id: String,
    pub title: String,
    pub body: String,
    /// `None` means uncategorized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub versions: Vec<Version>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PromptLibraryItem {
    pub fn version(&self, version_id: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.id == version_id)
    }

    pub fn latest_version(&self) -> Option<&Version> {
        self.versions.first()
    }
}

/// Everything stored in the `library` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBundle {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub prompts: Vec<PromptLibraryItem>,
}

impl LibraryBundle {
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn tag(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    pub fn prompt(&self, id: &str) -> Option<&PromptLibraryItem> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Names of the tags a prompt references, skipping dangling ids.
    pub fn tag_names<'a>(&'a self, item: &'a PromptLibraryItem) -> impl Iterator<Item = &'a str> {
        item.tag_ids
            .iter()
            .filter_map(|id| self.tag(id).map(|t| t.name.as_str()))
    }
}

/// Fields for a new prompt.
#[derive(Debug, Clone, Default)]
pub struct NewPrompt {
    pub title: String,
    pub body: String,
    pub category_id: Option<String>,
    pub tag_ids: Vec<String>,
}

/// A partial prompt update. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct PromptUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    /// `Some(None)` clears the category.
    pub category_id: Option<Option<String>>,
    pub tag_ids: Option<Vec<String>>,
    /// Attached to the version a body change creates.
    pub note: Option<String>,
}
