//! Library search.

use super::types::{LibraryBundle, PromptLibraryItem};

/// A search over saved prompts.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Matched case-insensitively against title, body and tag names.
    /// Empty matches everything.
    pub text: String,
    /// Exact category id.
    pub category_id: Option<String>,
}

impl SearchQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category_id: None,
        }
    }

    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

/// Prompts matching `query`, in library order.
pub fn search<'a>(bundle: &'a LibraryBundle, query: &SearchQuery) -> Vec<&'a PromptLibraryItem> {
    let needle = query.text.trim().to_lowercase();
    bundle
        .prompts
        .iter()
        .filter(|p| match &query.category_id {
            Some(id) => p.category_id.as_ref() == Some(id),
            None => true,
        })
        .filter(|p| needle.is_empty() || matches_text(bundle, p, &needle))
        .collect()
}

fn matches_text(bundle: &LibraryBundle, item: &PromptLibraryItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle)
        || item.body.to_lowercase().contains(needle)
        || bundle
            .tag_names(item)
            .any(|name| name.to_lowercase().contains(needle))
}
