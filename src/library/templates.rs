//! Saved prompt templates.
//!
//! Templates are free-standing: `category` and `tags` are plain labels,
//! not references into the library.

use super::stamps::{StampSource, SystemStamps};
use crate::error::{ForgeError, Result};
use crate::prompt::PromptTarget;
use crate::storage::{StorageBackend, TEMPLATES_DOCUMENT, load_document, save_document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    pub content: String,
    pub target: PromptTarget,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTemplate {
    pub name: String,
    pub content: String,
    pub target: PromptTarget,
    pub category: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub content: Option<String>,
    pub target: Option<PromptTarget>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ForgeError::UserError(format!(
            "template {} is required",
            field
        )));
    }
    Ok(())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

pub fn add_template(
    templates: &mut Vec<PromptTemplate>,
    new: NewTemplate,
    stamps: &mut dyn StampSource,
) -> Result<PromptTemplate> {
    require("name", &new.name)?;
    require("content", &new.content)?;

    let stamp = stamps.next();
    let template = PromptTemplate {
        id: stamp.id,
        name: new.name.trim().to_string(),
        content: new.content,
        target: new.target,
        created_at: stamp.at,
        category: new.category.trim().to_string(),
        tags: clean_tags(new.tags),
        updated_at: stamp.at,
    };
    templates.push(template.clone());
    Ok(template)
}

pub fn update_template(
    templates: &mut [PromptTemplate],
    id: &str,
    update: TemplateUpdate,
    stamps: &mut dyn StampSource,
) -> Result<PromptTemplate> {
    if let Some(name) = &update.name {
        require("name", name)?;
    }
    if let Some(content) = &update.content {
        require("content", content)?;
    }

    let template = templates
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| ForgeError::not_found("template", id))?;

    if let Some(name) = update.name {
        template.name = name.trim().to_string();
    }
    if let Some(content) = update.content {
        template.content = content;
    }
    if let Some(target) = update.target {
        template.target = target;
    }
    if let Some(category) = update.category {
        template.category = category.trim().to_string();
    }
    if let Some(tags) = update.tags {
        template.tags = clean_tags(tags);
    }
    template.updated_at = stamps.next().at;
    Ok(template.clone())
}

pub fn delete_template(templates: &mut Vec<PromptTemplate>, id: &str) -> Result<PromptTemplate> {
    let index = templates
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| ForgeError::not_found("template", id))?;
    Ok(templates.remove(index))
}

/// Newest-updated first, ties by name then id.
fn sort_templates(templates: &mut [PromptTemplate]) {
    templates.sort_by(|a, b| {
        Reverse(a.updated_at)
            .cmp(&Reverse(b.updated_at))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Persisted template list. Mutations follow the same clone, save, commit
/// sequence as the library.
pub struct TemplateStore<S: StorageBackend> {
    storage: S,
    templates: Vec<PromptTemplate>,
    stamps: Box<dyn StampSource>,
}

impl<S: StorageBackend> TemplateStore<S> {
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with_stamps(storage, Box::new(SystemStamps))
    }

    pub fn open_with_stamps(storage: S, stamps: Box<dyn StampSource>) -> Result<Self> {
        let mut templates: Vec<PromptTemplate> =
            load_document(&storage, TEMPLATES_DOCUMENT)?.unwrap_or_default();
        sort_templates(&mut templates);
        Ok(Self {
            storage,
            templates,
            stamps,
        })
    }

    pub fn list(&self) -> &[PromptTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Result<&PromptTemplate> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ForgeError::not_found("template", id))
    }

    fn apply<T>(
        &mut self,
        action: &str,
        change: impl FnOnce(&mut Vec<PromptTemplate>, &mut dyn StampSource) -> Result<T>,
    ) -> Result<T> {
        let mut next = self.templates.clone();
        let out = change(&mut next, self.stamps.as_mut())?;
        sort_templates(&mut next);
        save_document(&self.storage, TEMPLATES_DOCUMENT, &next)?;
        self.templates = next;
        tracing::info!(action, "templates saved");
        Ok(out)
    }

    pub fn add(&mut self, new: NewTemplate) -> Result<PromptTemplate> {
        self.apply("add_template", |t, s| add_template(t, new, s))
    }

    pub fn update(&mut self, id: &str, update: TemplateUpdate) -> Result<PromptTemplate> {
        self.apply("update_template", |t, s| update_template(t, id, update, s))
    }

    pub fn delete(&mut self, id: &str) -> Result<PromptTemplate> {
        self.apply("delete_template", |t, _| delete_template(t, id))
    }
}
