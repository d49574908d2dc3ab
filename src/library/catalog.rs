//! Category and tag operations.
//!
//! Both are plain named records. Names are required and unique ignoring
//! case. Deleting either one never deletes prompts: a deleted category
//! leaves its prompts uncategorized and a deleted tag is dropped from
//! every prompt's tag list.

use super::stamps::StampSource;
use super::types::{Category, LibraryBundle, Tag};
use crate::error::{ForgeError, Result};

fn require_name(kind: &str, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ForgeError::UserError(format!("{} name is required", kind)));
    }
    Ok(name.to_string())
}

fn ensure_unique<'a>(
    kind: &str,
    name: &str,
    mut existing: impl Iterator<Item = (&'a str, &'a str)>,
    skip_id: Option<&str>,
) -> Result<()> {
    let clash = existing.any(|(id, other)| Some(id) != skip_id && other.eq_ignore_ascii_case(name));
    if clash {
        return Err(ForgeError::UserError(format!(
            "{} '{}' already exists",
            kind, name
        )));
    }
    Ok(())
}

pub fn add_category(
    bundle: &mut LibraryBundle,
    name: &str,
    stamps: &mut dyn StampSource,
) -> Result<Category> {
    let name = require_name("category", name)?;
    ensure_unique(
        "category",
        &name,
        bundle.categories.iter().map(|c| (c.id.as_str(), c.name.as_str())),
        None,
    )?;

    let category = Category {
        id: stamps.next().id,
        name,
    };
    bundle.categories.push(category.clone());
    Ok(category)
}

pub fn rename_category(bundle: &mut LibraryBundle, id: &str, name: &str) -> Result<Category> {
    let name = require_name("category", name)?;
    ensure_unique(
        "category",
        &name,
        bundle.categories.iter().map(|c| (c.id.as_str(), c.name.as_str())),
        Some(id),
    )?;

    let category = bundle
        .categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| ForgeError::not_found("category", id))?;
    category.name = name;
    Ok(category.clone())
}

/// Remove a category. Returns how many prompts became uncategorized.
pub fn delete_category(bundle: &mut LibraryBundle, id: &str) -> Result<usize> {
    let before = bundle.categories.len();
    bundle.categories.retain(|c| c.id != id);
    if bundle.categories.len() == before {
        return Err(ForgeError::not_found("category", id));
    }

    let mut reassigned = 0;
    for prompt in &mut bundle.prompts {
        if prompt.category_id.as_deref() == Some(id) {
            prompt.category_id = None;
            reassigned += 1;
        }
    }
    Ok(reassigned)
}

pub fn add_tag(bundle: &mut LibraryBundle, name: &str, stamps: &mut dyn StampSource) -> Result<Tag> {
    let name = require_name("tag", name)?;
    ensure_unique(
        "tag",
        &name,
        bundle.tags.iter().map(|t| (t.id.as_str(), t.name.as_str())),
        None,
    )?;

    let tag = Tag {
        id: stamps.next().id,
        name,
    };
    bundle.tags.push(tag.clone());
    Ok(tag)
}

pub fn rename_tag(bundle: &mut LibraryBundle, id: &str, name: &str) -> Result<Tag> {
    let name = require_name("tag", name)?;
    ensure_unique(
        "tag",
        &name,
        bundle.tags.iter().map(|t| (t.id.as_str(), t.name.as_str())),
        Some(id),
    )?;

    let tag = bundle
        .tags
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| ForgeError::not_found("tag", id))?;
    tag.name = name;
    Ok(tag.clone())
}

/// Remove a tag. Returns how many prompts referenced it.
pub fn delete_tag(bundle: &mut LibraryBundle, id: &str) -> Result<usize> {
    let before = bundle.tags.len();
    bundle.tags.retain(|t| t.id != id);
    if bundle.tags.len() == before {
        return Err(ForgeError::not_found("tag", id));
    }

    let mut untagged = 0;
    for prompt in &mut bundle.prompts {
        let count = prompt.tag_ids.len();
        prompt.tag_ids.retain(|t| t != id);
        if prompt.tag_ids.len() != count {
            untagged += 1;
        }
    }
    Ok(untagged)
}

/// Sort key for names: case-insensitive, then exact, so the order is total.
pub(super) fn name_key(name: &str) -> (String, &str) {
    (name.to_lowercase(), name)
}
