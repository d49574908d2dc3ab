//! Prompt operations and version history.

use super::catalog::name_key;
use super::stamps::StampSource;
use super::types::{LibraryBundle, NewPrompt, PromptLibraryItem, PromptUpdate, Version};
use crate::diff::{self, DiffLine};
use crate::error::{ForgeError, Result};
use std::cmp::Reverse;

/// Versions kept per prompt when the library is persisted.
pub const MAX_VERSIONS: usize = 50;

/// Note on the version a new prompt starts with.
pub const INITIAL_NOTE: &str = "Created";

/// Note on a version added because the stored history did not hold the body.
pub const RESTORED_NOTE: &str = "Restored from body";

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ForgeError::UserError(format!("prompt {} is required", field)));
    }
    Ok(())
}

fn check_references(
    bundle: &LibraryBundle,
    category_id: Option<&str>,
    tag_ids: &[String],
) -> Result<()> {
    if let Some(id) = category_id
        && bundle.category(id).is_none()
    {
        return Err(ForgeError::not_found("category", id));
    }
    if let Some(id) = tag_ids.iter().find(|id| bundle.tag(id).is_none()) {
        return Err(ForgeError::not_found("tag", id.as_str()));
    }
    Ok(())
}

fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

fn prompt_mut<'a>(bundle: &'a mut LibraryBundle, id: &str) -> Result<&'a mut PromptLibraryItem> {
    bundle
        .prompts
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| ForgeError::not_found("prompt", id))
}

pub fn add_prompt(
    bundle: &mut LibraryBundle,
    new: NewPrompt,
    stamps: &mut dyn StampSource,
) -> Result<PromptLibraryItem> {
    require("title", &new.title)?;
    require("body", &new.body)?;
    check_references(bundle, new.category_id.as_deref(), &new.tag_ids)?;

    let item_stamp = stamps.next();
    let version_stamp = stamps.next();
    let item = PromptLibraryItem {
        id: item_stamp.id,
        title: new.title.trim().to_string(),
        body: new.body.clone(),
        category_id: new.category_id,
        tag_ids: dedup_ids(new.tag_ids),
        versions: vec![Version {
            id: version_stamp.id,
            created_at: item_stamp.at,
            note: Some(INITIAL_NOTE.to_string()),
            content: new.body,
        }],
        created_at: item_stamp.at,
        updated_at: item_stamp.at,
    };
    bundle.prompts.push(item.clone());
    Ok(item)
}

/// Apply `update` to a prompt.
///
/// A body that differs from the current one, even by a single byte,
/// prepends a new version. An identical body leaves history alone.
pub fn update_prompt(
    bundle: &mut LibraryBundle,
    id: &str,
    update: PromptUpdate,
    stamps: &mut dyn StampSource,
) -> Result<PromptLibraryItem> {
    if let Some(title) = &update.title {
        require("title", title)?;
    }
    if let Some(body) = &update.body {
        require("body", body)?;
    }
    let category = update.category_id.as_ref().and_then(|c| c.as_deref());
    check_references(bundle, category, update.tag_ids.as_deref().unwrap_or_default())?;

    let stamp = stamps.next();
    let item = prompt_mut(bundle, id)?;

    if let Some(title) = update.title {
        item.title = title.trim().to_string();
    }
    if let Some(category_id) = update.category_id {
        item.category_id = category_id;
    }
    if let Some(tag_ids) = update.tag_ids {
        item.tag_ids = dedup_ids(tag_ids);
    }
    if let Some(body) = update.body
        && body != item.body
    {
        item.versions.insert(
            0,
            Version {
                id: stamp.id,
                created_at: stamp.at,
                note: update.note,
                content: body.clone(),
            },
        );
        item.body = body;
    }
    item.updated_at = stamp.at;
    Ok(item.clone())
}

pub fn delete_prompt(bundle: &mut LibraryBundle, id: &str) -> Result<PromptLibraryItem> {
    let index = bundle
        .prompts
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| ForgeError::not_found("prompt", id))?;
    Ok(bundle.prompts.remove(index))
}

/// Restore the body of `version_id`.
///
/// The restored content is prepended as a new version with a rollback
/// note; versions in between are kept.
pub fn rollback_prompt(
    bundle: &mut LibraryBundle,
    id: &str,
    version_id: &str,
    stamps: &mut dyn StampSource,
) -> Result<PromptLibraryItem> {
    let item = prompt_mut(bundle, id)?;
    let content = item
        .version(version_id)
        .map(|v| v.content.clone())
        .ok_or_else(|| ForgeError::not_found("version", version_id))?;

    let stamp = stamps.next();
    item.versions.insert(
        0,
        Version {
            id: stamp.id,
            created_at: stamp.at,
            note: Some(format!("Rolled back to {}", version_id)),
            content: content.clone(),
        },
    );
    item.body = content;
    item.updated_at = stamp.at;
    Ok(item.clone())
}

/// Diff two versions of a prompt. `to = None` compares against the body.
pub fn diff_versions(item: &PromptLibraryItem, from: &str, to: Option<&str>) -> Result<Vec<DiffLine>> {
    let old = item
        .version(from)
        .ok_or_else(|| ForgeError::not_found("version", from))?;
    let new = match to {
        Some(to) => {
            &item
                .version(to)
                .ok_or_else(|| ForgeError::not_found("version", to))?
                .content
        }
        None => &item.body,
    };
    Ok(diff::diff(&old.content, new))
}

/// Put the bundle in its persisted shape.
///
/// Categories and tags sort by name ignoring case, prompts by most
/// recently updated, and each prompt keeps its newest [`MAX_VERSIONS`]
/// versions. A prompt whose newest version does not hold its body gets
/// one that does, stamped from the prompt's id and `updated_at`.
pub fn normalize(bundle: &mut LibraryBundle) {
    bundle
        .categories
        .sort_by(|a, b| name_key(&a.name).cmp(&name_key(&b.name)).then_with(|| a.id.cmp(&b.id)));
    bundle
        .tags
        .sort_by(|a, b| name_key(&a.name).cmp(&name_key(&b.name)).then_with(|| a.id.cmp(&b.id)));
    bundle.prompts.sort_by(|a, b| {
        Reverse(a.updated_at)
            .cmp(&Reverse(b.updated_at))
            .then_with(|| name_key(&a.title).cmp(&name_key(&b.title)))
            .then_with(|| a.id.cmp(&b.id))
    });
    for prompt in &mut bundle.prompts {
        if prompt
            .versions
            .first()
            .is_none_or(|latest| latest.content != prompt.body)
        {
            tracing::warn!(prompt = %prompt.id, "newest version does not hold the body, adding one");
            prompt.versions.insert(
                0,
                Version {
                    id: format!("{}-{}", prompt.id, prompt.updated_at.timestamp_millis()),
                    created_at: prompt.updated_at,
                    note: Some(RESTORED_NOTE.to_string()),
                    content: prompt.body.clone(),
                },
            );
        }
        prompt.versions.truncate(MAX_VERSIONS);
    }
}
