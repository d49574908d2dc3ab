//! Implementation of the `promptforge library` commands.

use super::{Globals, TIME_FORMAT, print_json, print_text, read_body};
use crate::cli::{LibraryAction, LibraryCommand, NamedAction, PromptAction};
use promptforge::diff::{self, DiffSummary};
use promptforge::error::{ForgeError, Result};
use promptforge::library::{
    LibraryBundle, LibraryStore, NewPrompt, PromptLibraryItem, PromptUpdate, SearchQuery,
};
use promptforge::storage::FileStorage;

pub fn dispatch_library(globals: &Globals, cmd: LibraryCommand) -> Result<()> {
    let ctx = globals.context()?;
    let mut store = LibraryStore::open(ctx.storage())?;

    match cmd.action {
        LibraryAction::Category { action } => cmd_category(&mut store, action),
        LibraryAction::Tag { action } => cmd_tag(&mut store, action),
        LibraryAction::Prompt { action } => cmd_prompt(&mut store, action),
    }
}

fn cmd_category(store: &mut LibraryStore<FileStorage>, action: NamedAction) -> Result<()> {
    match action {
        NamedAction::Add { name } => {
            let category = store.add_category(&name)?;
            println!("{}", category.id);
        }
        NamedAction::Rename { id, name } => {
            let category = store.rename_category(&id, &name)?;
            eprintln!("Renamed category {} to '{}'", category.id, category.name);
        }
        NamedAction::Delete { id } => {
            let moved = store.delete_category(&id)?;
            eprintln!("Deleted category {} ({} prompt(s) uncategorized)", id, moved);
        }
        NamedAction::List => {
            for category in store.categories() {
                println!("{}  {}", category.id, category.name);
            }
        }
    }
    Ok(())
}

fn cmd_tag(store: &mut LibraryStore<FileStorage>, action: NamedAction) -> Result<()> {
    match action {
        NamedAction::Add { name } => {
            let tag = store.add_tag(&name)?;
            println!("{}", tag.id);
        }
        NamedAction::Rename { id, name } => {
            let tag = store.rename_tag(&id, &name)?;
            eprintln!("Renamed tag {} to '{}'", tag.id, tag.name);
        }
        NamedAction::Delete { id } => {
            let untagged = store.delete_tag(&id)?;
            eprintln!("Deleted tag {} (removed from {} prompt(s))", id, untagged);
        }
        NamedAction::List => {
            for tag in store.tags() {
                println!("{}  {}", tag.id, tag.name);
            }
        }
    }
    Ok(())
}

fn cmd_prompt(store: &mut LibraryStore<FileStorage>, action: PromptAction) -> Result<()> {
    match action {
        PromptAction::Add {
            title,
            body,
            category,
            tags,
        } => {
            let body = read_body(&body)?.ok_or_else(|| {
                ForgeError::UserError("a prompt body is required (--body or --file)".to_string())
            })?;
            let item = store.add_prompt(NewPrompt {
                title,
                body,
                category_id: category,
                tag_ids: tags,
            })?;
            println!("{}", item.id);
        }
        PromptAction::Update {
            id,
            title,
            body,
            category,
            uncategorize,
            tags,
            clear_tags,
            note,
        } => {
            let before = newest_version(store.prompt(&id)?);
            let update = PromptUpdate {
                title,
                body: read_body(&body)?,
                category_id: if uncategorize {
                    Some(None)
                } else {
                    category.map(Some)
                },
                tag_ids: if clear_tags {
                    Some(Vec::new())
                } else if tags.is_empty() {
                    None
                } else {
                    Some(tags)
                },
                note,
            };
            let item = store.update_prompt(&id, update)?;
            match newest_version(&item) {
                Some(version) if Some(&version) != before.as_ref() => {
                    eprintln!("Updated {} (new version {})", item.id, version)
                }
                _ => eprintln!("Updated {}", item.id),
            }
        }
        PromptAction::Show { id, json } => {
            let item = store.prompt(&id)?;
            if json {
                print_json(item)?;
            } else {
                print_details(store.bundle(), item);
                print_text(&item.body);
            }
        }
        PromptAction::List { category } => {
            let query = SearchQuery {
                category_id: category,
                ..SearchQuery::default()
            };
            print_list(store.bundle(), &store.search(&query));
        }
        PromptAction::Search { query, category } => {
            let mut query = SearchQuery::text(query);
            query.category_id = category;
            let found = store.search(&query);
            print_list(store.bundle(), &found);
            eprintln!("{} match(es)", found.len());
        }
        PromptAction::Delete { id } => {
            let item = store.delete_prompt(&id)?;
            eprintln!("Deleted prompt {} ('{}')", item.id, item.title);
        }
        PromptAction::Versions { id } => {
            let item = store.prompt(&id)?;
            for (i, version) in item.versions.iter().enumerate() {
                println!(
                    "{}. {}  {}{}",
                    i + 1,
                    version.id,
                    version.created_at.format(TIME_FORMAT),
                    version
                        .note
                        .as_deref()
                        .map(|n| format!("  {}", n))
                        .unwrap_or_default()
                );
            }
        }
        PromptAction::Rollback { id, version } => {
            let item = store.rollback_prompt(&id, &version)?;
            eprintln!(
                "Rolled back {} to {} (new version {})",
                item.id,
                version,
                newest_version(&item).unwrap_or_default()
            );
        }
        PromptAction::Diff { id, from, to } => {
            let lines = store.diff_versions(&id, &from, to.as_deref())?;
            print!("{}", diff::render(&lines));
            eprintln!("{}", DiffSummary::of(&lines));
        }
    }
    Ok(())
}

fn newest_version(item: &PromptLibraryItem) -> Option<String> {
    item.latest_version().map(|v| v.id.clone())
}

fn print_list(bundle: &LibraryBundle, items: &[&PromptLibraryItem]) {
    for item in items {
        let category = item
            .category_id
            .as_deref()
            .and_then(|id| bundle.category(id))
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        println!(
            "{}  {}  [{}]  {}",
            item.id,
            item.title,
            category,
            item.updated_at.format(TIME_FORMAT)
        );
    }
}

fn print_details(bundle: &LibraryBundle, item: &PromptLibraryItem) {
    eprintln!("Prompt:     {}", item.id);
    eprintln!("Title:      {}", item.title);
    if let Some(category) = item.category_id.as_deref().and_then(|id| bundle.category(id)) {
        eprintln!("Category:   {}", category.name);
    }
    let tags: Vec<&str> = bundle.tag_names(item).collect();
    if !tags.is_empty() {
        eprintln!("Tags:       {}", tags.join(", "));
    }
    eprintln!("Created:    {}", item.created_at.format(TIME_FORMAT));
    eprintln!("Updated:    {}", item.updated_at.format(TIME_FORMAT));
    eprintln!("Versions:   {}", item.versions.len());
    eprintln!();
}
