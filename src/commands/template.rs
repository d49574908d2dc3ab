//! Implementation of the `promptforge template` commands.

use super::{Globals, TIME_FORMAT, print_text, read_body};
use crate::cli::{TemplateAction, TemplateCommand};
use promptforge::error::{ForgeError, Result};
use promptforge::library::{NewTemplate, TemplateStore, TemplateUpdate};

pub fn dispatch_template(globals: &Globals, cmd: TemplateCommand) -> Result<()> {
    let ctx = globals.context()?;
    let mut store = TemplateStore::open(ctx.storage())?;

    match cmd.action {
        TemplateAction::Add {
            name,
            body,
            target,
            category,
            tags,
        } => {
            let content = read_body(&body)?.ok_or_else(|| {
                ForgeError::UserError(
                    "template content is required (--body or --file)".to_string(),
                )
            })?;
            let template = store.add(NewTemplate {
                name,
                content,
                target,
                category,
                tags,
            })?;
            println!("{}", template.id);
        }
        TemplateAction::Update {
            id,
            name,
            body,
            target,
            category,
            tags,
        } => {
            let update = TemplateUpdate {
                name,
                content: read_body(&body)?,
                target,
                category,
                tags: (!tags.is_empty()).then_some(tags),
            };
            let template = store.update(&id, update)?;
            eprintln!("Updated template {}", template.id);
        }
        TemplateAction::Delete { id } => {
            let template = store.delete(&id)?;
            eprintln!("Deleted template {} ('{}')", template.id, template.name);
        }
        TemplateAction::List => {
            for template in store.list() {
                println!(
                    "{}  {}  [{}]  {}",
                    template.id,
                    template.name,
                    template.target,
                    template.updated_at.format(TIME_FORMAT)
                );
            }
        }
        TemplateAction::Show { id } => {
            let template = store.get(&id)?;
            eprintln!("Template:   {}", template.id);
            eprintln!("Name:       {}", template.name);
            eprintln!("Target:     {}", template.target);
            if !template.category.is_empty() {
                eprintln!("Category:   {}", template.category);
            }
            if !template.tags.is_empty() {
                eprintln!("Tags:       {}", template.tags.join(", "));
            }
            eprintln!("Updated:    {}", template.updated_at.format(TIME_FORMAT));
            eprintln!();
            print_text(&template.content);
        }
    }
    Ok(())
}
