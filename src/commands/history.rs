//! Implementation of the `promptforge history` commands.

use super::{Globals, TIME_FORMAT, print_json};
use crate::cli::{HistoryAction, HistoryCommand};
use promptforge::error::Result;
use promptforge::history::HistoryLog;

/// Characters of the original input shown per entry.
const PREVIEW_CHARS: usize = 60;

pub fn dispatch_history(globals: &Globals, cmd: HistoryCommand) -> Result<()> {
    let ctx = globals.context()?;
    let mut log = HistoryLog::open(ctx.storage())?;

    match cmd.action {
        HistoryAction::List { limit, json } => {
            let entries = log.list();
            let entries = &entries[..limit.unwrap_or(entries.len()).min(entries.len())];
            if json {
                return print_json(&entries);
            }
            for (i, entry) in entries.iter().enumerate() {
                println!(
                    "{}. {}  {}  {}",
                    i + 1,
                    entry.timestamp.format(TIME_FORMAT),
                    entry.target,
                    preview(&entry.original_input)
                );
            }
        }
        HistoryAction::Clear => {
            let removed = log.clear()?;
            eprintln!("Cleared {} history entr{}", removed, if removed == 1 { "y" } else { "ies" });
        }
    }
    Ok(())
}

/// First line of `text`, shortened to [`PREVIEW_CHARS`].
fn preview(text: &str) -> String {
    let line = text.trim().lines().next().unwrap_or("");
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut.trim_end())
    } else {
        line.to_string()
    }
}
