//! Implementation of the `promptforge diff` command.

use super::print_json;
use crate::cli::DiffArgs;
use promptforge::diff::{self, DiffSummary};
use promptforge::error::{ForgeError, Result};
use std::path::Path;

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ForgeError::UserError(format!("failed to read '{}': {}", path.display(), e))
    })
}

pub fn cmd_diff(args: DiffArgs) -> Result<()> {
    let old = read(&args.old)?;
    let new = read(&args.new)?;
    let lines = diff::diff(&old, &new);
    let summary = DiffSummary::of(&lines);

    if args.json {
        print_json(&lines)?;
    } else if !args.summary {
        print!("{}", diff::render(&lines));
    }
    eprintln!("{}", summary);
    Ok(())
}
