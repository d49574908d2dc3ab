//! Implementation of the `promptforge vars` commands.

use super::{parse_vars, print_text, read_input};
use crate::cli::{VarsAction, VarsCommand};
use promptforge::error::Result;
use promptforge::variables;

pub fn dispatch_vars(cmd: VarsCommand) -> Result<()> {
    match cmd.action {
        VarsAction::Detect { input } => cmd_detect(input.as_deref()),
        VarsAction::Resolve { input, vars } => cmd_resolve(input.as_deref(), &vars),
    }
}

/// One variable name per line, in first-occurrence order.
fn cmd_detect(input: Option<&str>) -> Result<()> {
    let text = read_input(input)?;
    for name in variables::detect(&text) {
        println!("{}", name);
    }
    Ok(())
}

/// Resolved text on stdout; unfilled names on stderr.
fn cmd_resolve(input: Option<&str>, vars: &[String]) -> Result<()> {
    let text = read_input(input)?;
    let values = parse_vars(vars)?;
    let resolution = variables::resolve(&text, &values);

    print_text(&resolution.resolved_text);
    if !resolution.unfilled.is_empty() {
        eprintln!("Unfilled: {}", resolution.unfilled.join(", "));
    }
    Ok(())
}
