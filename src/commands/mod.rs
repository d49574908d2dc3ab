//! Command implementations for promptforge.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the small input/output helpers they share.
//! Artifacts go to stdout; checklists, warnings and status lines go to
//! stderr.

mod config_cmd;
mod diff;
mod forge;
mod history;
mod library;
mod optimize;
mod template;
mod vars;

use crate::cli::{Cli, Command};
use promptforge::context::ForgeContext;
use promptforge::error::{ForgeError, Result};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

/// Flags every command can see.
#[derive(Debug, Clone, Default)]
pub struct Globals {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl Globals {
    /// Resolve where persisted state lives for this run.
    pub fn context(&self) -> Result<ForgeContext> {
        ForgeContext::resolve(self.data_dir.as_deref(), self.config.as_deref())
    }
}

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(cli: Cli) -> Result<()> {
    let globals = Globals {
        data_dir: cli.data_dir,
        config: cli.config,
    };

    match cli.command {
        Command::Forge(args) => forge::cmd_forge(&globals, args),
        Command::Optimize(args) => optimize::cmd_optimize(&globals, args),
        Command::Vars(cmd) => vars::dispatch_vars(cmd),
        Command::Diff(args) => diff::cmd_diff(args),
        Command::Library(cmd) => library::dispatch_library(&globals, cmd),
        Command::Template(cmd) => template::dispatch_template(&globals, cmd),
        Command::History(cmd) => history::dispatch_history(&globals, cmd),
        Command::Config(cmd) => config_cmd::dispatch_config(&globals, cmd),
    }
}

/// Read a file, or stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ForgeError::UserError(format!("failed to read stdin: {}", e)))?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            ForgeError::UserError(format!("failed to read input file '{}': {}", path, e))
        }),
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ForgeError::UserError(format!("failed to serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Print text on stdout, ending with exactly the newlines it already has
/// or one if it has none.
pub fn print_text(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}

/// Parse `--var key=value` flags.
pub fn parse_vars(pairs: &[String]) -> Result<std::collections::BTreeMap<String, String>> {
    promptforge::variables::parse_assignments(pairs).map_err(ForgeError::UserError)
}

/// Body text from `--body` or `--file`, if either was given.
pub fn read_body(args: &crate::cli::BodyArgs) -> Result<Option<String>> {
    match (&args.body, &args.file) {
        (Some(body), _) => Ok(Some(body.clone())),
        (None, Some(file)) => read_input(Some(file)).map(Some),
        (None, None) => Ok(None),
    }
}

/// Timestamp format used in listings.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
