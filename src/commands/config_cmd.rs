//! Implementation of the `promptforge config` commands.

use super::{Globals, print_text};
use crate::cli::{ConfigAction, ConfigCommand};
use promptforge::config::Config;
use promptforge::error::{ForgeError, Result};
use promptforge::fs::atomic_write_file;

pub fn dispatch_config(globals: &Globals, cmd: ConfigCommand) -> Result<()> {
    let ctx = globals.context()?;

    match cmd.action {
        ConfigAction::Show => {
            let config = ctx.load_config()?;
            print_text(&config.to_yaml()?);
            if !ctx.config_path.exists() {
                eprintln!(
                    "(defaults; no config file at {})",
                    ctx.config_path.display()
                );
            }
        }
        ConfigAction::Init { force } => {
            if ctx.config_path.exists() && !force {
                return Err(ForgeError::UserError(format!(
                    "config file '{}' already exists (use --force to replace it)",
                    ctx.config_path.display()
                )));
            }
            atomic_write_file(&ctx.config_path, &Config::default().to_yaml()?)?;
            eprintln!("Wrote {}", ctx.config_path.display());
        }
    }
    Ok(())
}
