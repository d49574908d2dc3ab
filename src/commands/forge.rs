//! Implementation of the `promptforge forge` command.

use super::{Globals, parse_vars, print_json, print_text, read_input};
use crate::cli::ForgeArgs;
use promptforge::config::Config;
use promptforge::error::{ForgeError, Result};
use promptforge::forge::{ForgeSession, forge};
use promptforge::history::HistoryLog;
use promptforge::quality::format_checklist;

/// Execute the `promptforge forge` command.
///
/// Prints the rendered prompt (or the whole output as JSON), then the
/// checklist and status line on stderr. With `--strict`, a failed
/// error-severity check becomes exit code 2 after everything is printed.
pub fn cmd_forge(globals: &Globals, args: ForgeArgs) -> Result<()> {
    let ctx = globals.context()?;
    let config = ctx.load_config()?;
    let raw = read_input(args.input.as_deref())?;
    let session = build_session(&config, &args)?;

    let output = forge(&session, &raw);

    if args.json {
        print_json(&output)?;
    } else {
        print_text(&output.prompt);
    }
    eprint!("{}", format_checklist(&output.checks));
    eprintln!("{}", output.status);

    if args.record {
        let mut history = HistoryLog::open(ctx.storage())?;
        history.record(&session, &raw, &output)?;
    }

    if args.strict && !output.passed() {
        let blocking = output.failed_checks().filter(|c| c.is_blocking()).count();
        return Err(ForgeError::ValidationError(format!(
            "{} blocking check(s) failed",
            blocking
        )));
    }

    Ok(())
}

/// Config defaults with the command-line overrides applied.
fn build_session(config: &Config, args: &ForgeArgs) -> Result<ForgeSession> {
    let mut session = config.session();

    if let Some(target) = args.target {
        session.target = target;
    }

    for (names, value) in [(&args.enable, true), (&args.disable, false)] {
        for name in names {
            if !session.options.set(name, value) {
                return Err(ForgeError::UserError(format!(
                    "unknown enhancement option '{}'",
                    name
                )));
            }
        }
    }

    session.variables = parse_vars(&args.vars)?;
    Ok(session)
}
