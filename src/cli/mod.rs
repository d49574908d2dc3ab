//! CLI argument parsing for promptforge.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use promptforge::optimize::{ModelFamily, Scenario, ToolReliability};
use promptforge::prompt::PromptTarget;
use std::path::PathBuf;

/// Promptforge: turn rough task descriptions into structured prompts.
///
/// Rough input is parsed into a canonical prompt, rendered for a target
/// model, and checked for quality. Prompts and templates can be saved in
/// a versioned local library.
#[derive(Parser, Debug)]
#[command(name = "promptforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the library, templates, history and config.
    ///
    /// Defaults to $PROMPTFORGE_HOME, then ./.promptforge.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <data-dir>/config.yaml).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log pipeline details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for promptforge.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Structure and render a rough prompt for a target.
    ///
    /// Prints the prompt on stdout and the quality checklist on stderr.
    Forge(ForgeArgs),

    /// Heuristically optimize raw prompt text for a model family.
    Optimize(OptimizeArgs),

    /// Detect or fill `{placeholder}` variables.
    Vars(VarsCommand),

    /// Line diff between two files.
    Diff(DiffArgs),

    /// Manage saved prompts, categories and tags.
    Library(LibraryCommand),

    /// Manage prompt templates.
    Template(TemplateCommand),

    /// Show or clear recorded forge runs.
    History(HistoryCommand),

    /// Show or create the config file.
    Config(ConfigCommand),
}

/// Arguments for the `forge` command.
#[derive(Args, Debug)]
pub struct ForgeArgs {
    /// Input file, or `-` for stdin (default).
    pub input: Option<String>,

    /// Rendering target (claude, chatgpt, perplexity, agent).
    #[arg(short, long)]
    pub target: Option<PromptTarget>,

    /// Variable value as key=value. Repeatable.
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Turn an enhancement option on, e.g. `strict-code-only`. Repeatable.
    #[arg(long, value_name = "OPTION")]
    pub enable: Vec<String>,

    /// Turn an enhancement option off, e.g. `include-alternatives`. Repeatable.
    #[arg(long, value_name = "OPTION")]
    pub disable: Vec<String>,

    /// Save this run to history.
    #[arg(long)]
    pub record: bool,

    /// Print the full output as JSON instead of the prompt.
    #[arg(long)]
    pub json: bool,

    /// Exit with status 2 when an error-severity check fails.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `optimize` command.
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    /// Input file, or `-` for stdin (default).
    pub input: Option<String>,

    /// Model family (claude, openai, gemini, perplexity, ide-agent, generic).
    #[arg(short, long)]
    pub family: Option<ModelFamily>,

    /// Scenario (general, coding, cli, json, tool-agent, research).
    #[arg(short, long)]
    pub scenario: Option<Scenario>,

    #[arg(long)]
    pub temperature: Option<f64>,

    #[arg(long)]
    pub top_p: Option<f64>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// How dependable the agent's tools are (low, high).
    #[arg(long)]
    pub tool_reliability: Option<ToolReliability>,

    /// Required score gain over the input (clamped to 0.05..=0.5).
    #[arg(long)]
    pub margin: Option<f64>,

    /// Omit the family system preamble.
    #[arg(long)]
    pub no_preamble: bool,

    /// Ask the configured completion helper for a refinement.
    #[arg(long)]
    pub assist: bool,

    /// Print the full output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Variable subcommands.
#[derive(Args, Debug)]
pub struct VarsCommand {
    #[command(subcommand)]
    pub action: VarsAction,
}

#[derive(Subcommand, Debug)]
pub enum VarsAction {
    /// List distinct variable names in first-occurrence order.
    Detect {
        /// Input file, or `-` for stdin (default).
        input: Option<String>,
    },

    /// Substitute variables and report the unfilled ones.
    Resolve {
        /// Input file, or `-` for stdin (default).
        input: Option<String>,

        /// Variable value as key=value. Repeatable.
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,
    },
}

/// Arguments for the `diff` command.
#[derive(Args, Debug)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,

    /// Print only the added/removed/unchanged counts.
    #[arg(long)]
    pub summary: bool,

    #[arg(long)]
    pub json: bool,
}

/// Library subcommands.
#[derive(Args, Debug)]
pub struct LibraryCommand {
    #[command(subcommand)]
    pub action: LibraryAction,
}

#[derive(Subcommand, Debug)]
pub enum LibraryAction {
    /// Manage categories.
    Category {
        #[command(subcommand)]
        action: NamedAction,
    },

    /// Manage tags.
    Tag {
        #[command(subcommand)]
        action: NamedAction,
    },

    /// Manage saved prompts.
    Prompt {
        #[command(subcommand)]
        action: PromptAction,
    },
}

/// Actions shared by categories and tags.
#[derive(Subcommand, Debug)]
pub enum NamedAction {
    Add { name: String },
    Rename { id: String, name: String },
    Delete { id: String },
    List,
}

/// Where a prompt or template body comes from.
#[derive(Args, Debug, Default)]
pub struct BodyArgs {
    /// Body text given inline.
    #[arg(long, conflicts_with = "file")]
    pub body: Option<String>,

    /// Read the body from a file (`-` for stdin).
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PromptAction {
    /// Save a new prompt.
    Add {
        #[arg(long)]
        title: String,

        #[command(flatten)]
        body: BodyArgs,

        /// Category id.
        #[arg(long)]
        category: Option<String>,

        /// Tag id. Repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Change a saved prompt. A changed body adds a version.
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        body: BodyArgs,

        /// Category id.
        #[arg(long, conflicts_with = "uncategorize")]
        category: Option<String>,

        /// Remove the category.
        #[arg(long)]
        uncategorize: bool,

        /// Replace the tag list with these tag ids. Repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Remove every tag.
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,

        /// Note stored on the new version.
        #[arg(long)]
        note: Option<String>,
    },

    /// Print a prompt's body.
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// List saved prompts, most recently updated first.
    List {
        /// Only prompts in this category id.
        #[arg(long)]
        category: Option<String>,
    },

    /// Search titles, bodies and tag names.
    Search {
        query: String,

        /// Only prompts in this category id.
        #[arg(long)]
        category: Option<String>,
    },

    Delete {
        id: String,
    },

    /// List a prompt's versions, newest first.
    Versions {
        id: String,
    },

    /// Restore the body of an earlier version.
    #[command(disable_version_flag = true)]
    Rollback {
        id: String,
        version: String,
    },

    /// Diff a version against another version or the current body.
    Diff {
        id: String,
        from: String,

        /// Version to compare against (default: current body).
        #[arg(long)]
        to: Option<String>,
    },
}

/// Template subcommands.
#[derive(Args, Debug)]
pub struct TemplateCommand {
    #[command(subcommand)]
    pub action: TemplateAction,
}

#[derive(Subcommand, Debug)]
pub enum TemplateAction {
    Add {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        body: BodyArgs,

        #[arg(short, long, default_value = "claude")]
        target: PromptTarget,

        #[arg(long, default_value = "")]
        category: String,

        /// Tag label. Repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        body: BodyArgs,

        #[arg(short, long)]
        target: Option<PromptTarget>,

        #[arg(long)]
        category: Option<String>,

        /// Replace the tag labels. Repeatable.
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    Delete {
        id: String,
    },

    /// List templates, most recently updated first.
    List,

    Show {
        id: String,
    },
}

/// History subcommands.
#[derive(Args, Debug)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub action: HistoryAction,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List recorded runs, newest first.
    List {
        /// Show at most this many entries.
        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Remove every recorded run.
    Clear,
}

/// Config subcommands.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective config as YAML.
    Show,

    /// Write a config file with every default spelled out.
    Init {
        /// Replace an existing config file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_forge_full() {
        let cli = Cli::try_parse_from([
            "promptforge",
            "forge",
            "task.txt",
            "--target",
            "agent",
            "--var",
            "name=Ada",
            "--disable",
            "include-alternatives",
            "--record",
            "--strict",
        ])
        .unwrap();
        if let Command::Forge(args) = cli.command {
            assert_eq!(args.input.as_deref(), Some("task.txt"));
            assert_eq!(args.target, Some(PromptTarget::Agent));
            assert_eq!(args.vars, vec!["name=Ada"]);
            assert_eq!(args.disable, vec!["include-alternatives"]);
            assert!(args.record);
            assert!(args.strict);
            assert!(!args.json);
        } else {
            panic!("Expected Forge command");
        }
    }

    #[test]
    fn parse_forge_rejects_unknown_target() {
        assert!(Cli::try_parse_from(["promptforge", "forge", "--target", "bard"]).is_err());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["promptforge", "history", "clear", "--data-dir", "/tmp/pf", "-v"])
                .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/pf")));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_optimize() {
        let cli = Cli::try_parse_from([
            "promptforge",
            "optimize",
            "--family",
            "openai",
            "--scenario",
            "json",
            "--tool-reliability",
            "low",
            "--max-tokens",
            "900",
            "--no-preamble",
        ])
        .unwrap();
        if let Command::Optimize(args) = cli.command {
            assert_eq!(args.family, Some(ModelFamily::OpenAi));
            assert_eq!(args.scenario, Some(Scenario::Json));
            assert_eq!(args.tool_reliability, Some(ToolReliability::Low));
            assert_eq!(args.max_tokens, Some(900));
            assert!(args.no_preamble);
            assert!(!args.assist);
        } else {
            panic!("Expected Optimize command");
        }
    }

    #[test]
    fn parse_vars_resolve() {
        let cli = Cli::try_parse_from(["promptforge", "vars", "resolve", "-", "--var", "a=1"])
            .unwrap();
        if let Command::Vars(VarsCommand {
            action: VarsAction::Resolve { input, vars },
        }) = cli.command
        {
            assert_eq!(input.as_deref(), Some("-"));
            assert_eq!(vars, vec!["a=1"]);
        } else {
            panic!("Expected vars resolve");
        }
    }

    #[test]
    fn parse_library_prompt_update() {
        let cli = Cli::try_parse_from([
            "promptforge",
            "library",
            "prompt",
            "update",
            "p1",
            "--body",
            "new text",
            "--uncategorize",
            "--note",
            "tightened",
        ])
        .unwrap();
        if let Command::Library(LibraryCommand {
            action:
                LibraryAction::Prompt {
                    action:
                        PromptAction::Update {
                            id,
                            body,
                            uncategorize,
                            note,
                            ..
                        },
                },
        }) = cli.command
        {
            assert_eq!(id, "p1");
            assert_eq!(body.body.as_deref(), Some("new text"));
            assert!(uncategorize);
            assert_eq!(note.as_deref(), Some("tightened"));
        } else {
            panic!("Expected library prompt update");
        }
    }

    #[test]
    fn parse_body_and_file_conflict() {
        let result = Cli::try_parse_from([
            "promptforge",
            "library",
            "prompt",
            "add",
            "--title",
            "t",
            "--body",
            "b",
            "--file",
            "f.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_category_rename() {
        let cli =
            Cli::try_parse_from(["promptforge", "library", "category", "rename", "c1", "Docs"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Library(LibraryCommand {
                action: LibraryAction::Category {
                    action: NamedAction::Rename { .. }
                }
            })
        ));
    }

    #[test]
    fn parse_template_add_defaults() {
        let cli = Cli::try_parse_from([
            "promptforge",
            "template",
            "add",
            "--name",
            "bugfix",
            "--file",
            "t.md",
        ])
        .unwrap();
        if let Command::Template(TemplateCommand {
            action: TemplateAction::Add { target, category, .. },
        }) = cli.command
        {
            assert_eq!(target, PromptTarget::Claude);
            assert_eq!(category, "");
        } else {
            panic!("Expected template add");
        }
    }

    #[test]
    fn parse_config_init_force() {
        let cli = Cli::try_parse_from(["promptforge", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand {
                action: ConfigAction::Init { force: true }
            })
        ));
    }
}
