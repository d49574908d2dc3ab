//! Rendering targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A downstream text consumer with its own section layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptTarget {
    /// XML-style tag wrappers.
    #[default]
    Claude,
    /// `###` heading blocks.
    ChatGpt,
    /// `###` heading blocks plus citation policy.
    Perplexity,
    /// `###` heading blocks plus an operational scaffold for coding agents.
    Agent,
}

/// The three physical layouts targets map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Tagged,
    Headings,
    AgenticScaffold,
}

impl PromptTarget {
    pub const ALL: [PromptTarget; 4] = [
        PromptTarget::Claude,
        PromptTarget::ChatGpt,
        PromptTarget::Perplexity,
        PromptTarget::Agent,
    ];

    pub fn layout(self) -> Layout {
        match self {
            PromptTarget::Claude => Layout::Tagged,
            PromptTarget::ChatGpt | PromptTarget::Perplexity => Layout::Headings,
            PromptTarget::Agent => Layout::AgenticScaffold,
        }
    }

    /// The single policy constraint injected for this target.
    pub fn policy_line(self) -> &'static str {
        match self {
            PromptTarget::Claude => {
                "Keep every part of the answer inside the matching tagged section."
            }
            PromptTarget::ChatGpt => {
                "Answer each section in the order given and label it with its heading."
            }
            PromptTarget::Perplexity => {
                "Ground factual claims in current, verifiable sources rather than memory."
            }
            PromptTarget::Agent => {
                "Work as an autonomous coding agent: propose concrete file edits and runnable commands."
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptTarget::Claude => "claude",
            PromptTarget::ChatGpt => "chatgpt",
            PromptTarget::Perplexity => "perplexity",
            PromptTarget::Agent => "agent",
        }
    }
}

impl fmt::Display for PromptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" => Ok(PromptTarget::Claude),
            "chatgpt" | "gpt" => Ok(PromptTarget::ChatGpt),
            "perplexity" => Ok(PromptTarget::Perplexity),
            "agent" | "ide" => Ok(PromptTarget::Agent),
            other => Err(format!(
                "unknown target '{}' (expected one of: claude, chatgpt, perplexity, agent)",
                other
            )),
        }
    }
}
