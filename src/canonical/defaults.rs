//! Fixed default content and injected policy lines.
//!
//! These strings are part of the output contract: changing any of them
//! changes every generated prompt that relies on the default.

use crate::prompt::{EnhancementOptions, PromptTarget, Section};

/// Used when the parsed goal is empty or a leftover heading token.
pub const DEFAULT_GOAL: &str =
    "Complete the task described in the context and deliver a verifiable result.";

/// Used when the parsed context is empty.
pub const DEFAULT_CONTEXT: &str =
    "No additional context was provided; state any assumptions you rely on.";

pub const NO_FILLER_LINE: &str =
    "Respond without conversational filler, greetings, or closing remarks.";
pub const MARKDOWN_LINE: &str = "Format the entire response as clean Markdown with clear headings.";
pub const STRICT_CODE_LINE: &str =
    "Output only code; keep any explanation inside code comments.";

pub const CITATION_LINES: [&str; 2] = [
    "Cite every factual claim with a direct source URL placed next to the claim.",
    "Verify key facts against at least two independent sources and flag any disagreement.",
];

/// The two-line default for a list section whose parsed content is empty.
///
/// Goal and context have single-string defaults instead and yield nothing.
pub fn section_default(section: Section) -> &'static [&'static str] {
    match section {
        Section::Assumptions => &[
            "The project builds and its existing tests pass before any change.",
            "Anything not stated in the request is unknown and must be called out.",
        ],
        Section::FileTreeRequest => &[
            "Before proposing changes, show the relevant files and directories as a tree.",
            "Mark each file in the tree as new, modified, or unchanged.",
        ],
        Section::Constraints => &[
            "Keep changes minimal and focused on the stated goal.",
            "Do not add new dependencies without justifying them.",
        ],
        Section::Deliverables => &[
            "A complete, working solution that satisfies the goal.",
            "A short summary of what changed and why.",
        ],
        Section::ImplementationDetails => &[
            "Describe the approach step by step before writing code.",
            "Call out every interface, data structure, or API that changes.",
        ],
        Section::VerificationChecklist => &[
            "Confirm every deliverable is present and complete.",
            "Confirm the final result violates none of the constraints.",
        ],
        Section::RisksAndEdgeCases => &[
            "List the inputs or states that could break the solution.",
            "Explain how each risk is mitigated or detected.",
        ],
        Section::Alternatives => &[
            "Describe at least one alternative approach.",
            "State why the chosen approach is preferred.",
        ],
        Section::ValidationSteps => &[
            "Give the exact commands or steps that validate the result.",
            "Describe the expected outcome of each validation step.",
        ],
        Section::RevertPlan => &[
            "Explain how to undo the change safely if it causes problems.",
            "Identify any data or state that cannot be rolled back automatically.",
        ],
        Section::Goal | Section::Context => &[],
    }
}

/// Constraint lines added by option toggles, in fixed order.
pub fn option_constraints(options: &EnhancementOptions) -> Vec<&'static str> {
    let mut lines = Vec::new();
    if options.no_conversational_filler {
        lines.push(NO_FILLER_LINE);
    }
    if options.enforce_markdown {
        lines.push(MARKDOWN_LINE);
    }
    if options.strict_code_only {
        lines.push(STRICT_CODE_LINE);
    }
    lines
}

/// Constraint lines added for the target: its policy line, plus citation
/// requirements for Perplexity when enabled.
pub fn target_constraints(target: PromptTarget, options: &EnhancementOptions) -> Vec<&'static str> {
    let mut lines = vec![target.policy_line()];
    if target == PromptTarget::Perplexity && options.include_search_verification_requirements {
        lines.extend(CITATION_LINES);
    }
    lines
}
