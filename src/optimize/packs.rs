//! Domain packs: fixed policy lines keyed by (family, scenario).

use super::types::{ModelFamily, Scenario, ToolReliability};

/// One injected policy line with the rule label reported for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackLine {
    pub label: &'static str,
    pub text: &'static str,
}

const CLI_SHELL_ONLY: PackLine = PackLine {
    label: "pack:cli-shell-only",
    text: "Answer with shell commands only, each copy-paste runnable as written; put any explanation in `#` comments.",
};

const JSON_STRICT: PackLine = PackLine {
    label: "pack:json-strict",
    text: "Return strictly valid JSON and nothing else: no prose, no markdown fences, no trailing commas.",
};

const TOOL_PLAN: PackLine = PackLine {
    label: "pack:tool-plan",
    text: "Before acting, list the tool calls you will make, in order, with their arguments.",
};

const TOOL_MANUAL_FALLBACK: PackLine = PackLine {
    label: "pack:tool-manual-fallback",
    text: "If a tool call fails or is unavailable, give the equivalent manual steps and continue.",
};

const CODING_TESTS: PackLine = PackLine {
    label: "pack:coding-tests",
    text: "Add or update tests that cover the change.",
};

const CITATIONS: PackLine = PackLine {
    label: "pack:citations",
    text: "Cite a source URL for every factual claim, next to the claim.",
};

const IDE_FILE_CHANGES: PackLine = PackLine {
    label: "pack:ide-file-changes",
    text: "List every file you change by path, then give the commands that validate the change.",
};

/// Policy lines for a (family, scenario) pair, in fixed order: scenario
/// lines first, then family lines.
pub fn pack_lines(
    family: ModelFamily,
    scenario: Scenario,
    reliability: ToolReliability,
) -> Vec<PackLine> {
    let mut lines = Vec::new();
    match scenario {
        Scenario::Cli => lines.push(CLI_SHELL_ONLY),
        Scenario::Json => lines.push(JSON_STRICT),
        Scenario::ToolAgent => {
            lines.push(TOOL_PLAN);
            if reliability == ToolReliability::Low {
                lines.push(TOOL_MANUAL_FALLBACK);
            }
        }
        Scenario::Coding => lines.push(CODING_TESTS),
        Scenario::Research => lines.push(CITATIONS),
        Scenario::General => {}
    }

    match family {
        ModelFamily::Perplexity if !lines.contains(&CITATIONS) => lines.push(CITATIONS),
        ModelFamily::IdeAgent => lines.push(IDE_FILE_CHANGES),
        _ => {}
    }
    lines
}

/// Output format guidance per scenario, used when the optimizer adds an
/// Output Format section.
pub fn output_format(scenario: Scenario) -> &'static str {
    match scenario {
        Scenario::General => "Markdown with a short heading per deliverable.",
        Scenario::Coding => {
            "Code in fenced blocks labelled with the language, followed by a brief explanation."
        }
        Scenario::Cli => "A single fenced `bash` block, one command per line.",
        Scenario::Json => "A single JSON document.",
        Scenario::ToolAgent => "A numbered tool-call plan, then the final answer.",
        Scenario::Research => "Findings as bullet points, each followed by its source.",
    }
}

/// Success criteria per scenario, used when the optimizer adds a Success
/// Criteria section.
pub fn success_criteria(scenario: Scenario) -> [&'static str; 2] {
    let specific = match scenario {
        Scenario::General => "The answer addresses the goal without unrequested extras.",
        Scenario::Coding => "The code builds and the existing tests still pass.",
        Scenario::Cli => "Every command runs as written on a standard shell.",
        Scenario::Json => "The output parses as JSON on the first attempt.",
        Scenario::ToolAgent => "Every planned tool call either succeeds or has a manual fallback.",
        Scenario::Research => "Every claim is traceable to a cited source.",
    };
    [
        "Every deliverable is present and respects the constraints.",
        specific,
    ]
}
