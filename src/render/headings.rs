//! Heading layouts: plain `###` blocks and the agentic variant that appends
//! an operational scaffold.

use super::{HEADING_ORDER, push_items};
use crate::prompt::{CanonicalPrompt, EnhancementOptions, Section};

/// Operational scaffold appended by the agentic layout, regardless of options.
pub const SCAFFOLD: [(&str, &[&str]); 7] = [
    (
        "Proposed File Changes",
        &["List every file to create, modify, or delete with a one-line reason."],
    ),
    (
        "Patch Plan",
        &["Describe each change as a minimal, reviewable patch."],
    ),
    (
        "Execution Order",
        &["Apply the patches in dependency order and state that order explicitly."],
    ),
    (
        "Build/Run Commands",
        &["Give the exact commands to build and run the project after the change."],
    ),
    (
        "Git/Revert Plan",
        &[
            "Commit each logical change separately with a descriptive message.",
            "Give the git commands that revert each commit.",
        ],
    ),
    (
        "Validation Commands",
        &["Give copy-paste-runnable commands that prove the change works."],
    ),
    (
        "Rollback Plan",
        &["Describe how to restore the last working state if validation fails."],
    ),
];

fn heading(out: &mut String, title: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str("### ");
    out.push_str(title);
    out.push('\n');
}

pub fn render_headings(canonical: &CanonicalPrompt, options: &EnhancementOptions) -> String {
    let mut out = String::new();
    for section in HEADING_ORDER {
        if !options.section_enabled(section) {
            continue;
        }
        heading(&mut out, section.heading());
        match section {
            Section::Goal => {
                out.push_str(&canonical.goal);
                out.push('\n');
            }
            Section::Context => {
                out.push_str(&canonical.context);
                out.push('\n');
            }
            _ => push_items(&mut out, section, canonical.list(section)),
        }
    }
    out
}

pub fn render_agentic(canonical: &CanonicalPrompt, options: &EnhancementOptions) -> String {
    let mut out = render_headings(canonical, options);
    for (title, lines) in SCAFFOLD {
        heading(&mut out, title);
        for line in lines {
            out.push_str("- ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
