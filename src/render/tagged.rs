//! Tag-wrapped layout.

use super::push_items;
use crate::prompt::{CanonicalPrompt, EnhancementOptions, Section};

/// Wrapper names, in the order they appear. Each is emitted exactly once.
pub const TAG_WRAPPERS: [&str; 4] = ["objective", "context", "constraints", "deliverables"];

/// Optional sections carried inside the deliverables wrapper when enabled.
const DELIVERABLE_EXTRAS: [Section; 5] = [
    Section::VerificationChecklist,
    Section::RisksAndEdgeCases,
    Section::Alternatives,
    Section::ValidationSteps,
    Section::RevertPlan,
];

fn open(out: &mut String, name: &str) {
    out.push('<');
    out.push_str(name);
    out.push_str(">\n");
}

fn close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

/// Whether a line, ignoring surrounding whitespace, is a wrapper tag.
fn is_wrapper_line(line: &str) -> bool {
    let line = line.trim();
    TAG_WRAPPERS.iter().any(|name| {
        line.strip_prefix('<')
            .map(|rest| rest.strip_prefix('/').unwrap_or(rest))
            .and_then(|rest| rest.strip_suffix('>'))
            == Some(*name)
    })
}

/// Free text, with any line that would read as a wrapper tag escaped so
/// each wrapper still appears exactly once.
fn push_text(out: &mut String, text: &str) {
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            out.push('\n');
        }
        if is_wrapper_line(line) {
            out.push('\\');
        }
        out.push_str(line);
    }
    out.push('\n');
}

/// A labelled list block inside a wrapper; skipped when gated or empty.
fn labelled(
    out: &mut String,
    canonical: &CanonicalPrompt,
    options: &EnhancementOptions,
    section: Section,
) {
    let items = canonical.list(section);
    if !options.section_enabled(section) || items.is_empty() {
        return;
    }
    out.push_str(section.heading());
    out.push_str(":\n");
    push_items(out, section, items);
    out.push('\n');
}

pub fn render_tagged(canonical: &CanonicalPrompt, options: &EnhancementOptions) -> String {
    let mut out = String::new();

    open(&mut out, "objective");
    push_text(&mut out, &canonical.goal);
    close(&mut out, "objective");
    out.push('\n');

    open(&mut out, "context");
    labelled(&mut out, canonical, options, Section::Assumptions);
    labelled(&mut out, canonical, options, Section::FileTreeRequest);
    out.push_str("Context:\n");
    push_text(&mut out, &canonical.context);
    close(&mut out, "context");
    out.push('\n');

    open(&mut out, "constraints");
    push_items(&mut out, Section::Constraints, &canonical.constraints);
    close(&mut out, "constraints");
    out.push('\n');

    open(&mut out, "deliverables");
    labelled(&mut out, canonical, options, Section::Deliverables);
    labelled(&mut out, canonical, options, Section::ImplementationDetails);
    for section in DELIVERABLE_EXTRAS {
        labelled(&mut out, canonical, options, section);
    }
    // No blank line before the closing tag.
    while out.ends_with("\n\n") {
        out.pop();
    }
    close(&mut out, "deliverables");

    out
}
