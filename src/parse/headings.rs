//! Heading detection against a normalized synonym table.

use crate::prompt::Section;

/// Normalized heading name → section.
///
/// Keys are lowercase with single spaces; lookups normalize the same way.
const SYNONYMS: &[(&str, Section)] = &[
    ("goal", Section::Goal),
    ("goals", Section::Goal),
    ("objective", Section::Goal),
    ("objectives", Section::Goal),
    ("task", Section::Goal),
    ("aim", Section::Goal),
    ("purpose", Section::Goal),
    ("mission", Section::Goal),
    ("context", Section::Context),
    ("background", Section::Context),
    ("situation", Section::Context),
    ("overview", Section::Context),
    ("current state", Section::Context),
    ("assumptions", Section::Assumptions),
    ("assumption", Section::Assumptions),
    ("file tree", Section::FileTreeRequest),
    ("file tree request", Section::FileTreeRequest),
    ("file structure", Section::FileTreeRequest),
    ("project structure", Section::FileTreeRequest),
    ("repo structure", Section::FileTreeRequest),
    ("repository structure", Section::FileTreeRequest),
    ("constraints", Section::Constraints),
    ("constraint", Section::Constraints),
    ("requirements", Section::Constraints),
    ("rules", Section::Constraints),
    ("restrictions", Section::Constraints),
    ("limitations", Section::Constraints),
    ("guidelines", Section::Constraints),
    ("deliverables", Section::Deliverables),
    ("deliverable", Section::Deliverables),
    ("output", Section::Deliverables),
    ("outputs", Section::Deliverables),
    ("expected output", Section::Deliverables),
    ("expected outputs", Section::Deliverables),
    ("implementation details", Section::ImplementationDetails),
    ("implementation", Section::ImplementationDetails),
    ("implementation notes", Section::ImplementationDetails),
    ("technical details", Section::ImplementationDetails),
    ("approach", Section::ImplementationDetails),
    ("verification checklist", Section::VerificationChecklist),
    ("verification", Section::VerificationChecklist),
    ("checklist", Section::VerificationChecklist),
    ("acceptance criteria", Section::VerificationChecklist),
    ("definition of done", Section::VerificationChecklist),
    ("risks", Section::RisksAndEdgeCases),
    ("risk", Section::RisksAndEdgeCases),
    ("edge cases", Section::RisksAndEdgeCases),
    ("edge case", Section::RisksAndEdgeCases),
    ("risks and edge cases", Section::RisksAndEdgeCases),
    ("pitfalls", Section::RisksAndEdgeCases),
    ("alternatives", Section::Alternatives),
    ("alternative", Section::Alternatives),
    ("alternative approaches", Section::Alternatives),
    ("validation steps", Section::ValidationSteps),
    ("validation", Section::ValidationSteps),
    ("test plan", Section::ValidationSteps),
    ("testing", Section::ValidationSteps),
    ("revert plan", Section::RevertPlan),
    ("rollback plan", Section::RevertPlan),
    ("rollback", Section::RevertPlan),
    ("revert", Section::RevertPlan),
];

/// A detected heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub section: Section,
    /// Inline value from a `Name: value` line, if non-empty.
    pub value: Option<String>,
}

/// Lowercase, `&` → `and`, whitespace collapsed to single spaces.
pub fn normalize_name(name: &str) -> String {
    name.replace('&', " and ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Look up a normalized heading name.
pub fn lookup(name: &str) -> Option<Section> {
    let key = normalize_name(name);
    SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map(|(_, section)| *section)
}

/// Name inside an `<name>` tag line, e.g. `objective` for `<objective>`.
fn opening_tag(text: &str) -> Option<&str> {
    let name = text.strip_prefix('<')?.strip_suffix('>')?;
    (!name.starts_with('/')).then_some(name)
}

/// Whether a line is a closing tag such as `</constraints>` for a known
/// section name.
pub fn is_closing_tag(line: &str) -> bool {
    line.trim()
        .strip_prefix("</")
        .and_then(|rest| rest.strip_suffix('>'))
        .is_some_and(|name| lookup(name).is_some())
}

/// Whether a line is an opening or closing tag for a known section name.
pub fn is_tag_line(line: &str) -> bool {
    is_closing_tag(line) || opening_tag(line.trim()).is_some_and(|name| lookup(name).is_some())
}

/// Detect whether a line is a section heading.
///
/// Leading markdown hashes and bold markers are ignored. The text up to an
/// optional colon must match the synonym table; text after the colon is
/// returned as the inline value. An `<objective>`-style tag line naming a
/// known section is a heading too.
pub fn detect_heading(line: &str) -> Option<Heading> {
    let trimmed = line.trim();
    if let Some(name) = opening_tag(trimmed) {
        return lookup(name).map(|section| Heading {
            section,
            value: None,
        });
    }

    let text = trimmed.trim_start_matches('#').trim();
    if text.is_empty() {
        return None;
    }

    let (name, value) = match text.split_once(':') {
        Some((name, value)) => (name, Some(value)),
        None => (text, None),
    };

    let name = name.trim_matches(|c: char| c == '*' || c == '_' || c.is_whitespace());
    let section = lookup(name)?;

    let value = value
        .map(|v| v.trim_start_matches(['*', '_']).trim().to_string())
        .filter(|v| !v.is_empty());

    Some(Heading { section, value })
}

/// Whether `text` is nothing more than a heading token, such as `## Goal`
/// or `Constraints:`.
pub fn is_bare_heading(text: &str) -> bool {
    matches!(detect_heading(text), Some(Heading { value: None, .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_markdown_and_colon_headings() {
        assert_eq!(
            detect_heading("## Objective"),
            Some(Heading {
                section: Section::Goal,
                value: None
            })
        );
        assert_eq!(
            detect_heading("Rollback plan:"),
            Some(Heading {
                section: Section::RevertPlan,
                value: None
            })
        );
        assert_eq!(
            detect_heading("**Edge Cases**"),
            Some(Heading {
                section: Section::RisksAndEdgeCases,
                value: None
            })
        );
    }

    #[test]
    fn inline_value_seeds_bucket() {
        let heading = detect_heading("Goal: Build a CLI").unwrap();
        assert_eq!(heading.section, Section::Goal);
        assert_eq!(heading.value.as_deref(), Some("Build a CLI"));

        let heading = detect_heading("**Constraints:** no unsafe").unwrap();
        assert_eq!(heading.section, Section::Constraints);
        assert_eq!(heading.value.as_deref(), Some("no unsafe"));
    }

    #[test]
    fn prose_is_not_a_heading() {
        assert_eq!(detect_heading("The goal is to ship"), None);
        assert_eq!(detect_heading("# Introduction"), None);
        assert_eq!(detect_heading(""), None);
        assert_eq!(detect_heading("   "), None);
    }

    #[test]
    fn wrapper_tags_are_headings() {
        assert_eq!(
            detect_heading("<objective>"),
            Some(Heading {
                section: Section::Goal,
                value: None
            })
        );
        assert_eq!(
            detect_heading("  <deliverables>  ").map(|h| h.section),
            Some(Section::Deliverables)
        );
        assert_eq!(detect_heading("</objective>"), None);
        assert_eq!(detect_heading("<div>"), None);
        assert!(is_closing_tag("</constraints>"));
        assert!(!is_closing_tag("</div>"));
        assert!(is_tag_line("<context>"));
        assert!(!is_tag_line("<context> and more"));
    }

    #[test]
    fn normalization_collapses_case_space_and_ampersand() {
        assert_eq!(normalize_name("  Risks   &  Edge\tCases "), "risks and edge cases");
        assert_eq!(lookup("RISKS & EDGE CASES"), Some(Section::RisksAndEdgeCases));
    }

    #[test]
    fn bare_heading_detection() {
        assert!(is_bare_heading("## Goal"));
        assert!(is_bare_heading("Constraints:"));
        assert!(!is_bare_heading("Goal: ship the parser"));
        assert!(!is_bare_heading("Ship the parser"));
    }
}
