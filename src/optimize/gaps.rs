//! Gap analysis: which structural markers a prompt is missing.

use crate::parse::headings::{detect_heading, normalize_name};
use crate::prompt::Section;
use std::fmt;

/// A structural marker a strong prompt states explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Gap {
    Goal,
    Constraints,
    Deliverables,
    OutputFormat,
    SuccessCriteria,
}

impl Gap {
    pub const ALL: [Gap; 5] = [
        Gap::Goal,
        Gap::Constraints,
        Gap::Deliverables,
        Gap::OutputFormat,
        Gap::SuccessCriteria,
    ];

    /// Heading used when the optimizer adds this section.
    pub fn heading(self) -> &'static str {
        match self {
            Gap::Goal => "Goal",
            Gap::Constraints => "Constraints",
            Gap::Deliverables => "Deliverables",
            Gap::OutputFormat => "Output Format",
            Gap::SuccessCriteria => "Success Criteria",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gap::Goal => "goal",
            Gap::Constraints => "constraints",
            Gap::Deliverables => "deliverables",
            Gap::OutputFormat => "output-format",
            Gap::SuccessCriteria => "success-criteria",
        }
    }
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

const OUTPUT_FORMAT_NAMES: [&str; 5] = [
    "output format",
    "format",
    "response format",
    "answer format",
    "return format",
];

const SUCCESS_NAMES: [&str; 7] = [
    "success criteria",
    "success criterion",
    "acceptance criteria",
    "definition of done",
    "done when",
    "verification checklist",
    "expected result",
];

/// Which markers a single line carries, if it is a heading line.
fn line_markers(line: &str) -> Option<Gap> {
    let text = line.trim().trim_start_matches('#').trim();
    let name = text.split_once(':').map_or(text, |(name, _)| name);
    let name = normalize_name(name.trim_matches(|c: char| c == '*' || c == '_' || c.is_whitespace()));

    if OUTPUT_FORMAT_NAMES.contains(&name.as_str()) {
        return Some(Gap::OutputFormat);
    }
    if SUCCESS_NAMES.contains(&name.as_str()) {
        return Some(Gap::SuccessCriteria);
    }

    match detect_heading(line)?.section {
        Section::Goal => Some(Gap::Goal),
        Section::Constraints => Some(Gap::Constraints),
        Section::Deliverables => Some(Gap::Deliverables),
        _ => None,
    }
}

/// The markers present in `text`, in [`Gap::ALL`] order.
pub fn present_markers(text: &str) -> Vec<Gap> {
    let mut found: Vec<Gap> = text.lines().filter_map(line_markers).collect();
    found.sort();
    found.dedup();
    found
}

/// The markers missing from `text`, in [`Gap::ALL`] order.
pub fn find_gaps(text: &str) -> Vec<Gap> {
    let present = present_markers(text);
    Gap::ALL
        .into_iter()
        .filter(|gap| !present.contains(gap))
        .collect()
}

/// A prompt with every marker present needs no restructuring.
pub fn is_well_structured(text: &str) -> bool {
    find_gaps(text).is_empty()
}
