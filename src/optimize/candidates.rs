//! Candidate rewrites of the input, generated in a fixed order.
//!
//! Every candidate after the baseline is derived from the masked text, so
//! protected spans reach the candidate only through [`Protected::restore`].

use super::contradictions::repair;
use super::gaps::{Gap, find_gaps};
use super::packs::{PackLine, output_format, success_criteria};
use super::rewrite::strip_filler;
use super::spans::Protected;
use super::types::Scenario;

pub const BASELINE: &str = "baseline";
pub const REPAIRED: &str = "repaired";
pub const STRUCTURED: &str = "structured";
pub const STRUCTURED_WITH_PACK: &str = "structured+pack";
pub const ASSISTED: &str = "assisted";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: &'static str,
    pub text: String,
    pub rules: Vec<String>,
}

const ADDED_CONSTRAINTS: [&str; 2] = [
    "Keep changes minimal and within the stated scope.",
    "State any assumption you make explicitly.",
];

const ADDED_DELIVERABLES: [&str; 2] = [
    "A complete result for the goal above.",
    "A short summary of what was done and why.",
];

fn push_section(out: &mut String, heading: &str, lines: &[&str]) {
    out.push_str("\n\n## ");
    out.push_str(heading);
    for line in lines {
        out.push_str("\n- ");
        out.push_str(line);
    }
}

fn gap_lines(gap: Gap, scenario: Scenario) -> Vec<&'static str> {
    match gap {
        Gap::Goal => Vec::new(),
        Gap::Constraints => ADDED_CONSTRAINTS.to_vec(),
        Gap::Deliverables => ADDED_DELIVERABLES.to_vec(),
        Gap::OutputFormat => vec![output_format(scenario)],
        Gap::SuccessCriteria => success_criteria(scenario).to_vec(),
    }
}

/// Fill every gap in masked prose. Returns the text and the rule labels.
fn structure(masked: &str, scenario: Scenario) -> (String, Vec<String>) {
    let gaps = find_gaps(masked);
    let body = masked.trim();
    let mut rules = Vec::new();

    let mut out = if gaps.contains(&Gap::Goal) {
        rules.push(format!("add-section:{}", Gap::Goal.label()));
        format!("## {}\n{}", Gap::Goal.heading(), body)
    } else {
        body.to_string()
    };

    for gap in gaps.into_iter().filter(|g| *g != Gap::Goal) {
        push_section(&mut out, gap.heading(), &gap_lines(gap, scenario));
        rules.push(format!("add-section:{}", gap.label()));
    }

    (out, rules)
}

/// Generate candidates: baseline, then repaired prose (when a repair
/// applied), structured, and structured with the domain pack (when the
/// pack is non-empty).
pub fn generate(
    text: &str,
    protected: &Protected,
    scenario: Scenario,
    pack: &[PackLine],
) -> Vec<Candidate> {
    let mut candidates = vec![Candidate {
        label: BASELINE,
        text: text.to_string(),
        rules: Vec::new(),
    }];

    let (repaired, mut prose_rules) = repair(protected.masked());
    let (prose, stripped) = strip_filler(&repaired);
    if stripped {
        prose_rules.push("strip-filler".to_string());
    }
    if !prose_rules.is_empty() {
        candidates.push(Candidate {
            label: REPAIRED,
            text: protected.restore(&prose),
            rules: prose_rules.clone(),
        });
    }

    let (structured, structure_rules) = structure(&prose, scenario);
    let mut rules = prose_rules;
    rules.extend(structure_rules);
    candidates.push(Candidate {
        label: STRUCTURED,
        text: protected.restore(&structured),
        rules: rules.clone(),
    });

    if !pack.is_empty() {
        let mut with_pack = structured;
        let lines: Vec<&str> = pack.iter().map(|line| line.text).collect();
        push_section(&mut with_pack, "Policy", &lines);
        rules.extend(pack.iter().map(|line| line.label.to_string()));
        candidates.push(Candidate {
            label: STRUCTURED_WITH_PACK,
            text: protected.restore(&with_pack),
            rules,
        });
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::packs::pack_lines;
    use crate::optimize::types::{ModelFamily, ToolReliability};

    #[test]
    fn rough_text_gets_every_section() {
        let text = "speed up the nightly build";
        let candidates = generate(text, &Protected::new(text), Scenario::Coding, &[]);
        let labels: Vec<&str> = candidates.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec![BASELINE, STRUCTURED]);

        let structured = &candidates[1];
        assert!(structured.text.starts_with("## Goal\nspeed up the nightly build\n\n## Constraints\n"));
        assert!(structured.text.contains("## Output Format\n- Code in fenced blocks"));
        assert!(structured.text.ends_with("- The code builds and the existing tests still pass."));
        assert_eq!(
            structured.rules,
            vec![
                "add-section:goal",
                "add-section:constraints",
                "add-section:deliverables",
                "add-section:output-format",
                "add-section:success-criteria",
            ]
        );
    }

    #[test]
    fn existing_sections_are_not_duplicated() {
        let text = "Goal: ship it\nConstraints:\n- no downtime";
        let candidates = generate(text, &Protected::new(text), Scenario::General, &[]);
        let structured = &candidates[1].text;
        assert_eq!(structured.matches("Constraints").count(), 1);
        assert!(!structured.contains("## Goal"));
        assert!(structured.contains("## Deliverables"));
    }

    #[test]
    fn pack_candidate_appends_policy() {
        let text = "list large files";
        let pack = pack_lines(ModelFamily::Generic, Scenario::Cli, ToolReliability::High);
        let candidates = generate(text, &Protected::new(text), Scenario::Cli, &pack);
        let last = candidates.last().unwrap();
        assert_eq!(last.label, STRUCTURED_WITH_PACK);
        assert!(last.text.contains("\n\n## Policy\n- Answer with shell commands only"));
        assert_eq!(last.rules.last().map(String::as_str), Some("pack:cli-shell-only"));
    }

    #[test]
    fn filler_produces_repaired_candidate() {
        let text = "Please fix {module} in src/app.rs. Thanks!";
        let candidates = generate(text, &Protected::new(text), Scenario::General, &[]);
        assert_eq!(candidates[1].label, REPAIRED);
        assert_eq!(candidates[1].text, "Fix {module} in src/app.rs.");
        assert_eq!(candidates[1].rules, vec!["strip-filler"]);
    }
}
