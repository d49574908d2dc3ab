//! Quality check engine.
//!
//! [`run_checks`] inspects a generated prompt and the content it was built
//! from and returns an ordered checklist. Failures are data, never errors:
//! callers decide whether an error-severity failure is fatal.
//!
//! Checks, in order:
//! 1. Goal present (error)
//! 2. Goal is not a bare heading (error)
//! 3. Context present (warning)
//! 4. Constraints present, when required (warning)
//! 5. Deliverables present (warning)
//! 6. Prompt length at least the configured minimum (warning)
//! 7. Every detected variable filled (error)
//! 8. No duplicate constraints (warning)
//! 9. Required heading/tag order for the target (error)

pub mod types;

#[cfg(test)]
mod tests;

pub use types::{QualityCheck, Severity, all_clear, format_checklist};

use crate::canonical::{duplicates, looks_like_heading_token};
use crate::parse::headings::is_bare_heading;
use crate::prompt::{EnhancementOptions, PromptTarget};
use crate::render::{required_markers, validate_order};
use crate::variables::VariableResolution;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_MIN_PROMPT_LENGTH: usize = 120;

/// Section requirements that tune which checks can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionsConfig {
    /// Minimum generated prompt length, in characters.
    pub min_prompt_length: usize,
    /// Whether an empty constraints section is reported.
    pub require_constraints: bool,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            min_prompt_length: DEFAULT_MIN_PROMPT_LENGTH,
            require_constraints: true,
        }
    }
}

/// Everything the checks look at.
///
/// `goal`, `context`, `constraints` and `deliverables` are the values
/// recovered from the input before defaulting, so an input missing a
/// section is reported even though the rendered prompt carries a default.
#[derive(Debug, Clone, Copy)]
pub struct QualityInput<'a> {
    pub goal: &'a str,
    pub context: &'a str,
    pub constraints: &'a [String],
    pub deliverables: &'a [String],
    pub variables: &'a BTreeMap<String, String>,
    pub sections: &'a SectionsConfig,
    pub resolution: &'a VariableResolution,
    pub generated: &'a str,
    pub target: PromptTarget,
    pub options: &'a EnhancementOptions,
}

fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

fn has_items(items: &[String]) -> bool {
    items.iter().any(|item| has_text(item))
}

/// Run every check in fixed order.
pub fn run_checks(input: &QualityInput<'_>) -> Vec<QualityCheck> {
    let mut checks = Vec::with_capacity(9);

    let goal = input.goal.trim();
    checks.push(QualityCheck::check("Goal present", has_text(goal), Severity::Error, || {
        "no goal was found in the input".to_string()
    }));
    checks.push(QualityCheck::check(
        "Goal is not a bare heading",
        !(is_bare_heading(goal) || looks_like_heading_token(goal)),
        Severity::Error,
        || format!("goal '{}' is only a heading", goal),
    ));

    checks.push(QualityCheck::check(
        "Context present",
        has_text(input.context),
        Severity::Warning,
        || "no context was found in the input".to_string(),
    ));

    let constraints_ok = !input.sections.require_constraints || has_items(input.constraints);
    checks.push(QualityCheck::check(
        "Constraints present",
        constraints_ok,
        Severity::Warning,
        || "no constraints were found in the input".to_string(),
    ));

    checks.push(QualityCheck::check(
        "Deliverables present",
        has_items(input.deliverables),
        Severity::Warning,
        || "no deliverables were found in the input".to_string(),
    ));

    let length = input.generated.chars().count();
    let min = input.sections.min_prompt_length;
    checks.push(QualityCheck::check(
        "Prompt length",
        length >= min,
        Severity::Warning,
        || format!("{} characters, expected at least {}", length, min),
    ));

    let unfilled = unfilled_variables(input.variables, input.resolution);
    checks.push(QualityCheck::check(
        "Variables filled",
        unfilled.is_empty(),
        Severity::Error,
        || format!("unfilled: {}", unfilled.join(", ")),
    ));

    let repeated = duplicates(input.constraints);
    checks.push(QualityCheck::check(
        "No duplicate constraints",
        repeated.is_empty(),
        Severity::Warning,
        || format!("repeated: {}", repeated.join("; ")),
    ));

    let order = validate_order(
        input.generated,
        &required_markers(input.target, input.options),
    );
    checks.push(match order {
        Ok(()) => QualityCheck::pass("Section order"),
        Err(violation) => QualityCheck::fail(
            "Section order",
            Severity::Error,
            format!("{} for target {}", violation, input.target),
        ),
    });

    let failed = checks.iter().filter(|c| !c.passed).count();
    tracing::debug!(failed, total = checks.len(), "quality checks complete");
    checks
}

/// Detected names with no non-blank value, in first-seen order.
fn unfilled_variables(
    values: &BTreeMap<String, String>,
    resolution: &VariableResolution,
) -> Vec<String> {
    let mut names: Vec<String> = resolution.unfilled.clone();
    for name in &resolution.detected {
        let blank = values.get(name).is_none_or(|v| v.trim().is_empty());
        if blank && !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}
