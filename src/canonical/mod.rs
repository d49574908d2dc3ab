//! Canonical prompt builder.
//!
//! Merges parsed buckets with documented defaults, option-driven constraint
//! lines and per-target policy lines into one [`CanonicalPrompt`]. Every list
//! passes through [`dedupe`]; sections switched off by options stay empty.

pub mod defaults;
pub mod dedupe;

#[cfg(test)]
mod tests;

use crate::prompt::{CanonicalPrompt, EnhancementOptions, ParsedPromptInput, PromptTarget, Section};
use regex::Regex;
use std::sync::LazyLock;

pub use dedupe::{dedupe, dedupe_key, duplicates};

static HEADING_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+\S+").expect("static regex"));

/// Whether a goal is really a leftover markdown heading such as `## Goal`.
pub fn looks_like_heading_token(text: &str) -> bool {
    HEADING_TOKEN.is_match(text.trim())
}

/// Build the canonical prompt for one forge call.
pub fn build(
    parsed: &ParsedPromptInput,
    options: &EnhancementOptions,
    target: PromptTarget,
) -> CanonicalPrompt {
    let goal = parsed.goal.trim();
    let goal = if goal.is_empty() || looks_like_heading_token(goal) {
        defaults::DEFAULT_GOAL.to_string()
    } else {
        goal.to_string()
    };

    let context = parsed.context.trim();
    let context = if context.is_empty() {
        defaults::DEFAULT_CONTEXT.to_string()
    } else {
        context.to_string()
    };

    let mut canonical = CanonicalPrompt {
        goal,
        context,
        ..Default::default()
    };

    for section in Section::LISTS {
        if !options.section_enabled(section) {
            continue;
        }

        let mut lines: Vec<String> = with_default(parsed.list(section), section);
        if section == Section::Constraints {
            lines.extend(
                defaults::option_constraints(options)
                    .into_iter()
                    .chain(defaults::target_constraints(target, options))
                    .map(str::to_string),
            );
        }

        if let Some(slot) = canonical.list_mut(section) {
            *slot = dedupe(lines);
        }
    }

    tracing::debug!(
        prompt_target = %target,
        constraints = canonical.constraints.len(),
        deliverables = canonical.deliverables.len(),
        "built canonical prompt"
    );
    canonical
}

fn with_default(parsed: &[String], section: Section) -> Vec<String> {
    if parsed.iter().any(|line| !line.trim().is_empty()) {
        parsed.to_vec()
    } else {
        defaults::section_default(section)
            .iter()
            .map(|line| line.to_string())
            .collect()
    }
}
