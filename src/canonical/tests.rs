//! Tests for the canonical builder.

use super::defaults::{self, CITATION_LINES, DEFAULT_CONTEXT, DEFAULT_GOAL};
use super::{build, looks_like_heading_token};
use crate::parse::parse;
use crate::prompt::{EnhancementOptions, ParsedPromptInput, PromptTarget, Section};

fn parsed_with_constraints(lines: &[&str]) -> ParsedPromptInput {
    ParsedPromptInput {
        goal: "Ship the importer".to_string(),
        context: "CSV files from the ERP".to_string(),
        constraints: lines.iter().map(|l| l.to_string()).collect(),
        ..Default::default()
    }
}

#[test]
fn test_empty_sections_take_documented_defaults() {
    let canonical = build(
        &ParsedPromptInput::default(),
        &EnhancementOptions::default(),
        PromptTarget::ChatGpt,
    );

    assert_eq!(canonical.goal, DEFAULT_GOAL);
    assert_eq!(canonical.context, DEFAULT_CONTEXT);
    for section in Section::LISTS {
        let expected = defaults::section_default(section);
        let actual = canonical.list(section);
        assert!(actual.len() >= 2, "{} should be defaulted", section);
        assert_eq!(actual[0], expected[0]);
        assert_eq!(actual[1], expected[1]);
    }
}

#[test]
fn test_parsed_content_replaces_default() {
    let parsed = ParsedPromptInput {
        alternatives: vec!["Use a queue".to_string()],
        ..Default::default()
    };
    let canonical = build(&parsed, &EnhancementOptions::default(), PromptTarget::Claude);
    assert_eq!(canonical.alternatives, vec!["Use a queue"]);
}

#[test]
fn test_gated_sections_are_empty() {
    let options = EnhancementOptions {
        add_file_tree_request: false,
        include_alternatives: false,
        include_revert_plan: false,
        ..Default::default()
    };
    let parsed = ParsedPromptInput {
        alternatives: vec!["ignored".to_string()],
        ..Default::default()
    };
    let canonical = build(&parsed, &options, PromptTarget::Agent);
    assert!(canonical.file_tree_request.is_empty());
    assert!(canonical.alternatives.is_empty());
    assert!(canonical.revert_plan.is_empty());
    assert!(!canonical.validation_steps.is_empty());
}

#[test]
fn test_constraints_get_option_and_target_lines_in_order() {
    let options = EnhancementOptions {
        strict_code_only: true,
        ..Default::default()
    };
    let canonical = build(&parsed_with_constraints(&["No unsafe"]), &options, PromptTarget::Claude);
    assert_eq!(
        canonical.constraints,
        vec![
            "No unsafe",
            defaults::NO_FILLER_LINE,
            defaults::MARKDOWN_LINE,
            defaults::STRICT_CODE_LINE,
            PromptTarget::Claude.policy_line(),
        ]
    );
}

#[test]
fn test_citation_lines_only_for_perplexity_when_enabled() {
    let enabled = EnhancementOptions {
        include_search_verification_requirements: true,
        ..Default::default()
    };
    let parsed = parsed_with_constraints(&["x"]);

    let perplexity = build(&parsed, &enabled, PromptTarget::Perplexity);
    for line in CITATION_LINES {
        assert!(perplexity.constraints.iter().any(|c| c == line));
    }

    let chatgpt = build(&parsed, &enabled, PromptTarget::ChatGpt);
    assert!(!chatgpt.constraints.iter().any(|c| c == CITATION_LINES[0]));

    let disabled = build(&parsed, &EnhancementOptions::default(), PromptTarget::Perplexity);
    assert!(!disabled.constraints.iter().any(|c| c == CITATION_LINES[0]));
}

#[test]
fn test_equivalent_constraints_never_both_appear() {
    let parsed = parsed_with_constraints(&[
        "Keep the API stable",
        "keep   the api STABLE",
        "respond without conversational filler, greetings, or closing remarks.",
    ]);
    let canonical = build(&parsed, &EnhancementOptions::default(), PromptTarget::ChatGpt);

    let keys: Vec<String> = canonical
        .constraints
        .iter()
        .map(|c| super::dedupe_key(c))
        .collect();
    let mut unique = keys.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(keys.len(), unique.len());
    assert_eq!(canonical.constraints[0], "Keep the API stable");
}

#[test]
fn test_heading_token_goal_falls_back() {
    let parsed = ParsedPromptInput {
        goal: "## Goal".to_string(),
        ..Default::default()
    };
    let canonical = build(&parsed, &EnhancementOptions::default(), PromptTarget::ChatGpt);
    assert_eq!(canonical.goal, DEFAULT_GOAL);

    assert!(looks_like_heading_token("### Deliverables"));
    assert!(!looks_like_heading_token("#hashtag"));
    assert!(!looks_like_heading_token("Ship it"));
}

#[test]
fn test_build_is_deterministic() {
    let parsed = parse(
        "Goal: migrate\nConstraints:\n- a\n- A\nRisks:\n- r",
        true,
    );
    let first = build(&parsed, &EnhancementOptions::default(), PromptTarget::Agent);
    for _ in 0..25 {
        assert_eq!(
            build(&parsed, &EnhancementOptions::default(), PromptTarget::Agent),
            first
        );
    }
}
