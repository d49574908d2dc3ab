//! Tests for the quality check engine.

use super::*;
use crate::canonical::build;
use crate::parse::parse;
use crate::render::render;
use crate::variables::resolve;

struct Fixture {
    goal: String,
    context: String,
    constraints: Vec<String>,
    deliverables: Vec<String>,
    variables: BTreeMap<String, String>,
    sections: SectionsConfig,
    resolution: VariableResolution,
    generated: String,
    target: PromptTarget,
    options: EnhancementOptions,
}

impl Fixture {
    /// Run the real pipeline on `raw` so the generated text is well formed.
    fn from_raw(raw: &str, target: PromptTarget, variables: &[(&str, &str)]) -> Self {
        let variables: BTreeMap<String, String> = variables
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let options = EnhancementOptions::default();
        let resolution = resolve(raw, &variables);
        let parsed = parse(&resolution.resolved_text, true);
        let canonical = build(&parsed, &options, target);
        let generated = render(&canonical, &options, target);
        Self {
            goal: parsed.goal,
            context: parsed.context,
            constraints: parsed.constraints,
            deliverables: parsed.deliverables,
            variables,
            sections: SectionsConfig::default(),
            resolution,
            generated,
            target,
            options,
        }
    }

    fn run(&self) -> Vec<QualityCheck> {
        run_checks(&QualityInput {
            goal: &self.goal,
            context: &self.context,
            constraints: &self.constraints,
            deliverables: &self.deliverables,
            variables: &self.variables,
            sections: &self.sections,
            resolution: &self.resolution,
            generated: &self.generated,
            target: self.target,
            options: &self.options,
        })
    }
}

fn find<'a>(checks: &'a [QualityCheck], title: &str) -> &'a QualityCheck {
    checks
        .iter()
        .find(|c| c.title == title)
        .unwrap_or_else(|| panic!("missing check {}", title))
}

const COMPLETE: &str = "Goal: add retry to the uploader\n\
Context: uploads fail on flaky networks\n\
Constraints:\n- no new crates\n\
Deliverables:\n- patch with tests";

#[test]
fn test_complete_input_passes_everything() {
    let checks = Fixture::from_raw(COMPLETE, PromptTarget::Claude, &[]).run();
    assert_eq!(checks.len(), 9);
    for check in &checks {
        assert!(check.passed, "{:?}", check);
        assert_eq!(check.severity, Severity::Info);
    }
    assert!(all_clear(&checks));
}

#[test]
fn test_checks_have_fixed_order() {
    let checks = Fixture::from_raw(COMPLETE, PromptTarget::Agent, &[]).run();
    let titles: Vec<&str> = checks.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Goal present",
            "Goal is not a bare heading",
            "Context present",
            "Constraints present",
            "Deliverables present",
            "Prompt length",
            "Variables filled",
            "No duplicate constraints",
            "Section order",
        ]
    );
}

#[test]
fn test_missing_sections_warn() {
    let checks = Fixture::from_raw("Fix the login bug", PromptTarget::ChatGpt, &[]).run();
    assert!(find(&checks, "Goal present").passed);
    for title in ["Context present", "Constraints present", "Deliverables present"] {
        let check = find(&checks, title);
        assert!(!check.passed, "{}", title);
        assert_eq!(check.severity, Severity::Warning);
    }
    assert!(all_clear(&checks));
}

#[test]
fn test_constraints_not_required() {
    let mut fixture = Fixture::from_raw("Fix the login bug", PromptTarget::ChatGpt, &[]);
    fixture.sections.require_constraints = false;
    assert!(find(&fixture.run(), "Constraints present").passed);
}

#[test]
fn test_bare_heading_goal_is_error() {
    let mut fixture = Fixture::from_raw(COMPLETE, PromptTarget::Claude, &[]);
    fixture.goal = "## Goal".to_string();
    let checks = fixture.run();
    let check = find(&checks, "Goal is not a bare heading");
    assert!(!check.passed);
    assert_eq!(check.severity, Severity::Error);
    assert!(!all_clear(&checks));
}

#[test]
fn test_unfilled_variables_named_in_detail() {
    let raw = "Goal: email {customer} about {order_id}\nContext: refunds\n\
Constraints:\n- polite\nDeliverables:\n- email";
    let checks = Fixture::from_raw(raw, PromptTarget::Claude, &[("customer", "Ada")]).run();
    let check = find(&checks, "Variables filled");
    assert!(!check.passed);
    assert_eq!(check.severity, Severity::Error);
    assert_eq!(check.detail.as_deref(), Some("unfilled: order_id"));
}

#[test]
fn test_blank_variable_value_is_unfilled() {
    let raw = "Goal: greet {name}\nContext: c\nConstraints:\n- x\nDeliverables:\n- y";
    let checks = Fixture::from_raw(raw, PromptTarget::Claude, &[("name", "   ")]).run();
    assert_eq!(
        find(&checks, "Variables filled").detail.as_deref(),
        Some("unfilled: name")
    );
}

#[test]
fn test_duplicate_constraints_warn() {
    let raw = "Goal: g\nContext: c\nConstraints:\n- Keep it small\n- keep  it SMALL\nDeliverables:\n- d";
    let checks = Fixture::from_raw(raw, PromptTarget::Claude, &[]).run();
    let check = find(&checks, "No duplicate constraints");
    assert!(!check.passed);
    assert_eq!(check.severity, Severity::Warning);
    assert_eq!(check.detail.as_deref(), Some("repeated: keep  it SMALL"));
}

#[test]
fn test_short_prompt_warns() {
    let mut fixture = Fixture::from_raw(COMPLETE, PromptTarget::Claude, &[]);
    fixture.sections.min_prompt_length = 100_000;
    let check = find(&fixture.run(), "Prompt length").clone();
    assert!(!check.passed);
    assert_eq!(check.severity, Severity::Warning);
}

#[test]
fn test_section_order_violation_is_error() {
    let mut fixture = Fixture::from_raw(COMPLETE, PromptTarget::ChatGpt, &[]);
    fixture.generated = fixture.generated.replace("### Goal\n", "### Aim\n");
    let checks = fixture.run();
    let check = find(&checks, "Section order");
    assert!(!check.passed);
    assert_eq!(check.severity, Severity::Error);
    assert_eq!(
        check.detail.as_deref(),
        Some("'### Goal' is missing for target chatgpt")
    );
}

#[test]
fn test_format_checklist_marks() {
    let checks = vec![
        QualityCheck::pass("Goal present"),
        QualityCheck::fail("Context present", Severity::Warning, "none"),
        QualityCheck::fail("Variables filled", Severity::Error, "unfilled: x"),
    ];
    assert_eq!(
        format_checklist(&checks),
        "[ok]    Goal present\n[warn]  Context present: none\n[FAIL]  Variables filled: unfilled: x\n"
    );
}
