//! The primary forge pipeline.
//!
//! Variable resolution, parsing, canonical building, rendering and quality
//! checks run in sequence over an explicit [`ForgeSession`]. Nothing here
//! reads global state, so identical sessions and inputs always produce
//! identical output.

use crate::canonical;
use crate::parse;
use crate::prompt::{CanonicalPrompt, EnhancementOptions, ParsedPromptInput, PromptTarget};
use crate::quality::{self, QualityCheck, QualityInput, SectionsConfig, Severity};
use crate::render;
use crate::variables::{self, VariableResolution};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings for one forge call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForgeSession {
    pub target: PromptTarget,
    pub options: EnhancementOptions,
    pub variables: BTreeMap<String, String>,
    pub sections: SectionsConfig,
}

impl ForgeSession {
    pub fn new(target: PromptTarget) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: EnhancementOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }
}

/// Everything a forge call produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgeOutput {
    pub prompt: String,
    pub canonical: CanonicalPrompt,
    pub parsed: ParsedPromptInput,
    pub variables: VariableResolution,
    pub checks: Vec<QualityCheck>,
    pub status: String,
}

impl ForgeOutput {
    /// True when no failed check has error severity.
    pub fn passed(&self) -> bool {
        quality::all_clear(&self.checks)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &QualityCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Run the forge pipeline on `raw`.
pub fn forge(session: &ForgeSession, raw: &str) -> ForgeOutput {
    let resolution = variables::resolve(raw, &session.variables);
    let parsed = parse::parse(
        &resolution.resolved_text,
        session.options.prefer_section_aware_parsing,
    );
    let canonical = canonical::build(&parsed, &session.options, session.target);
    let prompt = render::render(&canonical, &session.options, session.target);

    let checks = quality::run_checks(&QualityInput {
        goal: &parsed.goal,
        context: &parsed.context,
        constraints: &parsed.constraints,
        deliverables: &parsed.deliverables,
        variables: &session.variables,
        sections: &session.sections,
        resolution: &resolution,
        generated: &prompt,
        target: session.target,
        options: &session.options,
    });

    let status = status_message(session.target, &checks);
    tracing::debug!(prompt_target = %session.target, %status, "forge complete");

    ForgeOutput {
        prompt,
        canonical,
        parsed,
        variables: resolution,
        checks,
        status,
    }
}

fn status_message(target: PromptTarget, checks: &[QualityCheck]) -> String {
    let count = |severity: Severity| {
        checks
            .iter()
            .filter(|c| !c.passed && c.severity == severity)
            .count()
    };
    let errors = count(Severity::Error);
    let warnings = count(Severity::Warning);

    match (errors, warnings) {
        (0, 0) => format!("Prompt ready for {}: all checks passed", target),
        (0, w) => format!("Prompt ready for {} with {} warning(s)", target, w),
        (e, _) => format!("Prompt generated for {} with {} blocking issue(s)", target, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "Goal: write release notes for {version}\n\
Context: the changelog lives in CHANGELOG.md\n\
Constraints:\n- plain language\n\
Deliverables:\n- notes in markdown";

    #[test]
    fn forge_resolves_variables_before_parsing() {
        let session = ForgeSession::new(PromptTarget::Claude).with_variable("version", "2.1.0");
        let out = forge(&session, RAW);

        assert_eq!(out.parsed.goal, "write release notes for 2.1.0");
        assert!(out.prompt.contains("write release notes for 2.1.0"));
        assert!(out.variables.unfilled.is_empty());
        assert!(out.passed());
        assert_eq!(out.status, "Prompt ready for claude: all checks passed");
    }

    #[test]
    fn unfilled_variable_blocks() {
        let out = forge(&ForgeSession::new(PromptTarget::ChatGpt), RAW);
        assert!(!out.passed());
        assert_eq!(out.variables.unfilled, vec!["version"]);
        assert_eq!(
            out.status,
            "Prompt generated for chatgpt with 1 blocking issue(s)"
        );
        assert_eq!(out.failed_checks().count(), 1);
    }

    #[test]
    fn rough_input_warns_but_passes() {
        let out = forge(&ForgeSession::new(PromptTarget::Agent), "clean up the logging");
        assert!(out.passed());
        assert_eq!(out.canonical.goal, "clean up the logging");
        assert_eq!(out.status, "Prompt ready for agent with 3 warning(s)");
    }

    #[test]
    fn section_aware_parsing_can_be_disabled() {
        let options = EnhancementOptions {
            prefer_section_aware_parsing: false,
            ..Default::default()
        };
        let session = ForgeSession::new(PromptTarget::Claude)
            .with_options(options)
            .with_variable("version", "1");
        let out = forge(&session, RAW);
        assert_eq!(out.parsed.goal, "Goal: write release notes for 1");
        assert!(out.parsed.constraints.is_empty());
    }

    #[test]
    fn forge_is_deterministic() {
        let session = ForgeSession::new(PromptTarget::Perplexity).with_variable("version", "3");
        let first = forge(&session, RAW);
        for _ in 0..20 {
            assert_eq!(forge(&session, RAW), first);
        }
    }
}
