//! Tests for config functionality.

use crate::config::{Config, DEFAULT_TIMEOUT_MS};
use crate::optimize::{DEFAULT_IMPROVEMENT_MARGIN, MAX_IMPROVEMENT_MARGIN, ModelFamily, Scenario};
use crate::prompt::PromptTarget;
use std::time::Duration;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.default_target, PromptTarget::Claude);
    assert!(config.options.enforce_markdown);
    assert!(!config.options.strict_code_only);
    assert_eq!(config.min_prompt_length, 120);
    assert!(config.require_constraints);
    assert_eq!(config.default_family, ModelFamily::Generic);
    assert_eq!(config.default_scenario, Scenario::General);
    assert_eq!(config.optimizer.improvement_margin, DEFAULT_IMPROVEMENT_MARGIN);
    assert!(!config.optimizer.calibrate_from_history);
    assert_eq!(config.completion.command, None);
    assert_eq!(config.completion.timeout_ms, DEFAULT_TIMEOUT_MS);
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();

    // Should use all defaults
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
default_target: agent
min_prompt_length: 200
options:
  includeAlternatives: false
"#;
    let config = Config::from_yaml(yaml).unwrap();

    // Specified values should be used
    assert_eq!(config.default_target, PromptTarget::Agent);
    assert_eq!(config.min_prompt_length, 200);
    assert!(!config.options.include_alternatives);

    // Unspecified values should use defaults, including sibling options
    assert!(config.options.include_revert_plan);
    assert!(config.require_constraints);
    assert_eq!(config.completion.timeout_ms, DEFAULT_TIMEOUT_MS);
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
default_target: perplexity
options:
  enforceMarkdown: false
  strictCodeOnly: true
min_prompt_length: 80
require_constraints: false
default_family: ide-agent
default_scenario: tool-agent
optimizer:
  weights:
    sections: 0.3
    format: 0.3
    success: 0.2
    lengthPenalty: 0.2
  improvement_margin: 0.25
  calibrate_from_history: true
completion:
  command: "llm-helper --mode rewrite"
  timeout_ms: 2500
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.default_target, PromptTarget::Perplexity);
    assert!(!config.options.enforce_markdown);
    assert!(config.options.strict_code_only);
    assert_eq!(config.min_prompt_length, 80);
    assert!(!config.require_constraints);
    assert_eq!(config.default_family, ModelFamily::IdeAgent);
    assert_eq!(config.default_scenario, Scenario::ToolAgent);
    assert_eq!(config.optimizer.weights.length_penalty, 0.2);
    assert_eq!(config.optimizer.improvement_margin, 0.25);
    assert!(config.optimizer.calibrate_from_history);
    assert_eq!(
        config.completion.command.as_deref(),
        Some("llm-helper --mode rewrite")
    );
    assert_eq!(config.completion_timeout(), Duration::from_millis(2500));
}

#[test]
fn test_parse_yaml_with_unknown_fields() {
    // Unknown fields should be silently ignored for forward compatibility
    let yaml = r#"
min_prompt_length: 90
unknown_field: "some value"
another_unknown:
  nested: true
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.min_prompt_length, 90);
    assert_eq!(config.default_target, PromptTarget::Claude);
}

#[test]
fn test_validate_zero_min_prompt_length() {
    let err = Config::from_yaml("min_prompt_length: 0").unwrap_err();

    assert!(err.to_string().contains("min_prompt_length"));
    assert!(err.to_string().contains("greater than 0"));
}

#[test]
fn test_validate_margin_out_of_range() {
    let err = Config::from_yaml("optimizer:\n  improvement_margin: 3.0").unwrap_err();

    assert!(err.to_string().contains("improvement_margin"));
}

#[test]
fn test_validate_negative_weight() {
    let err = Config::from_yaml("optimizer:\n  weights:\n    format: -0.1").unwrap_err();

    assert!(err.to_string().contains("optimizer.weights.format"));
}

#[test]
fn test_validate_zero_timeout() {
    let err = Config::from_yaml("completion:\n  timeout_ms: 0").unwrap_err();

    assert!(err.to_string().contains("timeout_ms"));
}

#[test]
fn test_validate_unparseable_command() {
    let err = Config::from_yaml("completion:\n  command: \"helper 'unterminated\"").unwrap_err();

    assert!(err.to_string().contains("completion.command"));
}

#[test]
fn test_clamped_accessors() {
    let config = Config::from_yaml(
        "optimizer:\n  improvement_margin: 0.9\ncompletion:\n  timeout_ms: 999999",
    )
    .unwrap();

    assert_eq!(config.improvement_margin(), MAX_IMPROVEMENT_MARGIN);
    assert_eq!(config.completion_timeout(), Duration::from_millis(30_000));

    let config = Config::from_yaml("completion:\n  timeout_ms: 5").unwrap();
    assert_eq!(config.completion_timeout(), Duration::from_millis(100));
}

#[test]
fn test_session_and_overrides_follow_config() {
    let config = Config::from_yaml(
        "default_target: chatgpt\nmin_prompt_length: 60\nrequire_constraints: false",
    )
    .unwrap();

    let session = config.session();
    assert_eq!(session.target, PromptTarget::ChatGpt);
    assert_eq!(session.sections.min_prompt_length, 60);
    assert!(!session.sections.require_constraints);

    let overrides = config.optimizer_overrides();
    assert_eq!(overrides.improvement_margin, Some(DEFAULT_IMPROVEMENT_MARGIN));
    assert!(overrides.include_preamble);
}

#[test]
fn test_completion_helper() {
    assert!(Config::default().completion_helper().unwrap().is_none());

    let config = Config::from_yaml("completion:\n  command: cat\n  timeout_ms: 700").unwrap();
    let helper = config.completion_helper().unwrap().unwrap();
    assert_eq!(helper.timeout(), Duration::from_millis(700));
}

#[test]
fn test_to_yaml_round_trip() {
    let config = Config::from_yaml("default_family: openai\nmin_prompt_length: 150").unwrap();
    let yaml = config.to_yaml().unwrap();

    let parsed = Config::from_yaml(&yaml).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_config_load_from_file() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "default_target: agent").unwrap();
    writeln!(file, "require_constraints: false").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.default_target, PromptTarget::Agent);
    assert!(!config.require_constraints);
}

#[test]
fn test_config_load_missing_file() {
    let err = Config::load("/nonexistent/path/config.yaml").unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));

    let config = Config::load_or_default("/nonexistent/path/config.yaml").unwrap();
    assert_eq!(config, Config::default());
}
