//! Optimizer input/output types and tags.

use super::scoring::ScoreWeights;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The downstream model family an optimized prompt is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFamily {
    Claude,
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
    Perplexity,
    IdeAgent,
    #[default]
    Generic,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 6] = [
        ModelFamily::Claude,
        ModelFamily::OpenAi,
        ModelFamily::Gemini,
        ModelFamily::Perplexity,
        ModelFamily::IdeAgent,
        ModelFamily::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelFamily::Claude => "claude",
            ModelFamily::OpenAi => "openai",
            ModelFamily::Gemini => "gemini",
            ModelFamily::Perplexity => "perplexity",
            ModelFamily::IdeAgent => "ide-agent",
            ModelFamily::Generic => "generic",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" | "anthropic" => Ok(ModelFamily::Claude),
            "openai" | "open-ai" | "gpt" | "chatgpt" => Ok(ModelFamily::OpenAi),
            "gemini" | "google" => Ok(ModelFamily::Gemini),
            "perplexity" => Ok(ModelFamily::Perplexity),
            "ide-agent" | "ide" | "agent" => Ok(ModelFamily::IdeAgent),
            "generic" => Ok(ModelFamily::Generic),
            other => Err(format!(
                "unknown model family '{}' (expected one of: claude, openai, gemini, perplexity, ide-agent, generic)",
                other
            )),
        }
    }
}

/// What kind of task the prompt describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    #[default]
    General,
    Coding,
    Cli,
    Json,
    ToolAgent,
    Research,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::General,
        Scenario::Coding,
        Scenario::Cli,
        Scenario::Json,
        Scenario::ToolAgent,
        Scenario::Research,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::General => "general",
            Scenario::Coding => "coding",
            Scenario::Cli => "cli",
            Scenario::Json => "json",
            Scenario::ToolAgent => "tool-agent",
            Scenario::Research => "research",
        }
    }

    /// Whether answers in this scenario should be low-variance.
    pub fn is_precise(self) -> bool {
        matches!(
            self,
            Scenario::Coding | Scenario::Cli | Scenario::Json | Scenario::ToolAgent
        )
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "general" => Ok(Scenario::General),
            "coding" | "code" => Ok(Scenario::Coding),
            "cli" | "shell" => Ok(Scenario::Cli),
            "json" => Ok(Scenario::Json),
            "tool-agent" | "tools" | "agent" => Ok(Scenario::ToolAgent),
            "research" => Ok(Scenario::Research),
            other => Err(format!(
                "unknown scenario '{}' (expected one of: general, coding, cli, json, tool-agent, research)",
                other
            )),
        }
    }
}

/// How dependable the tools available to an agent are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolReliability {
    Low,
    #[default]
    High,
}

impl FromStr for ToolReliability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ToolReliability::Low),
            "high" => Ok(ToolReliability::High),
            other => Err(format!(
                "unknown tool reliability '{}' (expected low or high)",
                other
            )),
        }
    }
}

/// Suggested sampling parameters for the downstream call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingParams {
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

/// Caller-supplied adjustments. Numeric values are clamped before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizerOverrides {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u32>,
    pub tool_reliability: ToolReliability,
    pub include_preamble: bool,
    pub weights: Option<ScoreWeights>,
    pub improvement_margin: Option<f64>,
}

impl Default for OptimizerOverrides {
    fn default() -> Self {
        Self {
            temperature: None,
            top_p: None,
            max_tokens: None,
            tool_reliability: ToolReliability::High,
            include_preamble: true,
            weights: None,
            improvement_margin: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationInput {
    pub text: String,
    pub family: ModelFamily,
    pub scenario: Scenario,
    #[serde(default)]
    pub overrides: OptimizerOverrides,
}

impl OptimizationInput {
    pub fn new(text: impl Into<String>, family: ModelFamily, scenario: Scenario) -> Self {
        Self {
            text: text.into(),
            family,
            scenario,
            overrides: OptimizerOverrides::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOutput {
    pub optimized_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling: Option<SamplingParams>,
    pub applied_rules: Vec<String>,
    pub warnings: Vec<String>,
    /// Label of the candidate that was returned.
    pub selected: String,
    pub baseline_score: f64,
    pub selected_score: f64,
}

impl OptimizationOutput {
    /// True when the returned text is the input, byte for byte.
    pub fn is_baseline(&self) -> bool {
        self.selected == super::candidates::BASELINE
    }
}
