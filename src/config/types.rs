//! Nested configuration sections and their defaults.

use crate::optimize::{DEFAULT_IMPROVEMENT_MARGIN, ScoreWeights};
use serde::{Deserialize, Serialize};

/// Default completion helper timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 4000;

/// Lower bound the helper timeout is clamped to.
pub const MIN_TIMEOUT_MS: u64 = 100;

/// Upper bound the helper timeout is clamped to.
pub const MAX_TIMEOUT_MS: u64 = 30_000;

/// Optimizer scoring settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Rubric weights, clamped before use.
    pub weights: ScoreWeights,

    /// How much a candidate must beat the input by (clamped to 0.05..=0.5).
    #[serde(default = "default_improvement_margin")]
    pub improvement_margin: f64,

    /// Nudge the weights from recorded history before optimizing.
    pub calibrate_from_history: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            improvement_margin: default_improvement_margin(),
            calibrate_from_history: false,
        }
    }
}

/// External text-completion helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// Command line, split like a shell would but never run through one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Time allowed for one completion (clamped to 100..=30000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            command: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

// Default value functions for serde
fn default_improvement_margin() -> f64 {
    DEFAULT_IMPROVEMENT_MARGIN
}
fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}
pub(super) fn default_true() -> bool {
    true
}
pub(super) fn default_min_prompt_length() -> usize {
    crate::quality::DEFAULT_MIN_PROMPT_LENGTH
}
