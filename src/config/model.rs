//! Config struct definition and default implementation.

use super::types::*;
use crate::optimize::{ModelFamily, Scenario};
use crate::prompt::{EnhancementOptions, PromptTarget};
use serde::{Deserialize, Serialize};

/// Configuration for promptforge.
///
/// This struct represents the contents of `<data_dir>/config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Forge settings
    // =========================================================================
    /// Target used when `forge` is not given `--target`.
    pub default_target: PromptTarget,

    /// Enhancement toggles (camelCase keys; missing keys take their defaults).
    pub options: EnhancementOptions,

    /// Minimum generated prompt length in characters.
    #[serde(default = "default_min_prompt_length")]
    pub min_prompt_length: usize,

    /// Whether an empty constraints section fails a quality check.
    #[serde(default = "default_true")]
    pub require_constraints: bool,

    // =========================================================================
    // Optimizer settings
    // =========================================================================
    /// Family used when `optimize` is not given `--family`.
    pub default_family: ModelFamily,

    /// Scenario used when `optimize` is not given `--scenario`.
    pub default_scenario: Scenario,

    pub optimizer: OptimizerConfig,

    // =========================================================================
    // Completion helper
    // =========================================================================
    pub completion: CompletionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_target: PromptTarget::default(),
            options: EnhancementOptions::default(),
            min_prompt_length: default_min_prompt_length(),
            require_constraints: default_true(),
            default_family: ModelFamily::default(),
            default_scenario: Scenario::default(),
            optimizer: OptimizerConfig::default(),
            completion: CompletionConfig::default(),
        }
    }
}
