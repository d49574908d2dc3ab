//! Config loading, validation, and the values commands derive from it.

use super::model::Config;
use super::types::{MAX_TIMEOUT_MS, MIN_TIMEOUT_MS};
use crate::completion::ProcessCompletion;
use crate::error::{ForgeError, Result};
use crate::forge::ForgeSession;
use crate::optimize::{OptimizerOverrides, ScoreWeights, clamp_margin};
use crate::quality::SectionsConfig;
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ForgeError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ForgeError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ForgeError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            ForgeError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `min_prompt_length` must be positive
    /// - `optimizer.improvement_margin` must be a finite number in 0..=1
    /// - `optimizer.weights` must be finite and non-negative
    /// - `completion.timeout_ms` must be positive
    /// - `completion.command`, when set, must split into at least a program
    ///
    /// In-range values outside the clamp bounds are accepted and clamped
    /// where they are used.
    pub fn validate(&self) -> Result<()> {
        if self.min_prompt_length == 0 {
            return Err(ForgeError::UserError(
                "config validation failed: min_prompt_length must be greater than 0".to_string(),
            ));
        }

        let margin = self.optimizer.improvement_margin;
        if !margin.is_finite() || !(0.0..=1.0).contains(&margin) {
            return Err(ForgeError::UserError(format!(
                "config validation failed: optimizer.improvement_margin must be between 0 and 1 (found {})",
                margin
            )));
        }

        let ScoreWeights {
            sections,
            format,
            success,
            length_penalty,
        } = self.optimizer.weights;
        for (name, value) in [
            ("sections", sections),
            ("format", format),
            ("success", success),
            ("lengthPenalty", length_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ForgeError::UserError(format!(
                    "config validation failed: optimizer.weights.{} must be a non-negative number (found {})",
                    name, value
                )));
            }
        }

        if self.completion.timeout_ms == 0 {
            return Err(ForgeError::UserError(
                "config validation failed: completion.timeout_ms must be greater than 0"
                    .to_string(),
            ));
        }

        if let Some(command) = &self.completion.command {
            ProcessCompletion::from_command(command, self.completion_timeout()).map_err(|e| {
                ForgeError::UserError(format!(
                    "config validation failed: completion.command: {}",
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Improvement margin clamped to the optimizer's bounds.
    pub fn improvement_margin(&self) -> f64 {
        clamp_margin(self.optimizer.improvement_margin)
    }

    /// Completion timeout clamped to 100ms..=30s.
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_millis(
            self.completion
                .timeout_ms
                .clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS),
        )
    }

    pub fn sections(&self) -> SectionsConfig {
        SectionsConfig {
            min_prompt_length: self.min_prompt_length,
            require_constraints: self.require_constraints,
        }
    }

    /// A forge session seeded from the configured defaults.
    pub fn session(&self) -> ForgeSession {
        ForgeSession {
            target: self.default_target,
            options: self.options,
            variables: Default::default(),
            sections: self.sections(),
        }
    }

    /// Optimizer overrides seeded from the configured weights and margin.
    pub fn optimizer_overrides(&self) -> OptimizerOverrides {
        OptimizerOverrides {
            weights: Some(self.optimizer.weights),
            improvement_margin: Some(self.improvement_margin()),
            ..Default::default()
        }
    }

    /// The configured completion helper, if any.
    pub fn completion_helper(&self) -> Result<Option<ProcessCompletion>> {
        self.completion
            .command
            .as_deref()
            .map(|command| ProcessCompletion::from_command(command, self.completion_timeout()))
            .transpose()
    }
}
