//! Candidate scoring rubric.
//!
//! A candidate earns credit for section completeness, output-format
//! clarity and stated success criteria, and pays a penalty for growing
//! beyond the baseline. All four weights are clamped to
//! [`MIN_WEIGHT`]..=[`MAX_WEIGHT`] before any score is computed.

use super::gaps::{Gap, present_markers};
use serde::{Deserialize, Serialize};

pub const MIN_WEIGHT: f64 = 0.05;
pub const MAX_WEIGHT: f64 = 0.6;

/// Growth, relative to the baseline, at which the length penalty saturates.
const PENALTY_SATURATION: f64 = 3.0;

/// Baseline size floor so tiny inputs can grow into a usable prompt.
const MIN_BASELINE_TOKENS: f64 = 40.0;

/// Calibration nudge applied per adjustment.
const CALIBRATION_STEP: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreWeights {
    pub sections: f64,
    pub format: f64,
    pub success: f64,
    pub length_penalty: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            sections: 0.4,
            format: 0.25,
            success: 0.2,
            length_penalty: 0.15,
        }
    }
}

fn clamp_weight(value: f64) -> f64 {
    if value.is_nan() {
        MIN_WEIGHT
    } else {
        value.clamp(MIN_WEIGHT, MAX_WEIGHT)
    }
}

impl ScoreWeights {
    /// Every weight forced into the safe range.
    pub fn clamped(self) -> Self {
        Self {
            sections: clamp_weight(self.sections),
            format: clamp_weight(self.format),
            success: clamp_weight(self.success),
            length_penalty: clamp_weight(self.length_penalty),
        }
    }

    /// Nudge weights from the average structure of past inputs.
    ///
    /// Histories that are already well structured get a heavier format
    /// weight and length penalty; rough histories get a heavier section
    /// weight and a lighter penalty. The result is always re-clamped.
    pub fn calibrate<S: AsRef<str>>(self, history: &[S]) -> Self {
        if history.is_empty() {
            return self.clamped();
        }

        let total: usize = history
            .iter()
            .map(|text| present_markers(text.as_ref()).len())
            .sum();
        let structure = total as f64 / (history.len() * Gap::ALL.len()) as f64;

        let mut weights = self;
        if structure >= 0.6 {
            weights.format += CALIBRATION_STEP;
            weights.length_penalty += CALIBRATION_STEP;
        } else if structure <= 0.3 {
            weights.sections += CALIBRATION_STEP;
            weights.length_penalty -= CALIBRATION_STEP;
        }
        weights.clamped()
    }
}

/// Score components, each in `0.0..=1.0`, and the weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub sections: f64,
    pub format: f64,
    pub success: f64,
    pub length_penalty: f64,
    pub total: f64,
}

/// Rough token estimate: four characters per token, rounded up.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Score `text` against the baseline's size.
///
/// `required_policy` holds the domain-pack lines the scenario expects;
/// half of the format credit is the share of them present verbatim.
pub fn score(
    text: &str,
    baseline: &str,
    required_policy: &[&str],
    weights: &ScoreWeights,
) -> ScoreBreakdown {
    let weights = weights.clamped();
    let markers = present_markers(text);
    let has = |gap: Gap| markers.contains(&gap);

    let core = [Gap::Goal, Gap::Constraints, Gap::Deliverables];
    let sections = core.iter().filter(|gap| has(**gap)).count() as f64 / core.len() as f64;

    let policy = if required_policy.is_empty() {
        1.0
    } else {
        let covered = required_policy.iter().filter(|line| text.contains(**line)).count();
        covered as f64 / required_policy.len() as f64
    };
    let format = 0.5 * f64::from(u8::from(has(Gap::OutputFormat))) + 0.5 * policy;

    let success = f64::from(u8::from(has(Gap::SuccessCriteria)));

    let base = (estimate_tokens(baseline) as f64).max(MIN_BASELINE_TOKENS);
    let grown = estimate_tokens(text).saturating_sub(estimate_tokens(baseline)) as f64;
    let length_penalty = (grown / base / PENALTY_SATURATION).min(1.0);

    let total = weights.sections * sections + weights.format * format + weights.success * success
        - weights.length_penalty * length_penalty;

    ScoreBreakdown {
        sections,
        format,
        success,
        length_penalty,
        total,
    }
}
