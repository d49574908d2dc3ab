//! Heuristic prompt optimizer.
//!
//! An independent path over raw text. Candidates (see [`candidates`]) are
//! scored against the verbatim input; the best one is returned only when it
//! beats the input by more than the improvement margin and every protected
//! span survived. Otherwise the input comes back byte for byte with a
//! warning. Already well-structured input is never restructured.
//!
//! The optimizer never fails and never reads the clock or any global
//! state, so identical input always produces identical output.

pub mod candidates;
pub mod contradictions;
pub mod gaps;
pub mod packs;
pub mod profiles;
pub mod rewrite;
pub mod scoring;
pub mod spans;
pub mod types;

mod assist;


pub use assist::optimize_with_assist;
pub use scoring::{ScoreBreakdown, ScoreWeights};
pub use types::{
    ModelFamily, OptimizationInput, OptimizationOutput, OptimizerOverrides, SamplingParams,
    Scenario, ToolReliability,
};

use candidates::{BASELINE, Candidate};
use gaps::is_well_structured;
use packs::{PackLine, pack_lines};
use spans::Protected;

pub const DEFAULT_IMPROVEMENT_MARGIN: f64 = 0.15;
pub const MIN_IMPROVEMENT_MARGIN: f64 = 0.05;
pub const MAX_IMPROVEMENT_MARGIN: f64 = 0.5;

pub const WELL_STRUCTURED_WARNING: &str =
    "Input is already well structured; returned unchanged.";
pub const EMPTY_INPUT_WARNING: &str = "Input is empty; nothing to optimize.";
pub const SPAN_LOST_WARNING: &str =
    "A rewrite dropped a protected span; returned the input unchanged.";

pub fn clamp_margin(margin: f64) -> f64 {
    if margin.is_nan() {
        DEFAULT_IMPROVEMENT_MARGIN
    } else {
        margin.clamp(MIN_IMPROVEMENT_MARGIN, MAX_IMPROVEMENT_MARGIN)
    }
}

/// Scoring settings resolved from an input's overrides.
pub(crate) struct Settings {
    pub weights: ScoreWeights,
    pub margin: f64,
    pub pack: Vec<PackLine>,
}

impl Settings {
    pub fn from_input(input: &OptimizationInput) -> Self {
        Self {
            weights: input.overrides.weights.unwrap_or_default().clamped(),
            margin: clamp_margin(
                input
                    .overrides
                    .improvement_margin
                    .unwrap_or(DEFAULT_IMPROVEMENT_MARGIN),
            ),
            pack: pack_lines(
                input.family,
                input.scenario,
                input.overrides.tool_reliability,
            ),
        }
    }

    pub fn policy(&self) -> Vec<&'static str> {
        self.pack.iter().map(|line| line.text).collect()
    }

    pub fn score(&self, text: &str, baseline: &str) -> ScoreBreakdown {
        scoring::score(text, baseline, &self.policy(), &self.weights)
    }
}

/// Optimize `input.text` for its family and scenario.
pub fn optimize(input: &OptimizationInput) -> OptimizationOutput {
    let settings = Settings::from_input(input);
    let baseline_score = settings.score(&input.text, &input.text).total;

    let preamble = profiles::preamble(input.family, &input.overrides);
    let sampling = profiles::sampling(input.family, input.scenario, &input.overrides);
    let mut profile_rules = vec![format!("sampling:{}", input.scenario)];
    if preamble.is_some() {
        profile_rules.insert(0, format!("preamble:{}", input.family));
    }

    let unchanged = |warning: String| OptimizationOutput {
        optimized_text: input.text.clone(),
        preamble: preamble.clone(),
        sampling: Some(sampling),
        applied_rules: profile_rules.clone(),
        warnings: vec![warning],
        selected: BASELINE.to_string(),
        baseline_score,
        selected_score: baseline_score,
    };

    if input.text.trim().is_empty() {
        return unchanged(EMPTY_INPUT_WARNING.to_string());
    }

    let protected = Protected::new(&input.text);
    if is_well_structured(protected.masked()) {
        tracing::debug!("optimizer input already well structured");
        return unchanged(WELL_STRUCTURED_WARNING.to_string());
    }

    let candidates = candidates::generate(&input.text, &protected, input.scenario, &settings.pack);
    let (best, best_score) = select(&candidates, &settings, &input.text);

    if best.label == BASELINE || best_score - baseline_score <= settings.margin {
        tracing::debug!(
            best = best.label,
            best_score,
            baseline_score,
            "no candidate cleared the improvement margin"
        );
        return unchanged(format!(
            "No candidate improved on the input by more than {:.2}; returned unchanged.",
            settings.margin
        ));
    }

    let missing = protected.missing(&best.text);
    if !missing.is_empty() {
        tracing::warn!(candidate = best.label, ?missing, "protected span lost");
        return unchanged(SPAN_LOST_WARNING.to_string());
    }

    let mut applied_rules = best.rules.clone();
    applied_rules.extend(profile_rules.iter().cloned());

    OptimizationOutput {
        optimized_text: best.text.clone(),
        preamble,
        sampling: Some(sampling),
        applied_rules,
        warnings: Vec::new(),
        selected: best.label.to_string(),
        baseline_score,
        selected_score: best_score,
    }
}

/// Highest-scoring candidate; ties go to the earlier one.
fn select<'a>(
    candidates: &'a [Candidate],
    settings: &Settings,
    baseline: &str,
) -> (&'a Candidate, f64) {
    let mut best = &candidates[0];
    let mut best_score = settings.score(&best.text, baseline).total;
    for candidate in &candidates[1..] {
        let score = settings.score(&candidate.text, baseline).total;
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }
    (best, best_score)
}
