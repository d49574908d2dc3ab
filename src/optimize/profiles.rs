//! Per-family system preambles and sampling suggestions.

use super::types::{ModelFamily, OptimizerOverrides, SamplingParams, Scenario};

struct FamilyProfile {
    preamble: Option<&'static str>,
    max_temperature: f64,
    max_tokens: u32,
}

fn profile(family: ModelFamily) -> FamilyProfile {
    match family {
        ModelFamily::Claude => FamilyProfile {
            preamble: Some(
                "You are a precise senior engineer. Follow the sections below in order and state every assumption explicitly.",
            ),
            max_temperature: 1.0,
            max_tokens: 4096,
        },
        ModelFamily::OpenAi => FamilyProfile {
            preamble: Some(
                "You are a careful expert assistant. Follow the instructions exactly and answer in the requested format.",
            ),
            max_temperature: 2.0,
            max_tokens: 4096,
        },
        ModelFamily::Gemini => FamilyProfile {
            preamble: Some(
                "You are a meticulous assistant. Complete every section of the task and keep to the requested format.",
            ),
            max_temperature: 2.0,
            max_tokens: 8192,
        },
        ModelFamily::Perplexity => FamilyProfile {
            preamble: Some(
                "You are a research assistant. Prefer recent primary sources and cite them inline.",
            ),
            max_temperature: 1.0,
            max_tokens: 2048,
        },
        ModelFamily::IdeAgent => FamilyProfile {
            preamble: Some(
                "You are a coding agent working inside the user's repository. Make minimal, reviewable changes and verify them.",
            ),
            max_temperature: 1.0,
            max_tokens: 8192,
        },
        ModelFamily::Generic => FamilyProfile {
            preamble: None,
            max_temperature: 1.0,
            max_tokens: 2048,
        },
    }
}

/// Upper bound for any max-tokens override.
pub const MAX_TOKENS_LIMIT: u32 = 32_768;

/// System preamble for `family`, unless the caller turned preambles off.
pub fn preamble(family: ModelFamily, overrides: &OptimizerOverrides) -> Option<String> {
    if !overrides.include_preamble {
        return None;
    }
    profile(family).preamble.map(str::to_string)
}

fn clamp_unit(value: f64, max: f64) -> Option<f64> {
    (!value.is_nan()).then(|| value.clamp(0.0, max))
}

/// Sampling suggestion for the pair, with overrides clamped to safe ranges.
pub fn sampling(
    family: ModelFamily,
    scenario: Scenario,
    overrides: &OptimizerOverrides,
) -> SamplingParams {
    let profile = profile(family);
    let (temperature, top_p) = match scenario {
        s if s.is_precise() => (0.2, 0.9),
        Scenario::Research => (0.3, 0.9),
        _ => (0.7, 1.0),
    };

    SamplingParams {
        temperature: overrides
            .temperature
            .and_then(|t| clamp_unit(t, profile.max_temperature))
            .unwrap_or(temperature),
        top_p: overrides
            .top_p
            .and_then(|p| clamp_unit(p, 1.0))
            .unwrap_or(top_p),
        max_tokens: overrides
            .max_tokens
            .map(|n| n.clamp(1, MAX_TOKENS_LIMIT))
            .unwrap_or(profile.max_tokens),
    }
}
