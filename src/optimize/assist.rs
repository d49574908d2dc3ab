//! Optimization refined by the optional completion helper.

use super::candidates::ASSISTED;
use super::gaps::is_well_structured;
use super::spans::Protected;
use super::{OptimizationInput, OptimizationOutput, Settings, optimize};
use crate::completion::{CompletionRequest, TextCompletion};

const FALLBACK_MAX_TOKENS: u32 = 2048;

fn assist_prompt(text: &str, preserve: &[String]) -> String {
    let mut prompt = String::from(
        "Rewrite the prompt below so it is clearer and more complete. \
Keep its meaning. Reply with the rewritten prompt only.\n",
    );
    if !preserve.is_empty() {
        prompt.push_str("Copy each of these spans into your reply exactly as written:\n");
        for span in preserve {
            prompt.push_str("<<<\n");
            prompt.push_str(span);
            prompt.push_str("\n>>>\n");
        }
    }
    prompt.push_str("\nPrompt:\n");
    prompt.push_str(text);
    prompt
}

/// Run [`optimize`], then ask `completion` for a refinement.
///
/// The refinement replaces the deterministic result only when every
/// protected span of the input survives in it and it beats the
/// deterministic score by more than the improvement margin. Any failure
/// keeps the deterministic result and adds a warning. Empty or already
/// well-structured input is returned as [`optimize`] returns it, without
/// asking the helper.
pub fn optimize_with_assist(
    input: &OptimizationInput,
    completion: &dyn TextCompletion,
) -> OptimizationOutput {
    let mut output = optimize(input);
    let settings = Settings::from_input(input);
    let protected = Protected::new(&input.text);
    if input.text.trim().is_empty() || is_well_structured(protected.masked()) {
        tracing::debug!("input kept as is, skipping completion helper");
        return output;
    }

    let request = CompletionRequest {
        prompt: assist_prompt(&output.optimized_text, protected.spans()),
        max_tokens: output
            .sampling
            .map_or(FALLBACK_MAX_TOKENS, |s| s.max_tokens),
        preserve: protected.spans().to_vec(),
    };

    let refined = match completion.generate(&request) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "completion helper unavailable");
            output.warnings.push(format!(
                "Completion helper unavailable ({}); kept the deterministic result.",
                e
            ));
            return output;
        }
    };

    if refined.is_empty() {
        output
            .warnings
            .push("Completion helper returned nothing; kept the deterministic result.".to_string());
        return output;
    }

    if !protected.all_present(&refined) {
        output.warnings.push(
            "Completion helper dropped a protected span; kept the deterministic result."
                .to_string(),
        );
        return output;
    }

    let score = settings.score(&refined, &input.text).total;
    if score - output.selected_score <= settings.margin {
        output.warnings.push(
            "Completion helper did not improve on the deterministic result; kept it.".to_string(),
        );
        return output;
    }

    output.optimized_text = refined;
    output.selected = ASSISTED.to_string();
    output.selected_score = score;
    output.applied_rules.push("assist:completion".to_string());
    output
}
