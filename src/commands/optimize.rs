//! Implementation of the `promptforge optimize` command.

use super::{Globals, print_json, print_text, read_input};
use crate::cli::OptimizeArgs;
use promptforge::config::Config;
use promptforge::error::{ForgeError, Result};
use promptforge::history::HistoryLog;
use promptforge::optimize::{
    OptimizationInput, OptimizationOutput, ScoreWeights, optimize, optimize_with_assist,
};

/// Execute the `promptforge optimize` command.
///
/// The optimized text goes to stdout. The preamble, sampling suggestion,
/// applied rules and warnings go to stderr unless `--json` is given.
pub fn cmd_optimize(globals: &Globals, args: OptimizeArgs) -> Result<()> {
    let ctx = globals.context()?;
    let config = ctx.load_config()?;
    let raw = read_input(args.input.as_deref())?;

    let weights = if config.optimizer.calibrate_from_history {
        match HistoryLog::open(ctx.storage()) {
            Ok(history) => config.optimizer.weights.calibrate(&history.inputs()),
            Err(e) => {
                tracing::warn!(error = %e, "history unavailable, skipping weight calibration");
                config.optimizer.weights
            }
        }
    } else {
        config.optimizer.weights
    };

    let input = build_input(&config, &args, raw, weights);

    let output = if args.assist {
        let helper = config.completion_helper()?.ok_or_else(|| {
            ForgeError::CompletionError(
                "no completion helper is configured; set completion.command in the config"
                    .to_string(),
            )
        })?;
        optimize_with_assist(&input, &helper)
    } else {
        optimize(&input)
    };

    if args.json {
        print_json(&output)?;
    } else {
        print_text(&output.optimized_text);
        print_report(&output);
    }
    Ok(())
}

fn build_input(
    config: &Config,
    args: &OptimizeArgs,
    text: String,
    weights: ScoreWeights,
) -> OptimizationInput {
    let mut input = OptimizationInput::new(
        text,
        args.family.unwrap_or(config.default_family),
        args.scenario.unwrap_or(config.default_scenario),
    );

    let overrides = &mut input.overrides;
    *overrides = config.optimizer_overrides();
    overrides.weights = Some(weights);
    overrides.temperature = args.temperature;
    overrides.top_p = args.top_p;
    overrides.max_tokens = args.max_tokens;
    if let Some(reliability) = args.tool_reliability {
        overrides.tool_reliability = reliability;
    }
    if let Some(margin) = args.margin {
        overrides.improvement_margin = Some(margin);
    }
    overrides.include_preamble = !args.no_preamble;
    input
}

fn print_report(output: &OptimizationOutput) {
    eprintln!();
    eprintln!(
        "Selected: {} (score {:.2}, input {:.2})",
        output.selected, output.selected_score, output.baseline_score
    );
    if let Some(sampling) = output.sampling {
        eprintln!(
            "Sampling: temperature={} top_p={} max_tokens={}",
            sampling.temperature, sampling.top_p, sampling.max_tokens
        );
    }
    if !output.applied_rules.is_empty() {
        eprintln!("Rules:    {}", output.applied_rules.join(", "));
    }
    if let Some(preamble) = &output.preamble {
        eprintln!("Preamble:");
        for line in preamble.lines() {
            eprintln!("  {}", line);
        }
    }
    for warning in &output.warnings {
        eprintln!("Warning: {}", warning);
    }
}
