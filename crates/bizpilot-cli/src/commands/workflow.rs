//! Workflow suggestion command

use anyhow::{bail, Result};

use bizpilot_core::{suggest, AppConfig};

pub fn cmd_suggest(config: &AppConfig, score: Option<f64>, threshold: Option<f64>) -> Result<()> {
    let score = score.unwrap_or(config.workflow.inefficiency_score);
    let threshold = threshold.unwrap_or(config.workflow.threshold);
    if !(score.is_finite() && threshold.is_finite()) {
        bail!("score and threshold must be finite numbers");
    }

    let suggestion = suggest(score, threshold);
    let marker = if suggestion.needs_optimization {
        "⚠️ "
    } else {
        "✓"
    };
    println!(
        "{} {} (score {:.0}, threshold {:.0})",
        marker, suggestion.message, suggestion.inefficiency_score, suggestion.threshold
    );
    Ok(())
}
