//! Scenario model commands (train, predict, model)

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use bizpilot_core::{
    generate_with, import::read_csv, AppConfig, Error as CoreError, ScenarioInput,
};

use super::{format_money, open_pipeline};

pub fn cmd_train(config: &AppConfig, input: Option<&Path>) -> Result<()> {
    let dataset = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            read_csv(file).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => generate_with(&config.generator),
    };

    let pipeline = open_pipeline(config);

    println!("🌲 Training scenario model...");
    println!(
        "   Records: {} ({})",
        dataset.len(),
        input.map_or("generated".to_string(), |p| p.display().to_string())
    );
    println!(
        "   Forest: {} trees, seed {}",
        pipeline.params().n_trees,
        pipeline.params().seed
    );

    let summary = pipeline.train(&dataset)?;

    println!();
    println!("✓ Model trained on {} samples", summary.samples);
    println!("   In-sample RMSE: {}", format_money(summary.metrics.rmse));
    println!("   In-sample MAE:  {}", format_money(summary.metrics.mae));
    println!("   Artifact: {}", summary.artifact.path);

    Ok(())
}

pub fn cmd_predict(
    config: &AppConfig,
    revenue: f64,
    expenses: f64,
    month: i64,
    json: bool,
) -> Result<()> {
    let pipeline = open_pipeline(config);
    let input = ScenarioInput::new(revenue, expenses, month);
    let profit = pipeline.predict(input)?;

    if json {
        let output = serde_json::json!({
            "revenue": revenue,
            "expenses": expenses,
            "month": month,
            "predicted_profit": profit,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "Predicted profit for month {} (revenue {}, expenses {}): {}",
            month,
            format_money(revenue),
            format_money(expenses),
            format_money(profit)
        );
    }

    Ok(())
}

pub fn cmd_model(config: &AppConfig) -> Result<()> {
    let pipeline = open_pipeline(config);

    match pipeline.model_info() {
        Ok(info) => {
            println!();
            println!("🌲 Scenario Model");
            println!("   ─────────────────────────────────────────────────────────────");
            println!("   Path:      {}", info.path);
            println!("   Regressor: {}", info.regressor);
            println!("   Samples:   {}", info.samples);
            println!("   Trained:   {}", info.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
            println!("   Format:    v{}", info.format_version);
            println!("   Size:      {:.1} KB", info.size_bytes as f64 / 1024.0);
            println!();
            Ok(())
        }
        Err(CoreError::ModelNotFound(path)) => {
            println!("No scenario model at {}", path);
            println!("   Run `bizpilot train` to create one.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn cmd_model_delete(config: &AppConfig) -> Result<()> {
    let pipeline = open_pipeline(config);
    if pipeline.store().delete()? {
        println!("✓ Deleted {}", pipeline.store().path().display());
    } else {
        println!("No scenario model at {}", pipeline.store().path().display());
    }
    Ok(())
}
