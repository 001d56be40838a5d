//! Bizpilot CLI - Small-business planning dashboard
//!
//! Usage:
//!   bizpilot generate --output data.csv           Export the synthetic dataset
//!   bizpilot train                                Train the scenario model
//!   bizpilot predict -r 30000 -e 15000 -m 6       Predict profit for a scenario
//!   bizpilot comply --policies "Data privacy"     Check compliance
//!   bizpilot serve --port 3000 --static-dir ui    Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.model.as_deref())?;

    match cli.command {
        Commands::Generate { output } => commands::cmd_generate(&config, output.as_deref()),
        Commands::Train { input } => commands::cmd_train(&config, input.as_deref()),
        Commands::Predict {
            revenue,
            expenses,
            month,
            json,
        } => commands::cmd_predict(&config, revenue, expenses, month, json),
        Commands::Model { delete } => {
            if delete {
                commands::cmd_model_delete(&config)
            } else {
                commands::cmd_model(&config)
            }
        }
        Commands::Suggest { score, threshold } => commands::cmd_suggest(&config, score, threshold),
        Commands::Comply {
            policies,
            industry,
            list,
        } => {
            if list {
                commands::cmd_industries(&config)
            } else {
                commands::cmd_comply(
                    &config,
                    policies.as_deref().unwrap_or_default(),
                    industry.as_deref(),
                )
            }
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(config, &host, port, static_dir.as_deref()).await,
    }
}
