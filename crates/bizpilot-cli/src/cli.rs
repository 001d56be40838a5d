//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bizpilot - Small-business planning dashboard
#[derive(Parser)]
#[command(name = "bizpilot")]
#[command(about = "Profit scenarios, workflow hints and compliance checklists", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Scenario model artifact path (overrides config)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the synthetic monthly dataset as CSV
    Generate {
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Train the scenario profit model and store the artifact
    Train {
        /// CSV with date,revenue,expenses columns (generated data if not specified)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Predict profit for a scenario with the stored model
    Predict {
        /// Monthly revenue
        #[arg(short, long, allow_negative_numbers = true)]
        revenue: f64,

        /// Monthly expenses
        #[arg(short, long, allow_negative_numbers = true)]
        expenses: f64,

        /// Calendar month (1-12; other values are passed to the model as-is)
        #[arg(short, long, allow_negative_numbers = true)]
        month: i64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the stored model artifact
    Model {
        /// Delete the stored artifact
        #[arg(long)]
        delete: bool,
    },

    /// Show the workflow optimization suggestion
    Suggest {
        /// Inefficiency score (defaults to config)
        #[arg(short, long, allow_negative_numbers = true)]
        score: Option<f64>,

        /// Threshold above which optimization is suggested (defaults to config)
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<f64>,
    },

    /// Check policies against an industry's regulations
    Comply {
        /// Comma-separated policies in place, e.g. "Data privacy, Cybersecurity"
        #[arg(short, long, required_unless_present = "list")]
        policies: Option<String>,

        /// Industry (defaults to config)
        #[arg(short, long)]
        industry: Option<String>,

        /// List known industries and their regulations instead
        #[arg(long)]
        list: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing the dashboard files (e.g., ui)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
