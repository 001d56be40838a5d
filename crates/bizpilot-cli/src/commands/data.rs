//! Dataset export

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};

use bizpilot_core::{derive, generate_with, import::write_csv, AppConfig};

/// Write the generated dataset, with derived columns, as CSV
pub fn cmd_generate(config: &AppConfig, output: Option<&Path>) -> Result<()> {
    let dataset = derive(&generate_with(&config.generator))?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(&dataset, BufWriter::new(file))?;
            println!(
                "✓ Wrote {} records ({} to {}) to {}",
                dataset.len(),
                config.generator.start,
                config.generator.end,
                path.display()
            );
        }
        None => write_csv(&dataset, io::stdout().lock())?,
    }

    Ok(())
}
