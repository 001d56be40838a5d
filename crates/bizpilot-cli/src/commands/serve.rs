//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use bizpilot_core::AppConfig;

pub async fn cmd_serve(
    config: AppConfig,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Bizpilot web server...");
    println!("   Model: {}", config.scenario.artifact_path().display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    // Parse allowed CORS origins from environment (comma-separated)
    let origins = std::env::var("BIZPILOT_ALLOWED_ORIGINS").unwrap_or_default();
    let allowed_origins = bizpilot_server::parse_origins(&origins);
    if !allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {} (BIZPILOT_ALLOWED_ORIGINS)",
            allowed_origins.join(", ")
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let server_config = bizpilot_server::ServerConfig { allowed_origins };

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static dir path must be valid UTF-8"))
        .transpose()?;
    bizpilot_server::serve(config, host, port, static_dir_str, server_config).await?;

    Ok(())
}
