//! Compliance checklist commands

use anyhow::Result;

use bizpilot_core::AppConfig;

pub fn cmd_comply(config: &AppConfig, policies: &str, industry: Option<&str>) -> Result<()> {
    let catalog = &config.compliance;
    let report = match industry {
        Some(industry) => catalog.check(industry, policies)?,
        None => catalog.check_default(policies)?,
    };

    println!();
    println!("📋 Compliance: {}", report.industry);
    if report.fully_compliant {
        println!("   ✓ {}", report.summary);
    } else {
        for regulation in &report.missing {
            println!("   ✗ {}", regulation);
        }
    }
    println!();
    Ok(())
}

pub fn cmd_industries(config: &AppConfig) -> Result<()> {
    let catalog = &config.compliance;
    println!();
    for industry in catalog.industries() {
        let marker = if industry == catalog.default_industry() {
            " (default)"
        } else {
            ""
        };
        println!("  {}{}", industry, marker);
        for regulation in catalog.regulations(industry).unwrap_or_default() {
            println!("    - {}", regulation);
        }
    }
    println!();
    Ok(())
}
