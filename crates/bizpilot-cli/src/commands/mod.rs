//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config loading, pipeline construction)
//! - `data` - Synthetic dataset export
//! - `scenario` - Scenario model commands (train, predict, model)
//! - `workflow` - Workflow suggestion
//! - `compliance` - Compliance checklist commands
//! - `serve` - Web server command

pub mod compliance;
pub mod core;
pub mod data;
pub mod scenario;
pub mod serve;
pub mod workflow;

// Re-export command functions for main.rs
pub use compliance::*;
pub use core::*;
pub use data::*;
pub use scenario::*;
pub use serve::*;
pub use workflow::*;

/// Format a currency amount with thousands separators
pub fn format_money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
