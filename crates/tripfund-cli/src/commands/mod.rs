//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared loading helpers (planner, trip file, reference date)
//! - `plan` - Trip plan and cost estimate commands
//! - `savings` - Monthly savings and points commands
//! - `serve` - Web server command

pub mod core;
pub mod plan;
pub mod savings;
pub mod serve;

// Re-export command functions for main.rs
pub use core::*;
pub use plan::*;
pub use savings::*;
pub use serve::*;

/// Format a dollar amount with thousands separators, rounded to whole dollars
pub fn format_money(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}", sign, grouped)
}
