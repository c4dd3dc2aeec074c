//! Duration formatting for reports.
//!
//! Two renderings are used across the report outputs:
//!
//! - Row durations as `"{h}h {mm}m"`: 125 minutes -> `"2h 05m"`
//! - Totals as decimal hours with two places: 165 minutes -> `"2.75"`
//!
//! Negative durations (a negative "spent" field in the log) are shown as zero.
//!
//! ```rust
//! use taiga_sync::libs::formatter::{format_duration, format_hours};
//! use chrono::Duration;
//!
//! assert_eq!(format_duration(&Duration::minutes(125)), "2h 05m");
//! assert_eq!(format_hours(&Duration::minutes(165)), "2.75");
//! ```

use chrono::Duration;

pub fn format_duration(duration: &Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    format!("{}h {:02}m", total_minutes / 60, total_minutes % 60)
}

pub fn format_hours(duration: &Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    format!("{:.2}", total_minutes as f64 / 60.0)
}
