//! Percentage formatting shared by every surface that renders a ratio.
//!
//! Upstream providers deliver ratios inconsistently: CTR may arrive as a
//! 0-1 fraction or a 0-100 percentage, and uptime figures have the same
//! ambiguity. One rule applies everywhere, at presentation time only.

/// Format a ratio as a percentage string with two decimals.
///
/// A value above 1.0 is treated as already being a percentage; anything
/// else is treated as a fraction. `0.031` and `3.1` both render `"3.10%"`.
pub fn format_percent(value: f64) -> String {
    let fraction = if value > 1.0 { value / 100.0 } else { value };

    format!("{:.2}%", fraction * 100.0)
}
