//! Monitor-ID list parsing for per-site monitoring overrides.

/// Derive a monitor-ID list from the raw comma-separated input.
///
/// Tokens are trimmed, empty tokens dropped, order preserved. No
/// de-duplication: repeated ids are the operator's to keep. The raw input
/// is stored verbatim alongside the derived list for lossless round-trip
/// editing.
pub fn parse_monitor_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
