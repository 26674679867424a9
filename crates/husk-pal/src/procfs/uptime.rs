//! Parsing helpers for `/proc/uptime`.

/// Extracts the system uptime from `/proc/uptime` content.
///
/// Returns the value in milliseconds.
pub fn parse_uptime_ms(content: &str) -> Option<u64> {
    let seconds: f64 = content.split_whitespace().next()?.parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some((seconds * 1000.0) as u64)
}
