//! Shared helper functions for CLI commands

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Format a per-plate price for display
pub fn format_price(price: &str) -> String {
    match price.trim().parse::<f64>() {
        Ok(value) => format!("₹{:.0}/plate", value),
        Err(_) => price.to_string(),
    }
}
