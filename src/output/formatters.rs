//! Reusable formatting utilities for CLI output

use std::time::Duration;

use chrono::{DateTime, Local};

/// Format epoch milliseconds as a local date/time.
///
/// Returns "N/A" for zero or out-of-range values.
///
/// # Example output
/// `2025-01-15 14:30`
pub fn format_millis_local(millis: i64) -> String {
    if millis <= 0 {
        return "N/A".to_string();
    }
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Format a remaining time-to-live.
///
/// # Example output
/// - `23h 59m` (hours, minutes)
/// - `5m 10s` (minutes, seconds)
/// - `expired` for zero
pub fn format_ttl(ttl: Duration) -> String {
    let secs = ttl.as_secs();
    if secs == 0 {
        return "expired".to_string();
    }

    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_millis_local_valid() {
        // Jan 15, 2025 12:00:00 UTC; exact output depends on local TZ
        let result = format_millis_local(1_736_942_400_000);
        assert!(result.starts_with("2025-01-1"));
    }

    #[test]
    fn test_format_millis_local_zero() {
        assert_eq!(format_millis_local(0), "N/A");
    }

    #[test]
    fn test_format_ttl() {
        assert_eq!(format_ttl(Duration::from_secs(86_399)), "23h 59m");
        assert_eq!(format_ttl(Duration::from_secs(310)), "5m 10s");
        assert_eq!(format_ttl(Duration::from_secs(45)), "45s");
        assert_eq!(format_ttl(Duration::ZERO), "expired");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
