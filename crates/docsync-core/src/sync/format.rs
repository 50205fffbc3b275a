//! Display helpers for list output

/// Timestamp layout used by list
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Render a byte count with base-1024 units and one decimal place.
///
/// Values of 1024 TB and above stay in TB.
pub fn format_size(size: u64) -> String {
    let mut value = size as f64;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} TB", value)
}
