//! Plain-text formatting for money and timestamps.

use chrono::{DateTime, Utc};

/// Formats whole rupiah with dot thousands separators.
///
/// # Examples
///
/// ```
/// use litshop::format::format_rupiah;
///
/// assert_eq!(format_rupiah(250_000), "Rp250.000");
/// assert_eq!(format_rupiah(0), "Rp0");
/// ```
#[must_use]
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let groups: Vec<_> = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(String::from_utf8_lossy)
        .collect();
    format!("Rp{}", groups.join("."))
}

/// Formats an optional timestamp as `YYYY-MM-DD HH:MM` (UTC), or `-`.
#[must_use]
pub fn format_timestamp(timestamp: Option<&DateTime<Utc>>) -> String {
    timestamp.map_or_else(
        || "-".to_owned(),
        |stamp| stamp.format("%Y-%m-%d %H:%M").to_string(),
    )
}
