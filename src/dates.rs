//! Date normalization across the source exports.
//!
//! Each source writes timestamps its own way; everything is rendered as
//! `YYYY-MM-DD HH:MM` so earliest/latest comparisons are plain string
//! comparisons.

use chrono::NaiveDateTime;

/// Mailsuite writes this instead of an open timestamp.
const NEVER_READ: &str = "Not read yet";

pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Known source formats, tried in order. The canonical form itself is last
/// so normalization is a fixed point.
const INPUT_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M",
    "%b %d, %Y, %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%b %d,%Y,%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Canonical-or-original: the first format that parses wins; input that
/// parses as nothing comes back unchanged. Empty input and the "never read"
/// sentinel yield "".
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NEVER_READ {
        return String::new();
    }
    for format in INPUT_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return parsed.format(CANONICAL_FORMAT).to_string();
        }
    }
    trimmed.to_string()
}

/// Whether a normalized value is safe to min/max against others. Values
/// that kept their original shape (no date dash or time colon) sort
/// meaninglessly and are excluded from comparisons.
pub fn is_comparable(value: &str) -> bool {
    !value.is_empty() && value.contains('-') && value.contains(':')
}
