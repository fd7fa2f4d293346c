//! Date and time utility functions

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Write;

/// Format a timestamp with a user-supplied chrono format string.
///
/// chrono only detects invalid specifiers while formatting, so this returns
/// `None` instead of panicking on a bad format.
pub fn try_format<Tz>(at: &DateTime<Tz>, format: &str) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", at.format(format)).ok()?;
    Some(out)
}

/// Format the current local time, falling back to RFC 3339 for a bad format.
pub fn format_now(format: &str) -> String {
    let now = Local::now();
    try_format(&now, format).unwrap_or_else(|| now.to_rfc3339())
}

/// Whether `format` is a usable chrono format string.
pub fn is_valid_format(format: &str) -> bool {
    try_format(&Local::now(), format).is_some()
}
