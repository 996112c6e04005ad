//! Duration parsing and formatting for user-supplied delays.
//!
//! Users write delays as one or more `<integer><unit>` tokens such as `10m`, `2d` or
//! `1h 30m`. Units are `s`, `m`, `h`, `d` and `w`, case-insensitive; tokens are summed.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Matches inputs made up entirely of duration tokens.
static FULL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:\d+\s*[smhdw]\s*)+$").expect("valid duration regex"));

/// Captures a single `<integer><unit>` token.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*([smhdw])").expect("valid duration token regex"));

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// Parses a user-supplied delay such as `"1h 30m"` into a `Duration`.
///
/// The whole input must consist of tokens, so stray text, negative numbers and fractional
/// values are rejected rather than partially read.
///
/// # Arguments
/// - `input` - Text entered by the user
///
/// # Returns
/// - `Some(Duration)` - Sum of all tokens, strictly positive
/// - `None` - No tokens, unparseable text, a total of zero, or an overflowing value
pub fn parse_duration(input: &str) -> Option<Duration> {
    if !FULL_RE.is_match(input) {
        return None;
    }

    let mut total: u64 = 0;
    for caps in TOKEN_RE.captures_iter(input) {
        let amount: u64 = caps[1].parse().ok()?;
        let unit = match caps[2].to_ascii_lowercase().as_str() {
            "s" => 1,
            "m" => MINUTE,
            "h" => HOUR,
            "d" => DAY,
            "w" => WEEK,
            _ => return None,
        };
        total = total.checked_add(amount.checked_mul(unit)?)?;
    }

    // chrono refuses anything past i64 milliseconds when computing due times
    if total == 0 || total > i64::MAX as u64 / 1000 {
        return None;
    }

    Some(Duration::from_secs(total))
}

/// Formats a duration as words, e.g. `"1 hour, 30 minutes"`.
///
/// Used when confirming a reminder to the user. Units of zero are omitted; a
/// sub-second duration renders as `"0 seconds"`.
pub fn format_duration_words(duration: Duration) -> String {
    let mut remaining = duration.as_secs();
    let mut parts = Vec::new();

    for (size, name) in [
        (WEEK, "week"),
        (DAY, "day"),
        (HOUR, "hour"),
        (MINUTE, "minute"),
        (1, "second"),
    ] {
        let count = remaining / size;
        remaining %= size;
        if count > 0 {
            let plural = if count == 1 { "" } else { "s" };
            parts.push(format!("{} {}{}", count, name, plural));
        }
    }

    if parts.is_empty() {
        return "0 seconds".to_string();
    }

    parts.join(", ")
}

/// Formats a remaining time compactly, e.g. `"1d 2h 3m"`.
///
/// Always shows the two units below the largest one: days with hours and minutes, hours
/// with minutes, minutes with seconds.
pub fn format_time_remaining(duration: Duration) -> String {
    let secs = duration.as_secs();
    let days = secs / DAY;
    let hours = (secs % DAY) / HOUR;
    let minutes = (secs % HOUR) / MINUTE;
    let seconds = secs % MINUTE;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
