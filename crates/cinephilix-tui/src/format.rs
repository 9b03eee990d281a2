//! Display formatting helpers.

use chrono::DateTime;

/// Formats a runtime in minutes as `"2h 28m"`.
#[must_use]
pub fn runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Formats a year span: `"2008 - 2013"`, `"2010"`, or empty when unknown.
#[must_use]
pub fn year_span(start: Option<u32>, end: Option<u32>) -> String {
    match (start, end) {
        (Some(start), Some(end)) if end != start => format!("{start} - {end}"),
        (Some(start), _) => start.to_string(),
        (None, Some(end)) => format!("? - {end}"),
        (None, None) => String::new(),
    }
}

/// Formats an average rating as `"8.8/10"`.
#[must_use]
pub fn rating(average: f64) -> String {
    format!("{average:.1}/10")
}

/// Renders a five-star bar from a 0-10 average, rounded to whole stars.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn stars(average: f64) -> String {
    let filled = (average.clamp(0.0, 10.0) / 2.0).round() as usize;
    let filled = filled.min(5);
    let mut bar = "\u{2605}".repeat(filled);
    bar.push_str(&"\u{2606}".repeat(5_usize.saturating_sub(filled)));
    bar
}

/// Formats a number with thousands separators (e.g. 2600000 -> "2,600,000").
#[allow(clippy::arithmetic_side_effects)]
#[must_use]
pub fn thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Formats a person's life span: `"1970 - Present"`, `"? - 2008"`.
#[must_use]
pub fn life_span(birth: Option<u32>, death: Option<u32>) -> String {
    let birth = birth.map_or_else(|| String::from("?"), |y| y.to_string());
    let death = death.map_or_else(|| String::from("Present"), |y| y.to_string());
    format!("{birth} - {death}")
}

/// Formats an RFC 3339 timestamp as a calendar date. Unparseable input is
/// returned unchanged.
#[must_use]
pub fn review_date(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at).map_or_else(
        |_| String::from(created_at),
        |dt| dt.format("%Y-%m-%d").to_string(),
    )
}

/// Truncates to at most `max` characters, appending an ellipsis when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return String::from(text);
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}
