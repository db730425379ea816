//! Free-text durations ("3 hours", "2 days") normalized to minutes.
//!
//! Work-calendar conventions: 1 day = 8h, 1 week = 5 days, 1 month = 20 days.

const WORKDAY_MINUTES: f64 = 8.0 * 60.0;
const WORKWEEK_MINUTES: f64 = 5.0 * WORKDAY_MINUTES;
const WORKMONTH_MINUTES: f64 = 20.0 * WORKDAY_MINUTES;

/// Parse a duration like "3 hours" or "1.5 days" to minutes.
///
/// Returns `None` when no unit keyword matches or the text has no leading
/// numeric value. Absence of a result is the only error signal.
pub fn parse_duration_minutes(text: &str) -> Option<f64> {
    let lower = text.trim().to_lowercase();
    let value = leading_number(&lower)?;

    if lower.contains("day") {
        Some(value * WORKDAY_MINUTES)
    } else if lower.contains("week") {
        Some(value * WORKWEEK_MINUTES)
    } else if lower.contains("month") {
        Some(value * WORKMONTH_MINUTES)
    } else if lower.contains("hour") || lower.contains("hr") {
        Some(value * 60.0)
    } else if lower.contains("min") {
        Some(value)
    } else if lower.contains("second") {
        Some(value / 60.0)
    } else {
        None
    }
}

fn leading_number(text: &str) -> Option<f64> {
    let digits: String = text
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_units() {
        assert_eq!(parse_duration_minutes("3 hours"), Some(180.0));
        assert_eq!(parse_duration_minutes("1 hour"), Some(60.0));
        assert_eq!(parse_duration_minutes("2 hrs"), Some(120.0));
        assert_eq!(parse_duration_minutes("45 minutes"), Some(45.0));
        assert_eq!(parse_duration_minutes("30 min"), Some(30.0));
        assert_eq!(parse_duration_minutes("90 seconds"), Some(1.5));
    }

    #[test]
    fn applies_work_calendar_conventions() {
        assert_eq!(parse_duration_minutes("2 days"), Some(960.0));
        assert_eq!(parse_duration_minutes("1 week"), Some(2400.0));
        assert_eq!(parse_duration_minutes("1 month"), Some(9600.0));
    }

    #[test]
    fn accepts_fractions_and_mixed_case() {
        assert_eq!(parse_duration_minutes("1.5 Days"), Some(720.0));
        assert_eq!(parse_duration_minutes("0.5 HOURS"), Some(30.0));
    }

    #[test]
    fn rejects_missing_unit_or_number() {
        assert_eq!(parse_duration_minutes("3 bananas"), None);
        assert_eq!(parse_duration_minutes("a few hours"), None);
        assert_eq!(parse_duration_minutes(""), None);
    }
}
