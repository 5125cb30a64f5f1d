//! Converts free-text posting ages ("3 days ago", "2 weeks ago") into whole days.

use std::sync::LazyLock;

use regex::Regex;

static DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+day").expect("constant regex pattern is valid"));
static WEEKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+week").expect("constant regex pattern is valid"));
static MONTHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+month").expect("constant regex pattern is valid"));

const DAYS_PER_WEEK: u32 = 7;
const DAYS_PER_MONTH: u32 = 30;

/// Approximate days since posting, or `None` when the text is not recognized.
///
/// Hours and minutes round down to today, "30+ days" caps at 30 and a month
/// counts as 30 days.
pub fn parse_posted_age(raw: &str) -> Option<u32> {
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if s.contains("just posted") || s.contains("today") {
        return Some(0);
    }

    if s.contains("hour") || s.contains("minute") {
        return Some(0);
    }

    if s.contains("30+ days") {
        return Some(30);
    }

    if let Some(n) = capture_count(&DAYS, &s) {
        return Some(n);
    }
    if let Some(n) = capture_count(&WEEKS, &s) {
        return n.checked_mul(DAYS_PER_WEEK);
    }
    if let Some(n) = capture_count(&MONTHS, &s) {
        return n.checked_mul(DAYS_PER_MONTH);
    }

    None
}

fn capture_count(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_day_phrases() {
        assert_eq!(parse_posted_age("Just posted"), Some(0));
        assert_eq!(parse_posted_age("Today"), Some(0));
        assert_eq!(parse_posted_age("1 hour ago"), Some(0));
        assert_eq!(parse_posted_age("20 hours ago"), Some(0));
        assert_eq!(parse_posted_age("45 minutes ago"), Some(0));
    }

    #[test]
    fn test_days() {
        assert_eq!(parse_posted_age("3 days ago"), Some(3));
        assert_eq!(parse_posted_age("1 day ago"), Some(1));
        assert_eq!(parse_posted_age("  12 Days Ago "), Some(12));
    }

    #[test]
    fn test_thirty_plus_caps_at_thirty() {
        assert_eq!(parse_posted_age("30+ days ago"), Some(30));
    }

    #[test]
    fn test_weeks_and_months() {
        assert_eq!(parse_posted_age("2 weeks ago"), Some(14));
        assert_eq!(parse_posted_age("1 month ago"), Some(30));
        assert_eq!(parse_posted_age("3 months ago"), Some(90));
    }

    #[test]
    fn test_unrecognized_is_none() {
        assert_eq!(parse_posted_age(""), None);
        assert_eq!(parse_posted_age("   "), None);
        assert_eq!(parse_posted_age("Reposted recently"), None);
        assert_eq!(parse_posted_age("2days ago"), None);
    }

    #[test]
    fn test_overflow_is_none() {
        assert_eq!(parse_posted_age("99999999999 days ago"), None);
        assert_eq!(parse_posted_age("999999999 months ago"), None);
    }
}
