//! Publication date scan over plain page text.
//!
//! Used when no meta tag carries a date. The text is normalised (lowercase,
//! three-letter month names, no ordinal suffixes) and short word windows are
//! handed to `chrono` until one parses as a complete calendar date.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

/// Window sizes, in the order they are tried.
const WINDOW_SIZES: [usize; 5] = [3, 4, 5, 2, 6];

const DATE_FORMATS: &[&str] = &[
    "%b %d %Y",
    "%b %d, %Y",
    "%d %b %Y",
    "%d %b, %Y",
    "%Y %b %d",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%b %d %Y %H:%M"];

#[allow(clippy::expect_used)]
static MONTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(january|february|march|april|may|june|july|august|september|sept|october|november|december)\b")
        .expect("MONTH_NAME regex")
});

#[allow(clippy::expect_used)]
static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)\b").expect("ORDINAL_SUFFIX regex"));

/// Lowercase, shorten month names, drop ordinal suffixes, collapse whitespace.
fn normalise(text: &str) -> String {
    let lower = text.to_lowercase();
    let months = MONTH_NAME.replace_all(&lower, |caps: &regex::Captures| caps[1][..3].to_string());
    let ordinals = ORDINAL_SUFFIX.replace_all(&months, "$1");
    ordinals.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First complete date found in `text`.
#[must_use]
pub fn find_publish_date(text: &str) -> Option<DateTime<Utc>> {
    let normalised = normalise(text);
    let tokens: Vec<&str> = normalised
        .split(' ')
        .map(|t| t.trim_end_matches(['.', ';', ':', '!', '?', ')']))
        .filter(|t| !t.is_empty())
        .collect();

    for size in WINDOW_SIZES {
        if tokens.len() < size {
            continue;
        }
        for window in tokens.windows(size) {
            if !window.iter().any(|t| t.chars().any(|c| c.is_ascii_digit())) {
                continue;
            }

            let plain = window.join(" ");
            if let Some(date) = parse_candidate(&plain) {
                return Some(date);
            }

            let mut with_comma: Vec<String> = window.iter().map(|t| (*t).to_string()).collect();
            with_comma[1].push(',');
            if let Some(date) = parse_candidate(&with_comma.join(" ")) {
                return Some(date);
            }
        }
    }

    None
}

fn parse_candidate(candidate: &str) -> Option<DateTime<Utc>> {
    let date = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(candidate, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(candidate, fmt).ok())
                .map(|dt| dt.date())
        })?;

    // chrono's %Y accepts any digit count; a one-digit "year" is a day or an hour
    if !(1000..=9999).contains(&date.year()) || date.month() == 0 || date.day() == 0 {
        return None;
    }
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(date: Option<DateTime<Utc>>) -> Option<(i32, u32, u32)> {
        date.map(|d| (d.year(), d.month(), d.day()))
    }

    #[test]
    fn finds_long_month_date() {
        let text = "Posted by Jane on January 5, 2021 in Travel";
        assert_eq!(ymd(find_publish_date(text)), Some((2021, 1, 5)));
    }

    #[test]
    fn finds_date_with_ordinal_suffix() {
        let text = "Last updated: 21st September 2019 by the desk";
        assert_eq!(ymd(find_publish_date(text)), Some((2019, 9, 21)));
    }

    #[test]
    fn finds_month_day_year_without_comma() {
        let text = "written march 3rd 2020 somewhere";
        assert_eq!(ymd(find_publish_date(text)), Some((2020, 3, 3)));
    }

    #[test]
    fn finds_iso_date_with_time() {
        let text = "build 2018-07-14 09:30 finished";
        assert_eq!(ymd(find_publish_date(text)), Some((2018, 7, 14)));
    }

    #[test]
    fn text_without_dates_yields_none() {
        assert_eq!(find_publish_date("No dates here, only 42 apples and 7 pears."), None);
        assert_eq!(find_publish_date(""), None);
    }

    #[test]
    fn normalisation_shortens_months() {
        assert_eq!(normalise("  December\n\n1st,   2020 "), "dec 1, 2020");
    }
}
