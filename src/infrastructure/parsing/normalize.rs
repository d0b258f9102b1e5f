//! Field normalizers
//!
//! Pure functions turning raw page text into typed values. A failed match is
//! always `None` (or an empty string for raw matches), never a zero.

use chrono::NaiveDate;
use regex::Regex;
use url::Url;

use crate::domain::serp::LinkType;

/// Collapse every whitespace run into a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First match of `pattern` in `text`, or `""` when nothing matches.
///
/// Yields capture group 1 when the pattern defines one, the whole match
/// otherwise.
pub fn first_match<'t>(text: &'t str, pattern: &Regex) -> &'t str {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(0)))
        .map_or("", |m| m.as_str())
}

/// Parse a leading integer, ignoring thousands separators
pub fn parse_int(text: &str) -> Option<u64> {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',')
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

pub fn parse_float(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Total result count from the stats line, e.g. `About 1,234,567 results`
pub fn total_results(stats: &str, pattern: &Regex) -> Option<u64> {
    parse_int(first_match(stats, pattern))
}

/// Elapsed time in seconds from the stats line, e.g. `(0.45 seconds)`
pub fn time_taken(stats: &str, pattern: &Regex) -> Option<f64> {
    parse_float(first_match(stats, pattern))
}

/// Resolve links the page prints relative to the search engine itself
pub fn absolute_url(url: &str, origin: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{origin}{url}")
    } else if url.starts_with('#') {
        format!("{origin}/{url}")
    } else {
        url.to_string()
    }
}

/// Hostname of `url` after resolving it against `origin`
pub fn domain(url: &str, origin: &str) -> Option<String> {
    Url::parse(&absolute_url(url, origin))
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

/// `Home` when the link points at a site root, `Landing` otherwise
pub fn link_type(url: &str, origin: &str) -> LinkType {
    match Url::parse(&absolute_url(url, origin)) {
        Ok(parsed) if parsed.path() == "/" => LinkType::Home,
        _ => LinkType::Landing,
    }
}

const YEARLESS_DATE_FORMATS: &[&str] = &["%b %d %Y", "%d %b %Y", "%m/%d %Y"];

/// Parse a yearless date such as `Thu, Nov 18` by appending `year`.
///
/// A leading weekday is dropped first; it would contradict the appended year
/// whenever the page was saved in a different year.
pub fn parse_date_with_year(text: &str, year: i32) -> Option<NaiveDate> {
    let text = collapse_whitespace(text);
    let text = match text.split_once(',') {
        Some((head, tail)) if head.chars().all(char::is_alphabetic) => tail.trim().to_string(),
        _ => text,
    };
    if text.is_empty() {
        return None;
    }

    let dated = format!("{text} {year}");
    YEARLESS_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&dated, format).ok())
}

const DISPLAY_DATE_FORMATS: &[&str] = &["%b %d, %Y", "%d %b %Y", "%Y-%m-%d", "%m/%d/%Y"];

/// Parse a full date as printed on video cards, e.g. `Oct 1, 2019`
pub fn parse_display_date(text: &str) -> Option<NaiveDate> {
    let text = collapse_whitespace(text);
    DISPLAY_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&text, format).ok())
}

/// Drop one pair of surrounding characters, as in `(1,234)` -> `1,234`
pub fn strip_wrapping(text: &str) -> &str {
    let text = text.trim();
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => chars.as_str(),
        _ => "",
    }
}
