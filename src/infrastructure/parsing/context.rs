//! Parsing context for results-page extraction
//!
//! Carries the values a detector needs that do not come from the page
//! itself: the search engine origin used to absolutize relative links and
//! the calendar year appended to dates the page prints without one.

use chrono::Datelike;

use crate::infrastructure::config::defaults::SEARCH_ORIGIN;

/// Context information for parsing operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseContext {
    /// Origin that relative (`/...`) and fragment (`#...`) links resolve against
    pub search_origin: String,

    /// Year appended to check-in/check-out dates
    pub current_year: i32,
}

impl ParseContext {
    /// Create new parse context for the given search engine origin
    pub fn new(search_origin: impl Into<String>) -> Self {
        Self {
            search_origin: search_origin.into().trim_end_matches('/').to_string(),
            current_year: chrono::Local::now().year(),
        }
    }

    /// Pin the year used for dates printed without one
    pub fn with_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new(SEARCH_ORIGIN)
    }
}
