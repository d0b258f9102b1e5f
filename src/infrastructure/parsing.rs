//! Results-page extraction infrastructure
//!
//! One detector per page feature. Each detector compiles its selector table
//! once and then reads any number of parsed documents, writing only the
//! record fields it owns.

pub mod ads;
pub mod config;
pub mod context;
pub mod dom;
pub mod hotels;
pub mod knowledge_graph;
pub mod locals;
pub mod normalize;
pub mod organic;
pub mod related;
pub mod shopping;
pub mod top_stories;
pub mod videos;

// Re-export public types
pub use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
pub use ads::AdsDetector;
pub use config::SelectorConfig;
pub use context::ParseContext;
pub use hotels::HotelsDetector;
pub use knowledge_graph::KnowledgeGraphDetector;
pub use locals::LocalsDetector;
pub use organic::{OrganicAccumulator, OrganicDetector};
pub use related::{PaginationDetector, RelatedKeywordsDetector};
pub use shopping::ShoppingDetector;
pub use top_stories::TopStoriesDetector;
pub use videos::VideosDetector;

use regex::Regex;
use scraper::{Html, Selector};

use crate::domain::serp::Serp;
use crate::infrastructure::config::Feature;

/// A unit recognizing one page feature.
///
/// `detect` never fails: when the anchor selector does not match, the record
/// is left untouched.
pub trait FeatureDetector: Send + Sync {
    /// Feature flag gating this detector
    fn feature(&self) -> Feature;

    /// Read the parsed document and populate the fields this detector owns
    fn detect(&self, html: &Html, context: &ParseContext, serp: &mut Serp);
}

/// Compile a selector from a table field, naming the field on failure
pub fn compile_selector(field: &str, selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector)
        .map_err(|e| ParsingError::invalid_selector(field, selector, format!("{e:?}")))
}

/// Compile a regex pattern from a table field, naming the field on failure
pub fn compile_pattern(field: &str, pattern: &str) -> ParsingResult<Regex> {
    Regex::new(pattern).map_err(|e| ParsingError::invalid_pattern(field, pattern, e))
}

/// Compile alternative selectors into one whose matches come in document order
pub fn compile_selector_group(field: &str, selectors: &[String]) -> ParsingResult<Selector> {
    if selectors.is_empty() {
        return Err(ParsingError::configuration(
            field,
            format!("'{field}' needs at least one selector"),
        ));
    }
    compile_selector(field, &selectors.join(", "))
}
