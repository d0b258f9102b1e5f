//! SERP Extract - structured records from saved search results pages
//!
//! Converts the HTML of one search engine results page into a [`Serp`]
//! record: organic listings, ads, hotels, knowledge graph, videos, shopping,
//! local results, top stories, related searches and pagination.
//!
//! ```no_run
//! use serp_extract::SerpParser;
//!
//! # fn main() -> anyhow::Result<()> {
//! let parser = SerpParser::with_defaults()?;
//! let html = std::fs::read_to_string("results.html")?;
//! let serp = parser.parse(&html, None);
//! println!("{}", serde_json::to_string_pretty(&serp)?);
//! # Ok(())
//! # }
//! ```

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::SerpParser;
pub use domain::Serp;
pub use infrastructure::{FeatureOptions, ParseContext, ParsingError, ParsingResult};
