//! Application layer module
//!
//! Orchestrates the extraction detectors into a single results-page parser.

pub mod serp_parser;

pub use serp_parser::SerpParser;
