//! Infrastructure layer: HTML extraction, configuration and logging

pub mod config; // Layered configuration and feature switches
pub mod logging; // Logging infrastructure
pub mod parsing; // Feature detectors and selector tables
pub mod parsing_error; // Construction-time error types

// Re-export commonly used items
pub use config::{AppConfig, ConfigError, Feature, FeatureOptions, LoggingConfig, ParsingConfig};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{FeatureDetector, ParseContext, SelectorConfig};
pub use parsing_error::{ParsingError, ParsingResult};
