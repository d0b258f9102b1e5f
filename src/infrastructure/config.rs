//! Configuration infrastructure
//!
//! Configuration is layered, later layers overriding earlier ones:
//! 1. Built-in defaults (see [`defaults`])
//! 2. Optional TOML file (explicit path, or `<config dir>/serp-extract/config.toml`)
//! 3. `SERP_EXTRACT_*` environment variables, `__` separating nested keys
//!    (e.g. `SERP_EXTRACT_PARSING__SEARCH_ORIGIN`)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::infrastructure::parsing::config::SelectorConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub parsing: ParsingConfig,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console output (stderr)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Directory for the log file; the platform data directory when unset
    pub log_dir: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "html5ever": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("html5ever".to_string(), "warn".to_string());
                filters.insert("selectors".to_string(), "warn".to_string());
                filters.insert("serp_extract".to_string(), defaults::LOG_LEVEL.to_string());
                filters
            },
        }
    }
}

/// Extraction engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Origin relative result links are resolved against
    pub search_origin: String,

    /// Features to extract. Omitting the table enables every feature.
    pub features: FeatureOptions,

    /// Selector tables, any field of which may be overridden
    pub selectors: SelectorConfig,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            search_origin: defaults::SEARCH_ORIGIN.to_string(),
            features: FeatureOptions::all(),
            selectors: SelectorConfig::default(),
        }
    }
}

/// A page feature that can be switched on or off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Organic,
    Related,
    Pagination,
    Ads,
    Hotels,
    Videos,
    Shop,
    Stories,
    Locals,
    KnowledgeGraph,
}

impl Feature {
    pub const ALL: [Feature; 10] = [
        Feature::Organic,
        Feature::Related,
        Feature::Pagination,
        Feature::Ads,
        Feature::Hotels,
        Feature::Videos,
        Feature::Shop,
        Feature::Stories,
        Feature::Locals,
        Feature::KnowledgeGraph,
    ];

    /// Name used in option mappings and on the command line
    pub fn name(self) -> &'static str {
        match self {
            Feature::Organic => "organic",
            Feature::Related => "related",
            Feature::Pagination => "pagination",
            Feature::Ads => "ads",
            Feature::Hotels => "hotels",
            Feature::Videos => "videos",
            Feature::Shop => "shop",
            Feature::Stories => "stories",
            Feature::Locals => "locals",
            Feature::KnowledgeGraph => "knowledgeGraph",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = String;

    /// Case-insensitive; `knowledge_graph` is accepted for `knowledgeGraph`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "").to_ascii_lowercase();
        Feature::ALL
            .into_iter()
            .find(|feature| feature.name().to_ascii_lowercase() == normalized)
            .ok_or_else(|| format!("unknown feature '{}'", s.trim()))
    }
}

/// Per-feature switches.
///
/// A flag is on only when explicitly `true`: the default (and an empty
/// mapping) enables nothing. Pass `None` instead of options to parse
/// everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureOptions {
    pub organic: bool,
    pub related: bool,
    pub pagination: bool,
    pub ads: bool,
    pub hotels: bool,
    pub videos: bool,
    pub shop: bool,
    pub stories: bool,
    pub locals: bool,
    #[serde(
        rename = "knowledgeGraph",
        alias = "knowledge_graph",
        alias = "knowledgegraph"
    )]
    pub knowledge_graph: bool,
}

impl FeatureOptions {
    pub fn all() -> Self {
        let mut options = Self::none();
        for feature in Feature::ALL {
            options.set(feature, true);
        }
        options
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Build options from a name to flag mapping; unknown names are ignored
    pub fn from_map(map: &HashMap<String, bool>) -> Self {
        let mut options = Self::none();
        for (name, enabled) in map {
            match name.parse::<Feature>() {
                Ok(feature) => options.set(feature, *enabled),
                Err(e) => warn!("Ignoring feature option: {}", e),
            }
        }
        options
    }

    /// Enable exactly the features named in a comma separated list
    pub fn from_list(list: &str) -> Self {
        let map: HashMap<String, bool> = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| (name.to_string(), true))
            .collect();
        Self::from_map(&map)
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Organic => self.organic,
            Feature::Related => self.related,
            Feature::Pagination => self.pagination,
            Feature::Ads => self.ads,
            Feature::Hotels => self.hotels,
            Feature::Videos => self.videos,
            Feature::Shop => self.shop,
            Feature::Stories => self.stories,
            Feature::Locals => self.locals,
            Feature::KnowledgeGraph => self.knowledge_graph,
        }
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        let flag = match feature {
            Feature::Organic => &mut self.organic,
            Feature::Related => &mut self.related,
            Feature::Pagination => &mut self.pagination,
            Feature::Ads => &mut self.ads,
            Feature::Hotels => &mut self.hotels,
            Feature::Videos => &mut self.videos,
            Feature::Shop => &mut self.shop,
            Feature::Stories => &mut self.stories,
            Feature::Locals => &mut self.locals,
            Feature::KnowledgeGraph => &mut self.knowledge_graph,
        };
        *flag = enabled;
    }

    pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL
            .into_iter()
            .filter(move |feature| self.is_enabled(*feature))
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(default_path) = Self::default_config_path() {
                    builder = builder.add_source(config::File::from(default_path).required(false));
                }
            }
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(defaults::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// `<platform config dir>/serp-extract/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(defaults::CONFIG_DIR_NAME)
                .join(defaults::CONFIG_FILE_NAME)
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = self.parsing.search_origin.trim();
        if origin.is_empty() {
            return Err(ConfigError::Validation {
                message: "parsing.search_origin must not be empty".to_string(),
            });
        }

        match Url::parse(origin) {
            Ok(url) if url.has_host() => Ok(()),
            _ => Err(ConfigError::Validation {
                message: format!("parsing.search_origin must be an absolute URL, got '{origin}'"),
            }),
        }
    }
}

/// Default configuration values
pub mod defaults {
    /// Search engine origin relative result links resolve against
    pub const SEARCH_ORIGIN: &str = "https://www.google.com";

    /// Environment variable prefix
    pub const ENV_PREFIX: &str = "SERP_EXTRACT";

    pub const CONFIG_DIR_NAME: &str = "serp-extract";
    pub const CONFIG_FILE_NAME: &str = "config.toml";

    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Default JSON format setting
    pub const LOG_JSON_FORMAT: bool = false;

    /// Default console output setting
    pub const LOG_CONSOLE_OUTPUT: bool = true;

    /// Default file output setting
    pub const LOG_FILE_OUTPUT: bool = false;

    pub const LOG_FILE_NAME: &str = "serp-extract.log";
}
