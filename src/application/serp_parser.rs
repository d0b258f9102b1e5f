//! Results-page parser
//!
//! Holds every compiled detector and runs the enabled ones, in a fixed order,
//! over each document. Parsing never fails once the parser is built.

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::domain::serp::Serp;
use crate::infrastructure::config::{FeatureOptions, ParsingConfig};
use crate::infrastructure::parsing::config::{PageSelectors, SelectorConfig};
use crate::infrastructure::parsing::{
    compile_pattern, compile_selector, dom, normalize, AdsDetector, FeatureDetector,
    HotelsDetector, KnowledgeGraphDetector, LocalsDetector, OrganicDetector, PaginationDetector,
    ParseContext, ParsingResult, RelatedKeywordsDetector, ShoppingDetector, TopStoriesDetector,
    VideosDetector,
};

/// Page-level markers and scalars read before any detector runs
struct PageScalars {
    no_results: Selector,
    no_results_text: String,
    results_page: Selector,
    keyword: Selector,
    result_stats: Selector,
    current_page: Selector,
    total_results_regex: Regex,
    time_taken_regex: Regex,
}

impl PageScalars {
    fn with_config(selectors: &PageSelectors) -> ParsingResult<Self> {
        Ok(Self {
            no_results: compile_selector("page.no_results", &selectors.no_results)?,
            no_results_text: selectors.no_results_text.clone(),
            results_page: compile_selector("page.results_page", &selectors.results_page)?,
            keyword: compile_selector("page.keyword", &selectors.keyword)?,
            result_stats: compile_selector("page.result_stats", &selectors.result_stats)?,
            current_page: compile_selector("page.current_page", &selectors.current_page)?,
            total_results_regex: compile_pattern(
                "page.total_results_regex",
                &selectors.total_results_regex,
            )?,
            time_taken_regex: compile_pattern("page.time_taken_regex", &selectors.time_taken_regex)?,
        })
    }

    /// Exactly one "did not match any documents" notice
    fn is_no_results(&self, html: &Html) -> bool {
        html.select(&self.no_results)
            .filter(|notice| dom::text(*notice).contains(self.no_results_text.trim()))
            .count()
            == 1
    }

    fn is_results_page(&self, html: &Html) -> bool {
        html.select(&self.results_page).next().is_some()
    }

    fn read(&self, html: &Html, serp: &mut Serp) {
        let document = html.root_element();
        let stats = dom::select_text(document, &self.result_stats);

        serp.keyword = dom::select_attr(document, &self.keyword, "value").unwrap_or_default();
        serp.total_results = normalize::total_results(&stats, &self.total_results_regex);
        serp.time_taken = normalize::time_taken(&stats, &self.time_taken_regex);
        serp.current_page = dom::select_text(document, &self.current_page)
            .parse::<u32>()
            .ok()
            .filter(|page| *page > 0)
            .unwrap_or(1);
    }
}

/// Search results page parser
pub struct SerpParser {
    page: PageScalars,
    detectors: Vec<Box<dyn FeatureDetector>>,
    context: ParseContext,
}

impl SerpParser {
    /// Create a parser from selector tables, compiling every selector and pattern
    pub fn new(selectors: SelectorConfig) -> ParsingResult<Self> {
        let detectors = Self::default_detectors(&selectors)?;
        Self::with_detectors(&selectors.page, detectors)
    }

    /// Create a parser with the built-in selector tables
    pub fn with_defaults() -> ParsingResult<Self> {
        Self::new(SelectorConfig::default())
    }

    /// Create a parser from the `[parsing]` configuration section
    pub fn from_config(config: &ParsingConfig) -> ParsingResult<Self> {
        Ok(Self::new(config.selectors.clone())?
            .with_context(ParseContext::new(config.search_origin.clone())))
    }

    /// Create a parser running `detectors` in the given order
    pub fn with_detectors(
        page: &PageSelectors,
        detectors: Vec<Box<dyn FeatureDetector>>,
    ) -> ParsingResult<Self> {
        Ok(Self {
            page: PageScalars::with_config(page)?,
            detectors,
            context: ParseContext::default(),
        })
    }

    /// Every detector, in the order they populate the record
    pub fn default_detectors(
        selectors: &SelectorConfig,
    ) -> ParsingResult<Vec<Box<dyn FeatureDetector>>> {
        Ok(vec![
            Box::new(OrganicDetector::with_config(&selectors.organic, &selectors.sitelinks)?),
            Box::new(RelatedKeywordsDetector::with_config(&selectors.related)?),
            Box::new(PaginationDetector::with_config(&selectors.pagination)?),
            Box::new(AdsDetector::with_config(&selectors.ads)?),
            Box::new(HotelsDetector::with_config(&selectors.hotels)?),
            Box::new(VideosDetector::with_config(&selectors.videos)?),
            Box::new(ShoppingDetector::with_config(&selectors.shopping)?),
            Box::new(TopStoriesDetector::with_config(&selectors.top_stories)?),
            Box::new(LocalsDetector::with_config(&selectors.locals)?),
            Box::new(KnowledgeGraphDetector::with_config(&selectors.knowledge_graph)?),
        ])
    }

    /// Replace the context used by [`Self::parse`]
    pub fn with_context(mut self, context: ParseContext) -> Self {
        self.context = context;
        self
    }

    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    /// Parse one results page. `None` options enable every feature.
    pub fn parse(&self, html: &str, options: Option<&FeatureOptions>) -> Serp {
        self.parse_with_context(html, options, &self.context)
    }

    /// Parse one results page with an explicit context
    pub fn parse_with_context(
        &self,
        html: &str,
        options: Option<&FeatureOptions>,
        context: &ParseContext,
    ) -> Serp {
        let document = Html::parse_document(html);
        let options = options.copied().unwrap_or_else(FeatureOptions::all);
        let mut serp = Serp::default();

        if self.page.is_no_results(&document) {
            info!("No results page");
            return Serp::no_results();
        }
        if !self.page.is_results_page(&document) {
            debug!("Document is not a results page, nothing to extract");
            return serp;
        }

        self.page.read(&document, &mut serp);
        for detector in &self.detectors {
            let feature = detector.feature();
            if !options.is_enabled(feature) {
                debug!("Skipping disabled feature {}", feature);
                continue;
            }
            debug!("Running {} detector", feature);
            detector.detect(&document, context, &mut serp);
        }

        info!(
            "Parsed results page for '{}': page {}, {} organic results, {} related keywords",
            serp.keyword,
            serp.current_page,
            serp.organic.len(),
            serp.related_keywords.len()
        );
        serp
    }
}
