//! Organic listings: featured snippets, regular results and their sitelinks
//!
//! Featured and regular results share one position counter, held by
//! [`OrganicAccumulator`], so positions run contiguously from 1 with featured
//! entries first.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::{OrganicSelectors, SitelinkSelectors};
use super::context::ParseContext;
use super::dom;
use super::normalize;
use super::{compile_selector, compile_selector_group, FeatureDetector, ParsingResult};
use crate::domain::serp::{OrganicResult, RichSnippet, Serp, Sitelink, SitelinkType};
use crate::infrastructure::config::Feature;

/// Running list of organic results, numbering each one as it is pushed
#[derive(Debug, Default)]
pub struct OrganicAccumulator {
    results: Vec<OrganicResult>,
    last_position: u32,
}

impl OrganicAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result, assigning it the next position. Returns that position.
    pub fn push(&mut self, mut result: OrganicResult) -> u32 {
        self.last_position += 1;
        result.position = self.last_position;
        self.results.push(result);
        self.last_position
    }

    pub fn next_position(&self) -> u32 {
        self.last_position + 1
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_results(self) -> Vec<OrganicResult> {
        self.results
    }
}

/// Card and inline sitelinks under one organic result
struct SitelinkExtractor {
    card_scope: Selector,
    cards: Selector,
    card_href: Selector,
    card_title: Selector,
    card_snippet: Selector,
    inline_scope: Selector,
    inline: Selector,
}

impl SitelinkExtractor {
    fn with_config(selectors: &SitelinkSelectors) -> ParsingResult<Self> {
        Ok(Self {
            card_scope: compile_selector("sitelinks.card_scope", &selectors.card_scope)?,
            cards: compile_selector("sitelinks.cards", &selectors.cards)?,
            card_href: compile_selector("sitelinks.card_href", &selectors.card_href)?,
            card_title: compile_selector("sitelinks.card_title", &selectors.card_title)?,
            card_snippet: compile_selector("sitelinks.card_snippet", &selectors.card_snippet)?,
            inline_scope: compile_selector("sitelinks.inline_scope", &selectors.inline_scope)?,
            inline: compile_selector("sitelinks.inline", &selectors.inline)?,
        })
    }

    /// Cards win over inline links; a result never mixes the two.
    fn extract(&self, anchor: ElementRef<'_>) -> Option<Vec<Sitelink>> {
        let card_scope = dom::closest(anchor, &self.card_scope)
            .filter(|scope| dom::exists(*scope, &self.cards));

        let sitelinks: Vec<Sitelink> = if let Some(scope) = card_scope {
            scope
                .select(&self.cards)
                .map(|card| Sitelink {
                    title: dom::select_text(card, &self.card_title),
                    href: dom::select_attr(card, &self.card_href, "href").unwrap_or_default(),
                    snippet: Some(dom::select_text(card, &self.card_snippet)),
                    sitelink_type: SitelinkType::Card,
                })
                .collect()
        } else {
            let scope = dom::closest(anchor, &self.inline_scope)?;
            scope
                .select(&self.inline)
                .map(|link| Sitelink {
                    title: dom::text(link),
                    href: dom::attr(link, "href").unwrap_or_default(),
                    snippet: None,
                    sitelink_type: SitelinkType::Inline,
                })
                .collect()
        };

        if sitelinks.is_empty() {
            None
        } else {
            Some(sitelinks)
        }
    }
}

/// Detector for featured and regular organic results
pub struct OrganicDetector {
    results: Selector,
    featured: Selector,
    featured_container: Selector,
    title: Selector,
    snippet_terms: Selector,
    rich_snippet: Selector,
    rich_snippet_key: Selector,
    rich_snippet_value: Selector,
    action_menu_scope: Selector,
    action_menu_links: Selector,
    cached_label: String,
    similar_label: String,
    sitelinks: SitelinkExtractor,
}

impl OrganicDetector {
    /// Create detector with custom selector configuration
    pub fn with_config(
        selectors: &OrganicSelectors,
        sitelinks: &SitelinkSelectors,
    ) -> ParsingResult<Self> {
        Ok(Self {
            results: compile_selector_group("organic.results", &selectors.results)?,
            featured: compile_selector("organic.featured", &selectors.featured)?,
            featured_container: compile_selector(
                "organic.featured_container",
                &selectors.featured_container,
            )?,
            title: compile_selector("organic.title", &selectors.title)?,
            snippet_terms: compile_selector("organic.snippet_terms", &selectors.snippet_terms)?,
            rich_snippet: compile_selector("organic.rich_snippet", &selectors.rich_snippet)?,
            rich_snippet_key: compile_selector(
                "organic.rich_snippet_key",
                &selectors.rich_snippet_key,
            )?,
            rich_snippet_value: compile_selector(
                "organic.rich_snippet_value",
                &selectors.rich_snippet_value,
            )?,
            action_menu_scope: compile_selector(
                "organic.action_menu_scope",
                &selectors.action_menu_scope,
            )?,
            action_menu_links: compile_selector(
                "organic.action_menu_links",
                &selectors.action_menu_links,
            )?,
            cached_label: selectors.cached_label.clone(),
            similar_label: selectors.similar_label.clone(),
            sitelinks: SitelinkExtractor::with_config(sitelinks)?,
        })
    }

    /// Featured snippets. Must run before [`Self::detect_regular`].
    pub fn detect_featured(
        &self,
        html: &Html,
        context: &ParseContext,
        accumulator: &mut OrganicAccumulator,
    ) {
        for anchor in html.select(&self.featured) {
            let url = dom::attr(anchor, "href").unwrap_or_default();
            let snippet = dom::closest(anchor, &self.featured_container)
                .and_then(dom::prev_element_sibling)
                .map(dom::text)
                .unwrap_or_default();

            let position = accumulator.push(OrganicResult {
                featured: Some(true),
                snippet,
                ..self.base_result(anchor, url, context)
            });
            debug!("Featured organic result at position {}", position);
        }
    }

    /// Regular organic results in document order across every layout
    pub fn detect_regular(
        &self,
        html: &Html,
        context: &ParseContext,
        accumulator: &mut OrganicAccumulator,
    ) {
        for anchor in html.select(&self.results) {
            let url = dom::attr(anchor, "href").unwrap_or_default();
            let snippet_block = dom::parent_element(anchor).and_then(dom::next_element_sibling);
            let (cached_url, similar_url) = self.action_menu_urls(anchor);

            accumulator.push(OrganicResult {
                snippet: snippet_block.map(dom::text).unwrap_or_default(),
                snippet_matched: Some(self.snippet_terms(snippet_block)),
                rich_snippet: Some(self.rich_snippets(snippet_block)),
                sitelinks: self.sitelinks.extract(anchor),
                cached_url,
                similar_url,
                ..self.base_result(anchor, url, context)
            });
        }
    }

    fn base_result(&self, anchor: ElementRef<'_>, url: String, context: &ParseContext) -> OrganicResult {
        OrganicResult {
            position: 0,
            domain: normalize::domain(&url, &context.search_origin).unwrap_or_default(),
            link_type: normalize::link_type(&url, &context.search_origin),
            title: dom::select_text(anchor, &self.title),
            url,
            snippet: String::new(),
            sitelinks: None,
            snippet_matched: None,
            rich_snippet: None,
            cached_url: None,
            similar_url: None,
            featured: None,
        }
    }

    fn snippet_terms(&self, block: Option<ElementRef<'_>>) -> Vec<String> {
        block
            .map(|block| block.select(&self.snippet_terms).map(dom::text).collect())
            .unwrap_or_default()
    }

    fn rich_snippets(&self, block: Option<ElementRef<'_>>) -> Vec<RichSnippet> {
        let Some(block) = block else {
            return Vec::new();
        };
        block
            .select(&self.rich_snippet)
            .map(|rich| RichSnippet {
                key: dom::first_text(rich, &self.rich_snippet_key),
                value: dom::first_text(rich, &self.rich_snippet_value).unwrap_or_default(),
            })
            .collect()
    }

    fn action_menu_urls(&self, anchor: ElementRef<'_>) -> (Option<String>, Option<String>) {
        let mut cached = None;
        let mut similar = None;
        if let Some(scope) = dom::closest(anchor, &self.action_menu_scope) {
            for link in scope.select(&self.action_menu_links) {
                let label = dom::text(link);
                if label == self.cached_label {
                    cached = dom::attr(link, "href");
                } else if label == self.similar_label {
                    similar = dom::attr(link, "href");
                }
            }
        }
        (cached, similar)
    }
}

impl FeatureDetector for OrganicDetector {
    fn feature(&self) -> Feature {
        Feature::Organic
    }

    fn detect(&self, html: &Html, context: &ParseContext, serp: &mut Serp) {
        let mut accumulator = OrganicAccumulator::new();
        self.detect_featured(html, context, &mut accumulator);
        self.detect_regular(html, context, &mut accumulator);

        debug!("Found {} organic results", accumulator.len());
        serp.organic = accumulator.into_results();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::serp::LinkType;
    use crate::infrastructure::parsing::config::SelectorConfig;

    fn detector() -> OrganicDetector {
        let config = SelectorConfig::default();
        OrganicDetector::with_config(&config.organic, &config.sitelinks).unwrap()
    }

    fn detect(body: &str) -> Serp {
        let html = Html::parse_document(&format!(
            r#"<html><body class="srp"><div id="search"><div id="rso">{body}</div></div></body></html>"#
        ));
        let mut serp = Serp::default();
        detector().detect(&html, &ParseContext::default(), &mut serp);
        serp
    }

    const REGULAR: &str = r#"
        <div class="g"><div>
            <div class="yuRUbf">
                <a href="https://www.rust-lang.org/"><h3>Rust Programming Language</h3></a>
                <span><ol><li class="action-menu-item"><a href="https://cache.example/rust">Cached</a></li>
                <li class="action-menu-item"><a href="/search?q=related:rust-lang.org">Similar</a></li></ol></span>
            </div>
            <div class="IsZvec"><div><span>A language empowering <em>everyone</em> to build
                <em>reliable</em> software.</span></div>
                <div class="rEYMH"><span class="YrbPuc">Stable:</span><span class="wHYlTd">1.80</span></div>
                <div class="rEYMH"><span class="wHYlTd">Open source</span></div>
            </div>
        </div></div>
    "#;

    #[test]
    fn test_regular_result() {
        let serp = detect(REGULAR);
        assert_eq!(serp.organic.len(), 1);

        let result = &serp.organic[0];
        assert_eq!(result.position, 1);
        assert_eq!(result.url, "https://www.rust-lang.org/");
        assert_eq!(result.domain, "www.rust-lang.org");
        assert_eq!(result.link_type, LinkType::Home);
        assert_eq!(result.title, "Rust Programming Language");
        assert!(result.snippet.starts_with("A language empowering everyone"));
        assert_eq!(
            result.snippet_matched,
            Some(vec!["everyone".to_string(), "reliable".to_string()])
        );
        assert_eq!(
            result.rich_snippet,
            Some(vec![
                RichSnippet {
                    key: Some("Stable:".to_string()),
                    value: "1.80".to_string()
                },
                RichSnippet {
                    key: None,
                    value: "Open source".to_string()
                },
            ])
        );
        assert_eq!(result.cached_url.as_deref(), Some("https://cache.example/rust"));
        assert_eq!(
            result.similar_url.as_deref(),
            Some("/search?q=related:rust-lang.org")
        );
        assert_eq!(result.featured, None);
        assert_eq!(result.sitelinks, None);
    }

    #[test]
    fn test_featured_comes_first() {
        let featured = r#"
            <div class="ULSxyf"><div class="g mnr-c">
                <div class="featured-text">Rust is a multi-paradigm language.</div>
                <div class="g"><div class="c2xzTb"><div>
                    <div class="yuRUbf"><a href="https://en.wikipedia.org/wiki/Rust"><h3>Rust - Wikipedia</h3></a></div>
                </div></div></div>
            </div></div>
        "#;
        let serp = detect(&format!("{featured}{REGULAR}{REGULAR}"));

        let positions: Vec<u32> = serp.organic.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);

        let first = &serp.organic[0];
        assert_eq!(first.featured, Some(true));
        assert_eq!(first.title, "Rust - Wikipedia");
        assert_eq!(first.snippet, "Rust is a multi-paradigm language.");
        assert_eq!(first.link_type, LinkType::Landing);
        assert_eq!(first.snippet_matched, None);
        assert_eq!(serp.organic[1].featured, None);
    }

    #[test]
    fn test_relative_href_uses_engine_domain() {
        let serp = detect(
            r#"<div class="g"><div><div class="yuRUbf"><a href="/url?q=https://docs.rs"><h3>Docs</h3></a></div></div></div>"#,
        );
        assert_eq!(serp.organic[0].domain, "www.google.com");
        assert_eq!(serp.organic[0].snippet, "");
        assert_eq!(serp.organic[0].snippet_matched, Some(Vec::new()));
    }

    #[test]
    fn test_card_sitelinks() {
        let serp = detect(
            r#"<div class="g"><div>
                <div class="yuRUbf"><a href="https://docs.rs/"><h3>Docs.rs</h3></a></div>
                <div class="snippet">Documentation host</div>
                <table><tr>
                    <td class="usJj9c"><h3><a href="https://docs.rs/about">About</a></h3><div class="st">What docs.rs is</div></td>
                    <td class="usJj9c"><h3><a href="https://docs.rs/releases">Releases</a></h3><div class="st">Recent builds</div></td>
                </tr></table>
                <div class="tF2Cxc"><div class="HiHjCd"><a href="https://docs.rs/inline">Inline</a></div></div>
            </div></div>"#,
        );
        let sitelinks = serp.organic[0].sitelinks.as_ref().unwrap();
        assert_eq!(sitelinks.len(), 2);
        assert!(sitelinks.iter().all(|s| s.sitelink_type == SitelinkType::Card));
        assert_eq!(sitelinks[0].title, "About");
        assert_eq!(sitelinks[0].href, "https://docs.rs/about");
        assert_eq!(sitelinks[1].snippet.as_deref(), Some("Recent builds"));
    }

    #[test]
    fn test_inline_sitelinks() {
        let serp = detect(
            r#"<div class="g tF2Cxc">
                <div class="yuRUbf"><a href="https://crates.io/"><h3>crates.io</h3></a></div>
                <div class="snippet">The Rust community's crate registry</div>
                <div class="HiHjCd"><a href="https://crates.io/policies">Usage
                    Policy</a> · <a href="https://crates.io/me">Account</a></div>
            </div>"#,
        );
        let sitelinks = serp.organic[0].sitelinks.as_ref().unwrap();
        assert_eq!(sitelinks.len(), 2);
        assert_eq!(sitelinks[0].title, "Usage Policy");
        assert_eq!(sitelinks[0].snippet, None);
        assert!(sitelinks.iter().all(|s| s.sitelink_type == SitelinkType::Inline));
    }

    #[test]
    fn test_accumulator_numbering() {
        let mut accumulator = OrganicAccumulator::new();
        assert_eq!(accumulator.next_position(), 1);

        let mut template = detect(REGULAR).organic.remove(0);
        assert_eq!(accumulator.push(template.clone()), 1);
        // Incoming positions are overwritten
        template.position = 40;
        assert_eq!(accumulator.push(template.clone()), 2);
        assert_eq!(accumulator.push(template), 3);
        assert_eq!(accumulator.len(), 3);
        assert_eq!(accumulator.next_position(), 4);
        assert_eq!(
            accumulator
                .into_results()
                .iter()
                .map(|r| r.position)
                .collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }
}
