//! Related searches and the pagination bar

use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::config::{PaginationSelectors, RelatedSelectors};
use super::context::ParseContext;
use super::dom;
use super::{compile_selector, FeatureDetector, ParsingResult};
use crate::domain::serp::{PaginationEntry, RelatedKeyword, Serp};
use crate::infrastructure::config::Feature;

pub struct RelatedKeywordsDetector {
    keywords: Selector,
}

impl RelatedKeywordsDetector {
    pub fn with_config(selectors: &RelatedSelectors) -> ParsingResult<Self> {
        Ok(Self {
            keywords: compile_selector("related.keywords", &selectors.keywords)?,
        })
    }
}

impl FeatureDetector for RelatedKeywordsDetector {
    fn feature(&self) -> Feature {
        Feature::Related
    }

    fn detect(&self, html: &Html, _context: &ParseContext, serp: &mut Serp) {
        serp.related_keywords = html
            .select(&self.keywords)
            .map(|link| RelatedKeyword {
                keyword: dom::text(link),
                path: dom::attr(link, "href").unwrap_or_default(),
            })
            .collect();
        debug!("Found {} related keywords", serp.related_keywords.len());
    }
}

pub struct PaginationDetector {
    table: Selector,
    pages: Selector,
}

impl PaginationDetector {
    pub fn with_config(selectors: &PaginationSelectors) -> ParsingResult<Self> {
        Ok(Self {
            table: compile_selector("pagination.table", &selectors.table)?,
            pages: compile_selector("pagination.pages", &selectors.pages)?,
        })
    }
}

impl FeatureDetector for PaginationDetector {
    fn feature(&self) -> Feature {
        Feature::Pagination
    }

    /// The current page always comes first, with an empty path.
    fn detect(&self, html: &Html, _context: &ParseContext, serp: &mut Serp) {
        let mut pagination = vec![PaginationEntry {
            page: serp.current_page,
            path: String::new(),
        }];

        if let Some(table) = html.select(&self.table).next() {
            for link in table.select(&self.pages) {
                let label = dom::text(link);
                match label.parse::<u32>() {
                    Ok(page) => pagination.push(PaginationEntry {
                        page,
                        path: dom::attr(link, "href").unwrap_or_default(),
                    }),
                    Err(_) => warn!("Skipping pagination link with label '{}'", label),
                }
            }
        }

        debug!("Found {} pagination entries", pagination.len());
        serp.pagination = pagination;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body class="srp">
        <div class="y6Uyqe">
            <a class="k8XOCe" href="/search?q=rust+book"><div>rust <b>book</b></div></a>
            <a class="k8XOCe" href="/search?q=rust+async">rust async</a>
        </div>
        <table class="AaVjTc"><tr>
            <td class="d6cvqb"><span>Previous</span></td>
            <td class="YyVfkd">2</td>
            <td><a class="fl" href="/search?q=rust&amp;start=0">1</a></td>
            <td><a class="fl" href="/search?q=rust&amp;start=20">3</a></td>
            <td class="b"><a class="fl" href="/search?q=rust&amp;start=20">Next</a></td>
        </tr></table>
    </body></html>"#;

    #[test]
    fn test_related_keywords() {
        let html = Html::parse_document(PAGE);
        let detector = RelatedKeywordsDetector::with_config(&RelatedSelectors::default()).unwrap();
        let mut serp = Serp::default();
        detector.detect(&html, &ParseContext::default(), &mut serp);

        assert_eq!(
            serp.related_keywords,
            vec![
                RelatedKeyword {
                    keyword: "rust book".to_string(),
                    path: "/search?q=rust+book".to_string()
                },
                RelatedKeyword {
                    keyword: "rust async".to_string(),
                    path: "/search?q=rust+async".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_pagination_starts_with_current_page() {
        let html = Html::parse_document(PAGE);
        let detector = PaginationDetector::with_config(&PaginationSelectors::default()).unwrap();
        let mut serp = Serp {
            current_page: 2,
            ..Serp::default()
        };
        detector.detect(&html, &ParseContext::default(), &mut serp);

        let pages: Vec<u32> = serp.pagination.iter().map(|entry| entry.page).collect();
        assert_eq!(pages, vec![2, 1, 3]);
        assert_eq!(serp.pagination[0].path, "");
        assert_eq!(serp.pagination[2].path, "/search?q=rust&start=20");
    }

    #[test]
    fn test_pagination_without_table() {
        let html = Html::parse_document(r#"<html><body class="srp"></body></html>"#);
        let detector = PaginationDetector::with_config(&PaginationSelectors::default()).unwrap();
        let mut serp = Serp::default();
        detector.detect(&html, &ParseContext::default(), &mut serp);

        assert_eq!(
            serp.pagination,
            vec![PaginationEntry {
                page: 1,
                path: String::new()
            }]
        );
    }
}
