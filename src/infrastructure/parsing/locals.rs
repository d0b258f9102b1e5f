//! Local business pack

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::LocalSelectors;
use super::context::ParseContext;
use super::dom;
use super::normalize;
use super::{compile_pattern, compile_selector, FeatureDetector, ParsingResult};
use crate::domain::serp::{Local, Serp};
use crate::infrastructure::config::Feature;

pub struct LocalsDetector {
    feature: Selector,
    locals: Selector,
    name: Selector,
    rating: Selector,
    reviews: Selector,
    reviews_regex: Regex,
    expensiveness: Selector,
    local_type: Selector,
    type_regex: Regex,
    address: Selector,
    address_regex: Regex,
    distance: Selector,
    distance_regex: Regex,
    description: Selector,
}

impl LocalsDetector {
    pub fn with_config(selectors: &LocalSelectors) -> ParsingResult<Self> {
        Ok(Self {
            feature: compile_selector("locals.feature", &selectors.feature)?,
            locals: compile_selector("locals.locals", &selectors.locals)?,
            name: compile_selector("locals.name", &selectors.name)?,
            rating: compile_selector("locals.rating", &selectors.rating)?,
            reviews: compile_selector("locals.reviews", &selectors.reviews)?,
            reviews_regex: compile_pattern("locals.reviews_regex", &selectors.reviews_regex)?,
            expensiveness: compile_selector("locals.expensiveness", &selectors.expensiveness)?,
            local_type: compile_selector("locals.local_type", &selectors.local_type)?,
            type_regex: compile_pattern("locals.type_regex", &selectors.type_regex)?,
            address: compile_selector("locals.address", &selectors.address)?,
            address_regex: compile_pattern("locals.address_regex", &selectors.address_regex)?,
            distance: compile_selector("locals.distance", &selectors.distance)?,
            distance_regex: compile_pattern("locals.distance_regex", &selectors.distance_regex)?,
            description: compile_selector("locals.description", &selectors.description)?,
        })
    }

    fn local(&self, item: ElementRef<'_>) -> Local {
        let matched = |selector: &Selector, pattern: &Regex| {
            normalize::first_match(&dom::select_text(item, selector), pattern)
                .trim()
                .to_string()
        };

        Local {
            name: dom::select_text(item, &self.name),
            rating: dom::select_text(item, &self.rating),
            reviews: matched(&self.reviews, &self.reviews_regex),
            // price level is rendered as repeated currency symbols
            expensiveness: dom::select_text(item, &self.expensiveness).chars().count(),
            local_type: matched(&self.local_type, &self.type_regex),
            address: matched(&self.address, &self.address_regex),
            distance: matched(&self.distance, &self.distance_regex),
            description: dom::select_text(item, &self.description),
        }
    }
}

impl FeatureDetector for LocalsDetector {
    fn feature(&self) -> Feature {
        Feature::Locals
    }

    fn detect(&self, html: &Html, _context: &ParseContext, serp: &mut Serp) {
        let Some(feature) = html.select(&self.feature).next() else {
            return;
        };

        let locals: Vec<Local> = feature.select(&self.locals).map(|item| self.local(item)).collect();
        debug!("Found {} local results", locals.len());
        serp.locals = Some(locals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(body: &str) -> Serp {
        let html = Html::parse_document(&format!("<html><body class=\"srp\">{body}</body></html>"));
        let detector = LocalsDetector::with_config(&LocalSelectors::default()).unwrap();
        let mut serp = Serp::default();
        detector.detect(&html, &ParseContext::default(), &mut serp);
        serp
    }

    #[test]
    fn test_local_pack() {
        let serp = detect(
            r#"<div data-hveid="CBYQAQ">
                <div class="C8TUKc">
                    <div class="dbg0pd">Cantina Ferris</div>
                    <div class="rllt__details">
                        <div><span class="YDIN4c YrbPuc">4.6</span><span class="HypWnf YrbPuc">(312)</span>
                            · <span role="img">$$</span> · Italian restaurant</div>
                        <div>0.4 mi · Rua Augusta 10</div>
                    </div>
                    <div class="rllt__wrapped"><span>"Great pasta and friendly staff"</span></div>
                </div>
            </div>"#,
        );

        let locals = serp.locals.unwrap();
        assert_eq!(locals.len(), 1);

        let local = &locals[0];
        assert_eq!(local.name, "Cantina Ferris");
        assert_eq!(local.rating, "4.6");
        assert_eq!(local.reviews, "312");
        assert_eq!(local.expensiveness, 2);
        assert_eq!(local.local_type, "Italian restaurant");
        assert_eq!(local.distance, "0.4 mi");
        assert_eq!(local.address, "Rua Augusta 10");
        assert_eq!(local.description, "\"Great pasta and friendly staff\"");
    }

    #[test]
    fn test_absent_pack() {
        assert!(detect(r#"<div class="C8TUKc"></div>"#).locals.is_none());
    }
}
