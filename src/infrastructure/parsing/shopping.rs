//! Shopping (product listing ads) carousel

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::ShoppingSelectors;
use super::context::ParseContext;
use super::dom;
use super::normalize;
use super::{compile_pattern, compile_selector, FeatureDetector, ParsingResult};
use crate::domain::serp::{Serp, ShopResult};
use crate::infrastructure::config::Feature;

pub struct ShoppingDetector {
    feature: Selector,
    offers: Selector,
    img_link: Selector,
    title: Selector,
    price: Selector,
    price_regex: Regex,
    currency_regex: Regex,
    shopping_site: Selector,
    rating: Selector,
    rating_regex: Regex,
    votes: Selector,
    commodity: Selector,
}

impl ShoppingDetector {
    pub fn with_config(selectors: &ShoppingSelectors) -> ParsingResult<Self> {
        Ok(Self {
            feature: compile_selector("shopping.feature", &selectors.feature)?,
            offers: compile_selector("shopping.offers", &selectors.offers)?,
            img_link: compile_selector("shopping.img_link", &selectors.img_link)?,
            title: compile_selector("shopping.title", &selectors.title)?,
            price: compile_selector("shopping.price", &selectors.price)?,
            price_regex: compile_pattern("shopping.price_regex", &selectors.price_regex)?,
            currency_regex: compile_pattern("shopping.currency_regex", &selectors.currency_regex)?,
            shopping_site: compile_selector("shopping.shopping_site", &selectors.shopping_site)?,
            rating: compile_selector("shopping.rating", &selectors.rating)?,
            rating_regex: compile_pattern("shopping.rating_regex", &selectors.rating_regex)?,
            votes: compile_selector("shopping.votes", &selectors.votes)?,
            commodity: compile_selector("shopping.commodity", &selectors.commodity)?,
        })
    }

    fn offer(&self, offer: ElementRef<'_>) -> ShopResult {
        let price_text = dom::select_text(offer, &self.price);
        let rating = dom::select_attr(offer, &self.rating, "aria-label").and_then(|label| {
            normalize::parse_float(normalize::first_match(&label, &self.rating_regex))
        });
        let votes = dom::select_text(offer, &self.votes);

        ShopResult {
            img_link: dom::select_attr(offer, &self.img_link, "href").unwrap_or_default(),
            title: dom::select_text(offer, &self.title),
            price: normalize::parse_float(normalize::first_match(&price_text, &self.price_regex)),
            currency: normalize::first_match(&price_text, &self.currency_regex)
                .trim()
                .to_string(),
            shopping_site: dom::select_text(offer, &self.shopping_site),
            rating,
            votes: dom::non_empty(normalize::strip_wrapping(&votes).to_string()),
            commodity: dom::non_empty(dom::select_text(offer, &self.commodity)),
        }
    }
}

impl FeatureDetector for ShoppingDetector {
    fn feature(&self) -> Feature {
        Feature::Shop
    }

    fn detect(&self, html: &Html, _context: &ParseContext, serp: &mut Serp) {
        let Some(feature) = html.select(&self.feature).next() else {
            return;
        };

        let offers: Vec<ShopResult> = feature.select(&self.offers).map(|offer| self.offer(offer)).collect();
        debug!("Found {} shopping offers", offers.len());
        serp.shop_results = Some(offers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(body: &str) -> Serp {
        let html = Html::parse_document(&format!("<html><body class=\"srp\">{body}</body></html>"));
        let detector = ShoppingDetector::with_config(&ShoppingSelectors::default()).unwrap();
        let mut serp = Serp::default();
        detector.detect(&html, &ParseContext::default(), &mut serp);
        serp
    }

    #[test]
    fn test_offers() {
        let serp = detect(
            r#"<div class="top-pla-group-inner">
                <div class="pla-unit">
                    <a class="pla-unit-img-container-link" href="https://shop.example/p/1"><img></a>
                    <a href="https://shop.example/p/1"><span class="hCK2Zc">Rust in Action</span>
                        <span><g-review-stars><span aria-label="Rated 4.7 out of 5"></span></g-review-stars></span></a>
                    <div class="e10twf">$1,039.99</div>
                    <div class="LbUacb">Shop Example</div>
                    <div class="nbd1Bd"><span class="QhqGkb RnJeZd">(2k+)</span></div>
                    <div class="cYBBsb">Free shipping</div>
                </div>
                <div class="pla-unit">
                    <a href="https://books.example/r"><span class="hCK2Zc">Programming Rust</span></a>
                    <div class="e10twf">€45</div>
                </div>
                <div class="pla-unit view-all-unit"><a href="/shopping">View all</a></div>
            </div>"#,
        );

        let offers = serp.shop_results.unwrap();
        assert_eq!(offers.len(), 2);

        let first = &offers[0];
        assert_eq!(first.img_link, "https://shop.example/p/1");
        assert_eq!(first.title, "Rust in Action");
        assert_eq!(first.price, Some(1039.99));
        assert_eq!(first.currency, "$");
        assert_eq!(first.shopping_site, "Shop Example");
        assert_eq!(first.rating, Some(4.7));
        assert_eq!(first.votes.as_deref(), Some("2k+"));
        assert_eq!(first.commodity.as_deref(), Some("Free shipping"));

        let second = &offers[1];
        assert_eq!(second.price, Some(45.0));
        assert_eq!(second.currency, "€");
        assert_eq!(second.rating, None);
        assert_eq!(second.votes, None);
        assert_eq!(second.commodity, None);
    }

    #[test]
    fn test_absent_feature() {
        assert!(detect(r#"<div class="pla-unit"></div>"#).shop_results.is_none());
    }
}
