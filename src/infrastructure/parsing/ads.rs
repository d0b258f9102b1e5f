//! Paid ads above (`top`) and below (`bottom`) the organic listings

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::AdSelectors;
use super::context::ParseContext;
use super::dom;
use super::normalize;
use super::{compile_selector, FeatureDetector, ParsingResult};
use crate::domain::serp::{Ad, Adwords, Serp, Sitelink, SitelinkType};
use crate::infrastructure::config::Feature;

pub struct AdsDetector {
    top: Selector,
    bottom: Selector,
    ads: Selector,
    title: Selector,
    url: Selector,
    snippet: Selector,
    snippet_excluded_scope: Selector,
    snippet_excluded: Selector,
    card_sitelinks: Selector,
    card_href: Selector,
    card_title: Selector,
    inline_sitelinks: Selector,
}

impl AdsDetector {
    pub fn with_config(selectors: &AdSelectors) -> ParsingResult<Self> {
        Ok(Self {
            top: compile_selector("ads.top", &selectors.top)?,
            bottom: compile_selector("ads.bottom", &selectors.bottom)?,
            ads: compile_selector("ads.ads", &selectors.ads)?,
            title: compile_selector("ads.title", &selectors.title)?,
            url: compile_selector("ads.url", &selectors.url)?,
            snippet: compile_selector("ads.snippet", &selectors.snippet)?,
            snippet_excluded_scope: compile_selector(
                "ads.snippet_excluded_scope",
                &selectors.snippet_excluded_scope,
            )?,
            snippet_excluded: compile_selector("ads.snippet_excluded", &selectors.snippet_excluded)?,
            card_sitelinks: compile_selector("ads.card_sitelinks", &selectors.card_sitelinks)?,
            card_href: compile_selector("ads.card_href", &selectors.card_href)?,
            card_title: compile_selector("ads.card_title", &selectors.card_title)?,
            inline_sitelinks: compile_selector("ads.inline_sitelinks", &selectors.inline_sitelinks)?,
        })
    }

    /// Ads of one block, or `None` when the block is not on the page
    fn block(&self, html: &Html, block: &Selector, context: &ParseContext) -> Option<Vec<Ad>> {
        let block = html.select(block).next()?;
        let ads = block
            .select(&self.ads)
            .zip(1u32..)
            .map(|(ad, position)| self.ad(ad, position, context))
            .collect();
        Some(ads)
    }

    fn ad(&self, ad: ElementRef<'_>, position: u32, context: &ParseContext) -> Ad {
        let url = dom::select_attr(ad, &self.url, "href").unwrap_or_default();
        Ad {
            position,
            title: dom::select_text(ad, &self.title),
            domain: normalize::domain(&url, &context.search_origin).unwrap_or_default(),
            link_type: normalize::link_type(&url, &context.search_origin),
            url,
            snippet: self.snippet(ad),
            sitelinks: self.sitelinks(ad),
        }
    }

    /// Body text, leaving out snippet-styled nodes that belong to sitelinks
    fn snippet(&self, ad: ElementRef<'_>) -> String {
        let raw: String = ad
            .select(&self.snippet)
            .filter(|node| !self.snippet_excluded.matches(node))
            .filter(|node| {
                dom::parent_element(*node)
                    .and_then(|parent| dom::closest(parent, &self.snippet_excluded_scope))
                    .is_none()
            })
            .flat_map(|node| node.text())
            .collect();
        normalize::collapse_whitespace(&raw)
    }

    fn sitelinks(&self, ad: ElementRef<'_>) -> Vec<Sitelink> {
        let cards = ad.select(&self.card_sitelinks).map(|card| {
            let snippet: String = dom::child_elements(card)
                .filter(|child| !self.card_title.matches(child))
                .flat_map(|child| child.text())
                .collect();
            Sitelink {
                title: dom::select_text(card, &self.card_title),
                href: dom::select_attr(card, &self.card_href, "href").unwrap_or_default(),
                snippet: Some(normalize::collapse_whitespace(&snippet)),
                sitelink_type: SitelinkType::Card,
            }
        });

        let inline = ad.select(&self.inline_sitelinks).map(|link| Sitelink {
            title: dom::text(link),
            href: dom::attr(link, "href").unwrap_or_default(),
            snippet: None,
            sitelink_type: SitelinkType::Inline,
        });

        cards.chain(inline).collect()
    }
}

impl FeatureDetector for AdsDetector {
    fn feature(&self) -> Feature {
        Feature::Ads
    }

    fn detect(&self, html: &Html, context: &ParseContext, serp: &mut Serp) {
        let adwords = Adwords {
            adwords_top: self.block(html, &self.top, context),
            adwords_bottom: self.block(html, &self.bottom, context),
        };

        if adwords.adwords_top.is_none() && adwords.adwords_bottom.is_none() {
            return;
        }
        debug!(
            "Found ads: top={:?} bottom={:?}",
            adwords.adwords_top.as_ref().map(Vec::len),
            adwords.adwords_bottom.as_ref().map(Vec::len)
        );
        serp.adwords = Some(adwords);
    }
}
