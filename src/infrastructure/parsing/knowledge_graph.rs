//! Knowledge graph side panel, with the extended hotel variant

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::config::KnowledgeGraphSelectors;
use super::context::ParseContext;
use super::dom;
use super::normalize;
use super::{compile_selector, FeatureDetector, ParsingResult};
use crate::domain::serp::{HotelAd, KnowledgeGraph, PeopleAlsoSearchFor, Serp};
use crate::infrastructure::config::Feature;

pub struct KnowledgeGraphDetector {
    panel: Selector,
    title: Selector,
    kg_type: Selector,
    hotel_marker: Selector,
    hotel_marker_text: String,
    hotel_type: String,
    category: Selector,
    rating: Selector,
    address: Selector,
    phone: Selector,
    reviewers: Selector,
    website: Selector,
    hotel_details: Selector,
    people_also_search_for: Selector,
    people_also_search_for_entry: Selector,
    people_also_search_for_name: Selector,
    people_also_search_for_type: Selector,
    people_also_search_for_link: Selector,
    hotel_ads: Selector,
    hotel_ad_host: Selector,
    hotel_ad_price: Selector,
    hotel_ad_details: Selector,
    properties: Selector,
    property: Selector,
    image: Selector,
    link: Selector,
}

impl KnowledgeGraphDetector {
    pub fn with_config(selectors: &KnowledgeGraphSelectors) -> ParsingResult<Self> {
        let compile = |field: &str, selector: &str| {
            compile_selector(&format!("knowledge_graph.{field}"), selector)
        };

        Ok(Self {
            panel: compile("panel", &selectors.panel)?,
            title: compile("title", &selectors.title)?,
            kg_type: compile("kg_type", &selectors.kg_type)?,
            hotel_marker: compile("hotel_marker", &selectors.hotel_marker)?,
            hotel_marker_text: selectors.hotel_marker_text.clone(),
            hotel_type: selectors.hotel_type.clone(),
            category: compile("category", &selectors.category)?,
            rating: compile("rating", &selectors.rating)?,
            address: compile("address", &selectors.address)?,
            phone: compile("phone", &selectors.phone)?,
            reviewers: compile("reviewers", &selectors.reviewers)?,
            website: compile("website", &selectors.website)?,
            hotel_details: compile("hotel_details", &selectors.hotel_details)?,
            people_also_search_for: compile(
                "people_also_search_for",
                &selectors.people_also_search_for,
            )?,
            people_also_search_for_entry: compile(
                "people_also_search_for_entry",
                &selectors.people_also_search_for_entry,
            )?,
            people_also_search_for_name: compile(
                "people_also_search_for_name",
                &selectors.people_also_search_for_name,
            )?,
            people_also_search_for_type: compile(
                "people_also_search_for_type",
                &selectors.people_also_search_for_type,
            )?,
            people_also_search_for_link: compile(
                "people_also_search_for_link",
                &selectors.people_also_search_for_link,
            )?,
            hotel_ads: compile("hotel_ads", &selectors.hotel_ads)?,
            hotel_ad_host: compile("hotel_ad_host", &selectors.hotel_ad_host)?,
            hotel_ad_price: compile("hotel_ad_price", &selectors.hotel_ad_price)?,
            hotel_ad_details: compile("hotel_ad_details", &selectors.hotel_ad_details)?,
            properties: compile("properties", &selectors.properties)?,
            property: compile("property", &selectors.property)?,
            image: compile("image", &selectors.image)?,
            link: compile("link", &selectors.link)?,
        })
    }

    fn is_hotel(&self, panel: ElementRef<'_>) -> bool {
        dom::first_text(panel, &self.hotel_marker)
            .is_some_and(|marker| marker == self.hotel_marker_text)
    }

    fn fill_hotel(&self, panel: ElementRef<'_>, context: &ParseContext, graph: &mut KnowledgeGraph) {
        let origin = context.search_origin.as_str();

        graph.kg_type = self.hotel_type.clone();
        graph.category = dom::first_text(panel, &self.category);
        graph.rating = dom::first_text(panel, &self.rating);
        graph.address = dom::first_text(panel, &self.address);
        graph.phone = dom::first_text(panel, &self.phone);
        graph.reviewers = dom::first_text(panel, &self.reviewers);
        graph.website = dom::select_attr(panel, &self.website, "href");
        graph.hotel_details = dom::first_text(panel, &self.hotel_details);
        graph.people_also_search_for = Some(self.people_also_search_for(panel, origin));
        graph.people_also_search_for_link =
            dom::select_attr(panel, &self.people_also_search_for_link, "href")
                .map(|href| normalize::absolute_url(&href, origin));
        graph.hotel_ads = Some(self.hotel_ads(panel));

        if let Some(properties) = panel.select(&self.properties).next() {
            graph.hotel_properties = Some(properties.select(&self.property).map(dom::text).collect());
        }
        if let Some(image) = panel.select(&self.image).next() {
            graph.image = dom::select_attr(image, &self.link, "href")
                .map(|href| normalize::absolute_url(&href, origin));
        }
    }

    fn people_also_search_for(&self, panel: ElementRef<'_>, origin: &str) -> Vec<PeopleAlsoSearchFor> {
        let Some(section) = panel.select(&self.people_also_search_for).next() else {
            return Vec::new();
        };
        section
            .select(&self.people_also_search_for_entry)
            .map(|entry| PeopleAlsoSearchFor {
                link: normalize::absolute_url(
                    &dom::select_attr(entry, &self.link, "href").unwrap_or_default(),
                    origin,
                ),
                name: dom::first_text(entry, &self.people_also_search_for_name).unwrap_or_default(),
                entity_type: dom::first_text(entry, &self.people_also_search_for_type)
                    .unwrap_or_default(),
            })
            .collect()
    }

    fn hotel_ads(&self, panel: ElementRef<'_>) -> Vec<HotelAd> {
        panel
            .select(&self.hotel_ads)
            .map(|ad| HotelAd {
                link: dom::select_attr(ad, &self.link, "href").unwrap_or_default(),
                host: dom::first_text(ad, &self.hotel_ad_host).unwrap_or_default(),
                price: dom::first_text(ad, &self.hotel_ad_price).unwrap_or_default(),
                details: dom::first_text(ad, &self.hotel_ad_details),
            })
            .collect()
    }
}

impl FeatureDetector for KnowledgeGraphDetector {
    fn feature(&self) -> Feature {
        Feature::KnowledgeGraph
    }

    fn detect(&self, html: &Html, context: &ParseContext, serp: &mut Serp) {
        let Some(panel) = html.select(&self.panel).next() else {
            return;
        };

        let document = html.root_element();
        let mut graph = KnowledgeGraph::new(
            dom::first_text(document, &self.title).unwrap_or_default(),
            dom::first_text(document, &self.kg_type).unwrap_or_default(),
        );
        if self.is_hotel(panel) {
            self.fill_hotel(panel, context, &mut graph);
        }

        debug!("Found knowledge graph '{}' ({})", graph.title, graph.kg_type);
        serp.knowledge_graph = Some(graph);
    }
}
